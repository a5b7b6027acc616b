//! Synthetic NetCDF inputs in the verif CF and COMPS layouts.
//!
//! Values follow a predictable pattern so tests can check that every cell
//! landed where it should: see [`cell_value`].

use std::path::Path;

/// Value stored at `[date, offset, location]` by the generators:
/// `date * 100 + offset * 10 + location`.
///
/// ```
/// use test_utils::cell_value;
///
/// assert_eq!(cell_value(1, 2, 3), 123.0);
/// ```
pub fn cell_value(date: usize, offset: usize, location: usize) -> f64 {
    (date * 100 + offset * 10 + location) as f64
}

/// Fill a `[dates, offsets, locations]` array with [`cell_value`] plus `bias`.
pub fn pattern3(dims: (usize, usize, usize), bias: f64) -> Vec<f64> {
    let mut data = Vec::with_capacity(dims.0 * dims.1 * dims.2);
    for d in 0..dims.0 {
        for o in 0..dims.1 {
            for s in 0..dims.2 {
                data.push(cell_value(d, o, s) + bias);
            }
        }
    }
    data
}

/// Coordinates shared by both layouts.
#[derive(Debug, Clone)]
pub struct Axes {
    pub dates: Vec<f64>,
    pub offsets: Vec<f64>,
    pub ids: Vec<f64>,
    pub lats: Vec<f64>,
    pub lons: Vec<f64>,
    pub elevs: Vec<f64>,
}

impl Axes {
    /// 2 dates, 3 offsets, 2 locations.
    pub fn small() -> Self {
        Self {
            dates: vec![20150101.0, 20150102.0],
            offsets: vec![0.0, 6.0, 12.0],
            ids: vec![214.0, 180.0],
            lats: vec![49.2, 50.3],
            lons: vec![-122.1, -120.3],
            elevs: vec![92.0, 150.0],
        }
    }

    pub fn dims(&self) -> (usize, usize, usize) {
        (self.dates.len(), self.offsets.len(), self.ids.len())
    }
}

/// Contents of a verif CF file.
#[derive(Debug, Clone)]
pub struct CfFile {
    pub axes: Axes,
    pub thresholds: Vec<f64>,
    pub quantiles: Vec<f64>,
    pub obs: Vec<f64>,
    pub fcst: Vec<f64>,
    /// `[date, offset, location, threshold]`
    pub cdf: Option<Vec<f64>>,
    /// `[date, offset, location, quantile]`
    pub x: Option<Vec<f64>>,
    /// Member count and `[date, offset, location, member]` values
    pub ens: Option<(usize, Vec<f64>)>,
    pub standard_name: Option<String>,
    pub units: Option<String>,
    /// Global `Conventions` attribute; `None` leaves it out
    pub conventions: Option<String>,
}

impl CfFile {
    /// [`Axes::small`] with obs/fcst following [`pattern3`] (fcst offset by
    /// 0.5) and no probabilistic data.
    pub fn small() -> Self {
        let axes = Axes::small();
        let dims = axes.dims();
        Self {
            obs: pattern3(dims, 0.0),
            fcst: pattern3(dims, 0.5),
            axes,
            thresholds: Vec::new(),
            quantiles: Vec::new(),
            cdf: None,
            x: None,
            ens: None,
            standard_name: Some("air_temperature".to_string()),
            units: Some("K".to_string()),
            conventions: Some("verif_1.0.0".to_string()),
        }
    }

    /// Write the file to `path`.
    pub fn write(&self, path: &Path) -> Result<(), netcdf::Error> {
        let mut file = netcdf::create(path)?;
        if let Some(conventions) = &self.conventions {
            file.add_attribute("Conventions", conventions.as_str())?;
        }
        if let Some(name) = &self.standard_name {
            file.add_attribute("standard_name", name.as_str())?;
        }
        if let Some(units) = &self.units {
            file.add_attribute("Units", units.as_str())?;
        }

        write_axes(&mut file, &self.axes, ["date", "offset", "location"], ["date", "offset", "id", "lat", "lon", "elev"])?;
        let cube = ["date", "offset", "location"];
        put(&mut file, "obs", &cube, &self.obs)?;
        put(&mut file, "fcst", &cube, &self.fcst)?;

        if !self.thresholds.is_empty() {
            file.add_dimension("threshold", self.thresholds.len())?;
            put(&mut file, "thresholds", &["threshold"], &self.thresholds)?;
            if let Some(cdf) = &self.cdf {
                put(&mut file, "cdf", &["date", "offset", "location", "threshold"], cdf)?;
            }
        }
        if !self.quantiles.is_empty() {
            file.add_dimension("quantile", self.quantiles.len())?;
            put(&mut file, "quantiles", &["quantile"], &self.quantiles)?;
            if let Some(x) = &self.x {
                put(&mut file, "x", &["date", "offset", "location", "quantile"], x)?;
            }
        }
        if let Some((members, values)) = &self.ens {
            file.add_dimension("ensemble_member", *members)?;
            put(&mut file, "ens", &["date", "offset", "location", "ensemble_member"], values)?;
        }
        Ok(())
    }
}

/// Contents of a COMPS file.
#[derive(Debug, Clone)]
pub struct CompsFile {
    pub axes: Axes,
    pub obs: Vec<f64>,
    pub fcst: Vec<f64>,
    /// Per-threshold/quantile variables (`p03`, `q90`, ...), in storage
    /// order, each `[Date, Offset, Location]`
    pub scores: Vec<(String, Vec<f64>)>,
    pub variable: Option<String>,
    pub units: Option<String>,
}

impl CompsFile {
    /// [`Axes::small`] with obs/fcst following [`pattern3`] and no score
    /// variables.
    pub fn small() -> Self {
        let axes = Axes::small();
        let dims = axes.dims();
        Self {
            obs: pattern3(dims, 0.0),
            fcst: pattern3(dims, 0.5),
            axes,
            scores: Vec::new(),
            variable: Some("Precip".to_string()),
            units: Some("mm".to_string()),
        }
    }

    /// Add a score variable whose cells hold `value`.
    pub fn with_score(mut self, name: &str, value: f64) -> Self {
        let (d, o, s) = self.axes.dims();
        self.scores.push((name.to_string(), vec![value; d * o * s]));
        self
    }

    /// Write the file to `path`.
    pub fn write(&self, path: &Path) -> Result<(), netcdf::Error> {
        let mut file = netcdf::create(path)?;
        file.add_attribute("Convensions", "comps")?;
        if let Some(variable) = &self.variable {
            file.add_attribute("Variable", variable.as_str())?;
        }
        if let Some(units) = &self.units {
            file.add_attribute("Units", units.as_str())?;
        }

        write_axes(&mut file, &self.axes, ["Date", "Offset", "Location"], ["Date", "Offset", "Location", "Lat", "Lon", "Elev"])?;
        let cube = ["Date", "Offset", "Location"];
        put(&mut file, "obs", &cube, &self.obs)?;
        put(&mut file, "fcst", &cube, &self.fcst)?;
        for (name, values) in &self.scores {
            put(&mut file, name, &cube, values)?;
        }
        Ok(())
    }
}

fn write_axes(
    file: &mut netcdf::FileMut,
    axes: &Axes,
    dims: [&str; 3],
    names: [&str; 6],
) -> Result<(), netcdf::Error> {
    let [date_dim, offset_dim, location_dim] = dims;
    file.add_dimension(date_dim, axes.dates.len())?;
    file.add_dimension(offset_dim, axes.offsets.len())?;
    file.add_dimension(location_dim, axes.ids.len())?;

    put(file, names[0], &[date_dim], &axes.dates)?;
    put(file, names[1], &[offset_dim], &axes.offsets)?;
    put(file, names[2], &[location_dim], &axes.ids)?;
    put(file, names[3], &[location_dim], &axes.lats)?;
    put(file, names[4], &[location_dim], &axes.lons)?;
    put(file, names[5], &[location_dim], &axes.elevs)?;
    Ok(())
}

fn put(file: &mut netcdf::FileMut, name: &str, dims: &[&str], values: &[f64]) -> Result<(), netcdf::Error> {
    let mut var = file.add_variable::<f64>(name, dims)?;
    var.put_values(values, ..)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern3_layout() {
        let data = pattern3((2, 3, 4), 0.0);
        assert_eq!(data.len(), 24);
        // index = (d * 3 + o) * 4 + s
        assert_eq!(data[(1 * 3 + 2) * 4 + 3], 123.0);
        assert_eq!(pattern3((1, 1, 1), 0.5), vec![0.5]);
    }

    #[test]
    fn test_small_axes_are_consistent() {
        let axes = Axes::small();
        assert_eq!(axes.dims(), (2, 3, 2));
        assert_eq!(axes.lats.len(), axes.ids.len());
        assert_eq!(CfFile::small().obs.len(), 12);
        assert_eq!(CompsFile::small().with_score("p03", 0.2).scores[0].1.len(), 12);
    }
}
