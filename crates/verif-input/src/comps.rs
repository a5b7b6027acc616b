//! Legacy COMPS NetCDF layout.
//!
//! Tagged with the global attribute `Convensions = "comps"` (the attribute
//! name is misspelled by the COMPS producer and matched as written).
//! Coordinates live in `Date`, `Offset`, `Location` (ids), `Lat`, `Lon`
//! and `Elev`. Observations and forecasts are `obs` and `fcst`. There is no
//! threshold or quantile coordinate: every threshold or quantile has its own
//! `[Date, Offset, Location]` variable named by the [naming](crate::naming)
//! codec (`p03` for threshold 0.3, `q90` for quantile 0.9), and those are
//! stacked into the canonical 4-D arrays here.

use std::collections::HashSet;
use std::path::Path;

use ndarray::{Array4, Axis};
use tracing::debug;
use verif_common::Variable;

use crate::config::LoadConfig;
use crate::dispatch::{Decoder, Format, InputSource};
use crate::error::InputResult;
use crate::input::{Input, InputParts};
use crate::key::F64Key;
use crate::naming::{classify, NamedValue};
use crate::nc;

pub const CONVENTION_ATTRIBUTE: &str = "Convensions";
pub const CONVENTION: &str = "comps";

/// Coordinate variables, never thresholds or quantiles.
pub const DIMENSION_NAMES: [&str; 6] = ["Date", "Offset", "Location", "Lat", "Lon", "Elev"];

/// Decoder for COMPS files.
#[derive(Debug, Clone, Copy, Default)]
pub struct Comps;

/// Threshold and quantile variables found in a COMPS file, in storage order.
#[derive(Debug, Default, PartialEq)]
pub struct Discovered {
    /// `(threshold, variable name)`
    pub thresholds: Vec<(f64, String)>,
    /// `(quantile, variable name)`
    pub quantiles: Vec<(f64, String)>,
}

/// Sort variable names into thresholds and quantiles.
///
/// Names the codec does not understand are skipped. When two names decode
/// to the same value the first one wins.
pub fn discover<'a>(names: impl IntoIterator<Item = &'a str>) -> Discovered {
    let mut discovered = Discovered::default();
    let mut seen_thresholds = HashSet::new();
    let mut seen_quantiles = HashSet::new();

    for name in names {
        if DIMENSION_NAMES.contains(&name) {
            continue;
        }
        match classify(name) {
            Some(NamedValue::Threshold(t)) => {
                if seen_thresholds.insert(F64Key::new(t)) {
                    discovered.thresholds.push((t, name.to_string()));
                }
            }
            Some(NamedValue::Quantile(q)) => {
                if seen_quantiles.insert(F64Key::new(q)) {
                    discovered.quantiles.push((q, name.to_string()));
                }
            }
            None => debug!(variable = name, "Not a threshold or quantile variable"),
        }
    }
    discovered
}

impl Decoder for Comps {
    fn format(&self) -> Format {
        Format::Comps
    }

    fn is_valid(&self, path: &Path) -> bool {
        nc::has_convention(path, CONVENTION_ATTRIBUTE, CONVENTION)
    }

    fn load(&self, source: &InputSource, config: &LoadConfig) -> InputResult<Input> {
        nc::silence_hdf5_errors();
        let file = netcdf::open(&source.path)?;

        let dates = nc::to_dates(&nc::read_coord(&file, "Date", config)?)?;
        let offsets = nc::read_coord(&file, "Offset", config)?;
        let locations = nc::to_locations(
            &nc::read_coord(&file, "Location", config)?,
            &nc::read_coord(&file, "Lat", config)?,
            &nc::read_coord(&file, "Lon", config)?,
            &nc::read_coord(&file, "Elev", config)?,
        )?;
        let dims = (dates.len(), offsets.len(), locations.len());

        let names: Vec<String> = file.variables().map(|v| v.name()).collect();
        let discovered = discover(names.iter().map(String::as_str));
        debug!(
            thresholds = ?discovered.thresholds,
            quantiles = ?discovered.quantiles,
            "Discovered COMPS score variables"
        );

        let obs = nc::read_array3(&file, "obs", dims, config)?;
        let deterministic = nc::read_array3(&file, "fcst", dims, config)?;
        let threshold_scores = stack(&file, &discovered.thresholds, dims, config)?;
        let quantile_scores = stack(&file, &discovered.quantiles, dims, config)?;

        let name = nc::global_str(&file, "Variable").unwrap_or_else(|| "Unknown".to_string());
        let units = nc::normalize_units(nc::global_str(&file, "Units").as_deref());

        Input::from_parts(InputParts {
            full_name: source.full_name.clone(),
            format: Format::Comps,
            variable: Variable::new(name, units),
            dates,
            offsets,
            locations,
            thresholds: discovered.thresholds.into_iter().map(|(t, _)| t).collect(),
            quantiles: discovered.quantiles.into_iter().map(|(q, _)| q).collect(),
            obs,
            deterministic,
            ensemble: None,
            threshold_scores,
            quantile_scores,
            pit: None,
            warnings: Vec::new(),
        })
    }
}

/// Stack one 3-D variable per value along a new trailing axis, in the order
/// of `variables`.
fn stack(
    file: &netcdf::File,
    variables: &[(f64, String)],
    dims: (usize, usize, usize),
    config: &LoadConfig,
) -> InputResult<Array4<f64>> {
    let mut stacked = Array4::from_elem((dims.0, dims.1, dims.2, variables.len()), f64::NAN);
    for (k, (_, name)) in variables.iter().enumerate() {
        let values = nc::read_array3(file, name, dims, config)?;
        stacked.index_axis_mut(Axis(3), k).assign(&values);
    }
    Ok(stacked)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discover_keeps_storage_order() {
        let names = ["Date", "Offset", "Location", "Lat", "Lon", "Elev", "obs", "fcst", "p1", "q50", "p01", "p03", "q10"];
        let discovered = discover(names);
        let thresholds: Vec<f64> = discovered.thresholds.iter().map(|(t, _)| *t).collect();
        let quantiles: Vec<f64> = discovered.quantiles.iter().map(|(q, _)| *q).collect();
        assert_eq!(thresholds, vec![1.0, 0.1, 0.3]);
        assert_eq!(quantiles, vec![0.5, 0.1]);
        assert_eq!(discovered.thresholds[1].1, "p01");
    }

    #[test]
    fn test_discover_ignores_unknown_names() {
        let discovered = discover(["pit", "precip", "quality", "q250"]);
        assert_eq!(discovered, Discovered::default());
    }

    #[test]
    fn test_discover_skips_duplicate_values() {
        let discovered = discover(["p01", "p010"]);
        assert_eq!(discovered.thresholds.len(), 1);
        assert_eq!(discovered.thresholds[0].1, "p01");
    }
}
