//! The canonical verification snapshot.

use std::collections::HashSet;
use std::path::Path;

use chrono::NaiveDate;
use ndarray::{Array3, Array4, ArrayView3, ArrayView4};
use verif_common::{date_to_naive, Location, Variable};

use crate::dispatch::Format;
use crate::error::{InputError, InputResult};
use crate::key::F64Key;
use crate::warning::LoadWarning;

/// Verification data loaded from one file.
///
/// Value arrays are indexed `[date, offset, location]`, with a trailing
/// member, threshold or quantile axis for the 4-D arrays. Missing values
/// are NaN. A snapshot is immutable once loaded.
#[derive(Debug, Clone)]
pub struct Input {
    full_name: String,
    format: Format,
    variable: Variable,
    dates: Vec<i64>,
    offsets: Vec<f64>,
    locations: Vec<Location>,
    thresholds: Vec<f64>,
    quantiles: Vec<f64>,
    obs: Array3<f64>,
    deterministic: Array3<f64>,
    ensemble: Option<Array4<f64>>,
    threshold_scores: Array4<f64>,
    quantile_scores: Array4<f64>,
    pit: Option<Array3<f64>>,
    warnings: Vec<LoadWarning>,
}

/// Everything a decoder produces, before the invariants are checked.
#[derive(Debug)]
pub(crate) struct InputParts {
    pub full_name: String,
    pub format: Format,
    pub variable: Variable,
    pub dates: Vec<i64>,
    pub offsets: Vec<f64>,
    pub locations: Vec<Location>,
    pub thresholds: Vec<f64>,
    pub quantiles: Vec<f64>,
    pub obs: Array3<f64>,
    pub deterministic: Array3<f64>,
    pub ensemble: Option<Array4<f64>>,
    pub threshold_scores: Array4<f64>,
    pub quantile_scores: Array4<f64>,
    pub pit: Option<Array3<f64>>,
    pub warnings: Vec<LoadWarning>,
}

impl Input {
    /// Build a snapshot, checking array extents and coordinate uniqueness.
    pub(crate) fn from_parts(parts: InputParts) -> InputResult<Self> {
        let dims = (parts.dates.len(), parts.offsets.len(), parts.locations.len());

        check_shape3("obs", &parts.obs, dims)?;
        check_shape3("fcst", &parts.deterministic, dims)?;
        if let Some(pit) = &parts.pit {
            check_shape3("pit", pit, dims)?;
        }
        if let Some(ens) = &parts.ensemble {
            let (d, o, l, _) = ens.dim();
            if (d, o, l) != dims {
                return Err(shape_error("ens", &[d, o, l], &[dims.0, dims.1, dims.2]));
            }
        }
        check_shape4(
            "threshold scores",
            &parts.threshold_scores,
            (dims.0, dims.1, dims.2, parts.thresholds.len()),
        )?;
        check_shape4(
            "quantile scores",
            &parts.quantile_scores,
            (dims.0, dims.1, dims.2, parts.quantiles.len()),
        )?;

        let mut seen_dates = HashSet::new();
        if let Some(date) = parts.dates.iter().find(|d| !seen_dates.insert(**d)) {
            return Err(InputError::InvalidFormat(format!("duplicate date {}", date)));
        }
        check_unique("offset", &parts.offsets)?;
        check_unique("threshold", &parts.thresholds)?;
        check_unique("quantile", &parts.quantiles)?;
        if let Some(q) = parts.quantiles.iter().find(|q| !(0.0..=1.0).contains(*q)) {
            return Err(InputError::InvalidFormat(format!(
                "quantile {} outside [0, 1]",
                q
            )));
        }
        let mut seen_ids = HashSet::new();
        if let Some(id) = parts
            .locations
            .iter()
            .filter_map(Location::id)
            .find(|id| !seen_ids.insert(*id))
        {
            return Err(InputError::InvalidFormat(format!("duplicate location id {}", id)));
        }

        Ok(Self {
            full_name: parts.full_name,
            format: parts.format,
            variable: parts.variable,
            dates: parts.dates,
            offsets: parts.offsets,
            locations: parts.locations,
            thresholds: parts.thresholds,
            quantiles: parts.quantiles,
            obs: parts.obs,
            deterministic: parts.deterministic,
            ensemble: parts.ensemble,
            threshold_scores: parts.threshold_scores,
            quantile_scores: parts.quantile_scores,
            pit: parts.pit,
            warnings: parts.warnings,
        })
    }

    /// The path the input was loaded from, as given by the caller.
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    /// File name without directories.
    pub fn name(&self) -> &str {
        Path::new(&self.full_name)
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or(&self.full_name)
    }

    /// File name without directories and extension.
    pub fn short_name(&self) -> &str {
        Path::new(&self.full_name)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_else(|| self.name())
    }

    pub fn format(&self) -> Format {
        self.format
    }

    pub fn variable(&self) -> &Variable {
        &self.variable
    }

    /// Dates as `YYYYMMDD` integers.
    pub fn dates(&self) -> &[i64] {
        &self.dates
    }

    /// Dates decoded to calendar dates; `None` where a value is not a valid
    /// `YYYYMMDD` date.
    pub fn calendar_dates(&self) -> Vec<Option<NaiveDate>> {
        self.dates.iter().map(|&d| date_to_naive(d).ok()).collect()
    }

    /// Lead times in hours.
    pub fn offsets(&self) -> &[f64] {
        &self.offsets
    }

    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    /// Position of the location with the given id on the location axis.
    pub fn location_index(&self, id: i64) -> Option<usize> {
        self.locations.iter().position(|l| l.id() == Some(id))
    }

    pub fn thresholds(&self) -> &[f64] {
        &self.thresholds
    }

    pub fn quantiles(&self) -> &[f64] {
        &self.quantiles
    }

    pub fn obs(&self) -> ArrayView3<'_, f64> {
        self.obs.view()
    }

    pub fn deterministic(&self) -> ArrayView3<'_, f64> {
        self.deterministic.view()
    }

    /// Ensemble members, `[date, offset, location, member]`. Only verif CF
    /// files carry them.
    pub fn ensemble(&self) -> Option<ArrayView4<'_, f64>> {
        self.ensemble.as_ref().map(|e| e.view())
    }

    /// Cumulative probability at each threshold.
    pub fn threshold_scores(&self) -> ArrayView4<'_, f64> {
        self.threshold_scores.view()
    }

    /// Forecast value at each quantile.
    pub fn quantile_scores(&self) -> ArrayView4<'_, f64> {
        self.quantile_scores.view()
    }

    /// Probability integral transform values, when the file has them.
    pub fn pit(&self) -> Option<ArrayView3<'_, f64>> {
        self.pit.as_ref().map(|p| p.view())
    }

    pub fn warnings(&self) -> &[LoadWarning] {
        &self.warnings
    }
}

fn check_shape3(name: &str, array: &Array3<f64>, expected: (usize, usize, usize)) -> InputResult<()> {
    if array.dim() != expected {
        let (a, b, c) = array.dim();
        return Err(shape_error(name, &[a, b, c], &[expected.0, expected.1, expected.2]));
    }
    Ok(())
}

fn check_shape4(
    name: &str,
    array: &Array4<f64>,
    expected: (usize, usize, usize, usize),
) -> InputResult<()> {
    if array.dim() != expected {
        let (a, b, c, d) = array.dim();
        return Err(shape_error(
            name,
            &[a, b, c, d],
            &[expected.0, expected.1, expected.2, expected.3],
        ));
    }
    Ok(())
}

fn shape_error(name: &str, found: &[usize], expected: &[usize]) -> InputError {
    InputError::InvalidFormat(format!(
        "{} has shape {:?}, coordinates require {:?}",
        name, found, expected
    ))
}

fn check_unique(axis: &str, values: &[f64]) -> InputResult<()> {
    let mut seen = HashSet::new();
    match values.iter().find(|v| !seen.insert(F64Key::new(**v))) {
        Some(value) => Err(InputError::InvalidFormat(format!(
            "duplicate {} {}",
            axis, value
        ))),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parts(dates: Vec<i64>, offsets: Vec<f64>) -> InputParts {
        let (nd, no) = (dates.len(), offsets.len());
        InputParts {
            full_name: "~/data/run.nc".to_string(),
            format: Format::NetcdfCf,
            variable: Variable::new("T", "K"),
            dates,
            offsets,
            locations: vec![Location::new(Some(1), 0.0, 0.0, 0.0)],
            thresholds: vec![],
            quantiles: vec![],
            obs: Array3::from_elem((nd, no, 1), f64::NAN),
            deterministic: Array3::from_elem((nd, no, 1), f64::NAN),
            ensemble: None,
            threshold_scores: Array4::from_elem((nd, no, 1, 0), f64::NAN),
            quantile_scores: Array4::from_elem((nd, no, 1, 0), f64::NAN),
            pit: None,
            warnings: vec![],
        }
    }

    #[test]
    fn test_names() {
        let input = Input::from_parts(parts(vec![20150101], vec![0.0])).unwrap();
        assert_eq!(input.full_name(), "~/data/run.nc");
        assert_eq!(input.name(), "run.nc");
        assert_eq!(input.short_name(), "run");
    }

    #[test]
    fn test_duplicate_offsets_rejected() {
        let result = Input::from_parts(parts(vec![20150101], vec![0.0, 0.0]));
        assert!(matches!(result, Err(InputError::InvalidFormat(_))));
    }

    #[test]
    fn test_shape_mismatch_rejected() {
        let mut p = parts(vec![20150101], vec![0.0]);
        p.obs = Array3::from_elem((1, 2, 1), f64::NAN);
        assert!(matches!(Input::from_parts(p), Err(InputError::InvalidFormat(_))));
    }

    #[test]
    fn test_calendar_dates() {
        let input = Input::from_parts(parts(vec![20150101, 0], vec![0.0])).unwrap();
        let dates = input.calendar_dates();
        assert_eq!(dates[0], NaiveDate::from_ymd_opt(2015, 1, 1));
        assert_eq!(dates[1], None);
    }
}
