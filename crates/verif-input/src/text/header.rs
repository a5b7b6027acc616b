//! Column layout of a text file, taken from its header line.

use std::path::Path;

use verif_common::is_number;

use crate::error::{InputError, InputResult};
use crate::warning::{LoadWarning, WarningLog};

/// Which column holds which attribute.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnLayout {
    /// Header names, one per column
    pub names: Vec<String>,
    pub date: Option<usize>,
    pub offset: Option<usize>,
    pub id: Option<usize>,
    pub lat: Option<usize>,
    pub lon: Option<usize>,
    pub elev: Option<usize>,
    pub obs: usize,
    pub fcst: usize,
    pub pit: Option<usize>,
    /// `(threshold, column)` for every `p<number>` column
    pub thresholds: Vec<(f64, usize)>,
    /// `(quantile, column)` for every `q<number>` column
    pub quantiles: Vec<(f64, usize)>,
}

impl ColumnLayout {
    /// Number of fields every data row must have.
    pub fn width(&self) -> usize {
        self.names.len()
    }

    pub fn name(&self, column: usize) -> &str {
        self.names.get(column).map(String::as_str).unwrap_or("?")
    }
}

/// Parse a header line into a column layout.
///
/// `obs` and `fcst` are required. Columns that match no attribute are
/// ignored with a warning.
pub(crate) fn parse_header(tokens: &[&str], path: &Path, warnings: &mut WarningLog) -> InputResult<ColumnLayout> {
    let mut layout = ColumnLayout {
        names: tokens.iter().map(|t| t.to_string()).collect(),
        ..Default::default()
    };
    let mut obs = None;
    let mut fcst = None;

    for (column, &token) in tokens.iter().enumerate() {
        match token {
            "date" => layout.date = Some(column),
            "offset" => layout.offset = Some(column),
            "id" => layout.id = Some(column),
            "lat" => layout.lat = Some(column),
            "lon" => layout.lon = Some(column),
            "elev" => layout.elev = Some(column),
            "obs" => obs = Some(column),
            "fcst" => fcst = Some(column),
            "pit" => layout.pit = Some(column),
            _ => match classify_probabilistic(token) {
                Ok(Probabilistic::Quantile(q)) => layout.quantiles.push((q, column)),
                Ok(Probabilistic::Threshold(t)) => layout.thresholds.push((t, column)),
                Err(reason) => warnings.push(LoadWarning::IgnoredColumn {
                    name: token.to_string(),
                    reason,
                }),
            },
        }
    }

    let missing = |column: &str| InputError::MissingRequiredColumn {
        path: path.to_path_buf(),
        column: column.to_string(),
    };
    layout.obs = obs.ok_or_else(|| missing("obs"))?;
    layout.fcst = fcst.ok_or_else(|| missing("fcst"))?;
    Ok(layout)
}

enum Probabilistic {
    Threshold(f64),
    Quantile(f64),
}

fn classify_probabilistic(token: &str) -> Result<Probabilistic, String> {
    if let Some(suffix) = token.strip_prefix('q') {
        let quantile = suffix_value(suffix).ok_or("quantile suffix is not a number")?;
        if !(0.0..=1.0).contains(&quantile) {
            return Err(format!("quantile {} outside [0, 1]", quantile));
        }
        return Ok(Probabilistic::Quantile(quantile));
    }
    if let Some(suffix) = token.strip_prefix('p') {
        let threshold = suffix_value(suffix).ok_or("threshold suffix is not a number")?;
        return Ok(Probabilistic::Threshold(threshold));
    }
    Err("unrecognized attribute".to_string())
}

fn suffix_value(suffix: &str) -> Option<f64> {
    if !is_number(suffix) {
        return None;
    }
    suffix.parse::<f64>().ok().filter(|v| v.is_finite())
}
