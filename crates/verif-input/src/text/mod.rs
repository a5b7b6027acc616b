//! Whitespace-delimited text layout.
//!
//! ```text
//! # variable: Precip
//! # units: mm
//! date offset id lat lon elev obs fcst p10 q0.9
//! 20150101 0 214 49.2 -122.1 92 3.4 2.1 0.91 3.0
//! ```
//!
//! Lines starting with `#` carry metadata, the first other line is the
//! header and every remaining line is one observation/forecast pair. Rows
//! may cover any subset of `(date, offset, location)`, so loading happens in
//! two passes: [`sparse`] reads rows into maps keyed by coordinate, and
//! [`dense`] lays those out on the discovered axes with NaN where no row
//! supplied a value.

pub mod dense;
pub mod header;
pub mod sparse;

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use tracing::debug;

use crate::config::LoadConfig;
use crate::dispatch::{Decoder, Format, InputSource};
use crate::error::InputResult;
use crate::input::{Input, InputParts};

pub use dense::{assemble, DenseArrays};
pub use header::ColumnLayout;
pub use sparse::{parse_rows, ParsedText, SparseTable};

/// Decoder for text files. Accepts any path; it is probed last.
#[derive(Debug, Clone, Copy, Default)]
pub struct Text;

impl Decoder for Text {
    fn format(&self) -> Format {
        Format::Text
    }

    fn is_valid(&self, _path: &Path) -> bool {
        true
    }

    fn load(&self, source: &InputSource, config: &LoadConfig) -> InputResult<Input> {
        let reader = BufReader::new(File::open(&source.path)?);
        let ParsedText {
            mut table,
            variable,
            rows,
            warnings,
        } = parse_rows(reader, &source.path, config)?;

        let dense = assemble(&table);
        let assigned = table.registry.resolve_unassigned_ids()?;

        debug!(
            path = %source.path.display(),
            rows,
            dates = table.dates.len(),
            offsets = table.offsets.len(),
            locations = table.registry.len(),
            assigned_ids = assigned,
            warnings = warnings.len(),
            "Assembled text input"
        );

        Input::from_parts(InputParts {
            full_name: source.full_name.clone(),
            format: Format::Text,
            variable,
            dates: table.dates.into_iter().collect(),
            offsets: table.offsets.iter().map(|o| o.value()).collect(),
            thresholds: table.thresholds.iter().map(|t| t.value()).collect(),
            quantiles: table.quantiles.iter().map(|q| q.value()).collect(),
            locations: table.registry.into_locations(),
            obs: dense.obs,
            deterministic: dense.deterministic,
            ensemble: None,
            threshold_scores: dense.threshold_scores,
            quantile_scores: dense.quantile_scores,
            pit: dense.pit,
            warnings,
        })
    }
}
