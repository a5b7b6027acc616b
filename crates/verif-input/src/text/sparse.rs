//! First pass over a text file: rows into sparse keyed tables.
//!
//! Values are keyed by `(date, offset, lat, lon, elev)` rather than by
//! location id, because ids of locations without one are only handed out
//! after the whole file has been read.

use std::collections::HashMap;
use std::io::BufRead;
use std::path::Path;

use indexmap::IndexSet;
use tracing::debug;
use verif_common::{as_integer, parse_clean, Location, Variable};

use crate::config::LoadConfig;
use crate::error::{InputError, InputResult};
use crate::key::{CoordKey, F64Key};
use crate::registry::{LocationRegistry, Lookup};
use crate::text::header::{parse_header, ColumnLayout};
use crate::warning::{LoadWarning, WarningLog};

pub const DEFAULT_VARIABLE: &str = "Unknown";
pub const DEFAULT_UNITS: &str = "Unknown units";

/// Key of one `[date, offset, location]` cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellKey {
    pub date: i64,
    pub offset: F64Key,
    pub coords: CoordKey,
}

impl CellKey {
    pub fn new(date: i64, offset: f64, location: &Location) -> Self {
        Self {
            date,
            offset: offset.into(),
            coords: CoordKey::new(location.lat(), location.lon(), location.elev()),
        }
    }
}

/// Everything read from a text file, before it is laid out densely.
///
/// Coordinate sets keep first-seen order.
#[derive(Debug, Default)]
pub struct SparseTable {
    pub dates: IndexSet<i64>,
    pub offsets: IndexSet<F64Key>,
    pub thresholds: IndexSet<F64Key>,
    pub quantiles: IndexSet<F64Key>,
    pub registry: LocationRegistry,
    pub obs: HashMap<CellKey, f64>,
    pub fcst: HashMap<CellKey, f64>,
    /// `None` when the file has no `pit` column
    pub pit: Option<HashMap<CellKey, f64>>,
    /// Threshold scores keyed by cell and threshold
    pub cdf: HashMap<(CellKey, F64Key), f64>,
    /// Quantile scores keyed by cell and quantile
    pub x: HashMap<(CellKey, F64Key), f64>,
}

/// Result of the first pass.
#[derive(Debug)]
pub struct ParsedText {
    pub table: SparseTable,
    pub variable: Variable,
    pub rows: usize,
    pub warnings: Vec<LoadWarning>,
}

enum State {
    HeaderPending,
    DataRow(ColumnLayout),
}

struct Parser<'a> {
    path: &'a Path,
    config: &'a LoadConfig,
    state: State,
    table: SparseTable,
    variable: String,
    units: String,
    rows: usize,
    conflict_reported: bool,
    warnings: WarningLog,
}

/// Read every line of `reader` into a [`SparseTable`].
///
/// `path` is only used in messages.
pub fn parse_rows<R: BufRead>(reader: R, path: &Path, config: &LoadConfig) -> InputResult<ParsedText> {
    let mut parser = Parser {
        path,
        config,
        state: State::HeaderPending,
        table: SparseTable::default(),
        variable: DEFAULT_VARIABLE.to_string(),
        units: DEFAULT_UNITS.to_string(),
        rows: 0,
        conflict_reported: false,
        warnings: WarningLog::new(path.display().to_string()),
    };

    for (index, line) in reader.lines().enumerate() {
        parser.line(index + 1, &line?)?;
    }

    if matches!(parser.state, State::HeaderPending) {
        debug!(path = %path.display(), "Text file has no header line");
    }
    Ok(ParsedText {
        table: parser.table,
        variable: Variable::new(parser.variable, parser.units),
        rows: parser.rows,
        warnings: parser.warnings.into_inner(),
    })
}

impl Parser<'_> {
    fn line(&mut self, line_no: usize, line: &str) -> InputResult<()> {
        if let Some(comment) = line.strip_prefix('#') {
            self.comment(line_no, line.trim_end(), comment);
            return Ok(());
        }
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Ok(());
        }

        let fields: Vec<&str> = trimmed.split_whitespace().collect();
        match std::mem::replace(&mut self.state, State::HeaderPending) {
            State::HeaderPending => {
                let layout = parse_header(&fields, self.path, &mut self.warnings)?;
                debug!(columns = ?layout.names, "Parsed text header");
                self.state = State::DataRow(layout);
                Ok(())
            }
            State::DataRow(layout) => {
                let result = self.row(line_no, trimmed, &fields, &layout);
                self.state = State::DataRow(layout);
                result
            }
        }
    }

    fn comment(&mut self, line_no: usize, line: &str, comment: &str) {
        let mut words = comment.split_whitespace();
        match (words.next(), words.clone().next()) {
            (Some("variable:"), _) => {
                self.variable = words.collect::<Vec<_>>().join(" ");
            }
            (Some("units:"), Some(units)) => {
                self.units = units.to_string();
            }
            _ => self.warnings.push(LoadWarning::IgnoredMetadataLine {
                line: line_no,
                content: line.to_string(),
            }),
        }
    }

    fn row(&mut self, line_no: usize, line: &str, fields: &[&str], layout: &ColumnLayout) -> InputResult<()> {
        if fields.len() != layout.width() {
            return Err(InputError::RowArityMismatch {
                line: line_no,
                expected: layout.width(),
                found: fields.len(),
                row: line.to_string(),
            });
        }
        let missing = self.config.missing_value;
        let number = |column: usize| -> InputResult<f64> {
            parse_clean(fields[column], missing).map_err(|_| InputError::InvalidValue {
                line: line_no,
                column: layout.name(column).to_string(),
                value: fields[column].to_string(),
            })
        };
        let optional = |column: Option<usize>, default: f64| -> InputResult<f64> {
            column.map_or(Ok(default), &number)
        };
        let invalid = |column: usize| InputError::InvalidValue {
            line: line_no,
            column: layout.name(column).to_string(),
            value: fields[column].to_string(),
        };

        let date = match layout.date {
            Some(column) => {
                let value = number(column)?;
                if value.is_nan() {
                    None
                } else {
                    Some(as_integer(value).ok_or_else(|| invalid(column))?)
                }
            }
            None => Some(0),
        };
        let offset = optional(layout.offset, 0.0)?;
        let id = match layout.id {
            Some(column) => {
                let value = number(column)?;
                if value.is_nan() {
                    None
                } else {
                    Some(as_integer(value).ok_or_else(|| invalid(column))?)
                }
            }
            None => None,
        };
        let lat = optional(layout.lat, f64::NAN)?;
        let lon = optional(layout.lon, f64::NAN)?;
        let elev = optional(layout.elev, f64::NAN)?;

        let obs = number(layout.obs)?;
        let fcst = number(layout.fcst)?;
        let pit = layout.pit.map(&number).transpose()?;
        let thresholds = layout
            .thresholds
            .iter()
            .map(|&(t, column)| number(column).map(|value| (F64Key::new(t), value)))
            .collect::<InputResult<Vec<_>>>()?;
        let quantiles = layout
            .quantiles
            .iter()
            .map(|&(q, column)| number(column).map(|value| (F64Key::new(q), value)))
            .collect::<InputResult<Vec<_>>>()?;

        let Some(date) = date else {
            self.warnings.push(LoadWarning::MissingDate { line: line_no });
            return Ok(());
        };
        let location = self.resolve_location(id, lat, lon, elev);
        let key = CellKey::new(date, offset, &location);

        let table = &mut self.table;
        table.dates.insert(date);
        table.offsets.insert(offset.into());
        table.obs.insert(key, obs);
        table.fcst.insert(key, fcst);
        if let Some(pit) = pit {
            table.pit.get_or_insert_with(HashMap::new).insert(key, pit);
        }
        for (threshold, value) in thresholds {
            table.thresholds.insert(threshold);
            table.cdf.insert((key, threshold), value);
        }
        for (quantile, value) in quantiles {
            table.quantiles.insert(quantile);
            table.x.insert((key, quantile), value);
        }
        self.rows += 1;
        Ok(())
    }

    /// Find the stored location for a row, registering new identities.
    ///
    /// A known id keeps the coordinates it was first seen with. The first
    /// row in the file whose coordinates disagree produces a warning; later
    /// disagreements are not reported again.
    fn resolve_location(&mut self, id: Option<i64>, lat: f64, lon: f64, elev: f64) -> Location {
        let lookup = self.table.registry.get_or_create(id, lat, lon, elev);
        let stored = match self.table.registry.get(lookup.index()) {
            Some(location) => *location,
            None => Location::new(id, lat, lon, elev),
        };

        if let (Lookup::Existing(_), Some(id)) = (lookup, id) {
            let agrees = stored.matches(
                lat,
                lon,
                elev,
                self.config.lat_lon_tolerance,
                self.config.elev_tolerance,
            );
            if !agrees && !self.conflict_reported {
                self.warnings.push(LoadWarning::ConflictingLocationMetadata {
                    id,
                    found: (lat, lon, elev),
                    kept: (stored.lat(), stored.lon(), stored.elev()),
                });
                self.conflict_reported = true;
            }
        }
        stored
    }
}
