//! verif CF NetCDF layout.
//!
//! Self-describing files tagged with the global attribute
//! `Conventions = "verif_1.0.0"`. Coordinates and values are stored in their
//! canonical shapes, so loading is a straight read:
//!
//! | variable     | shape                         |
//! |--------------|-------------------------------|
//! | `date`       | `[date]`                      |
//! | `offset`     | `[offset]`                    |
//! | `id`, `lat`, `lon`, `elev` | `[location]`    |
//! | `thresholds` | `[threshold]` (optional)      |
//! | `quantiles`  | `[quantile]` (optional)       |
//! | `obs`, `fcst`| `[date, offset, location]`    |
//! | `ens`        | `[date, offset, location, member]` (optional) |
//! | `cdf`        | `[date, offset, location, threshold]` (optional) |
//! | `x`          | `[date, offset, location, quantile]` (optional) |

use std::path::Path;

use ndarray::Array4;
use tracing::debug;
use verif_common::Variable;

use crate::config::LoadConfig;
use crate::dispatch::{Decoder, Format, InputSource};
use crate::error::InputResult;
use crate::input::{Input, InputParts};
use crate::nc;

pub const CONVENTION_ATTRIBUTE: &str = "Conventions";
pub const CONVENTION: &str = "verif_1.0.0";

/// Decoder for verif CF files.
#[derive(Debug, Clone, Copy, Default)]
pub struct NetcdfCf;

impl Decoder for NetcdfCf {
    fn format(&self) -> Format {
        Format::NetcdfCf
    }

    fn is_valid(&self, path: &Path) -> bool {
        nc::has_convention(path, CONVENTION_ATTRIBUTE, CONVENTION)
    }

    fn load(&self, source: &InputSource, config: &LoadConfig) -> InputResult<Input> {
        nc::silence_hdf5_errors();
        let file = netcdf::open(&source.path)?;

        let dates = nc::to_dates(&nc::read_coord(&file, "date", config)?)?;
        let offsets = nc::read_coord(&file, "offset", config)?;
        let locations = nc::to_locations(
            &nc::read_coord(&file, "id", config)?,
            &nc::read_coord(&file, "lat", config)?,
            &nc::read_coord(&file, "lon", config)?,
            &nc::read_coord(&file, "elev", config)?,
        )?;
        let thresholds = nc::read_optional_coord(&file, "thresholds", config)?;
        let quantiles = nc::read_optional_coord(&file, "quantiles", config)?;
        let dims = (dates.len(), offsets.len(), locations.len());
        debug!(
            dates = dims.0,
            offsets = dims.1,
            locations = dims.2,
            thresholds = thresholds.len(),
            quantiles = quantiles.len(),
            "Read verif CF coordinates"
        );

        let obs = nc::read_array3(&file, "obs", dims, config)?;
        let deterministic = nc::read_array3(&file, "fcst", dims, config)?;
        let ensemble = match file.variable("ens") {
            Some(_) => Some(nc::read_array4(&file, "ens", dims, None, config)?),
            None => None,
        };
        let threshold_scores = read_scores(&file, "cdf", dims, thresholds.len(), config)?;
        let quantile_scores = read_scores(&file, "x", dims, quantiles.len(), config)?;

        let name = nc::global_str(&file, "standard_name").unwrap_or_else(|| "Unknown".to_string());
        let units = nc::normalize_units(nc::global_str(&file, "Units").as_deref());

        Input::from_parts(InputParts {
            full_name: source.full_name.clone(),
            format: Format::NetcdfCf,
            variable: Variable::new(name, units),
            dates,
            offsets,
            locations,
            thresholds,
            quantiles,
            obs,
            deterministic,
            ensemble,
            threshold_scores,
            quantile_scores,
            pit: None,
            warnings: Vec::new(),
        })
    }
}

/// Read a threshold/quantile score array; absent means all missing.
fn read_scores(
    file: &netcdf::File,
    name: &str,
    dims: (usize, usize, usize),
    n: usize,
    config: &LoadConfig,
) -> InputResult<Array4<f64>> {
    match file.variable(name) {
        Some(_) => nc::read_array4(file, name, dims, Some(n), config),
        None => Ok(Array4::from_elem((dims.0, dims.1, dims.2, n), f64::NAN)),
    }
}
