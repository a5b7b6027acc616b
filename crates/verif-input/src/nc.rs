//! NetCDF reading helpers shared by the verif CF and COMPS decoders.
//!
//! Both layouts store coordinates as 1-D variables and values as
//! `[date, offset, location, ...]` arrays. Everything read here is cleaned:
//! the variable's `_FillValue` and the configured missing sentinel become NaN.

use std::path::Path;
use std::sync::Once;

use ndarray::{Array3, Array4};
use tracing::debug;
use verif_common::{as_integer, clean_slice, Location};

use crate::config::LoadConfig;
use crate::error::{InputError, InputResult};

/// Silence HDF5's automatic error printing to stderr.
///
/// Probing a text file with the NetCDF library makes HDF5 print a page of
/// diagnostics even though the failure is expected and handled:
///
/// ```text
/// HDF5-DIAG: Error detected in HDF5 (1.10.8) thread 0:
///   #000: H5F.c line 620 in H5Fopen(): unable to open file
/// ```
///
/// Only needs to run once per process; safe to call repeatedly.
pub fn silence_hdf5_errors() {
    static INIT: Once = Once::new();

    INIT.call_once(|| {
        // SAFETY: H5Eset_auto2 is thread-safe and null handlers are the
        // documented way to disable automatic error printing.
        unsafe {
            hdf5_metno_sys::h5e::H5Eset_auto2(
                hdf5_metno_sys::h5e::H5E_DEFAULT,
                None,
                std::ptr::null_mut(),
            );
        }
    });
}

/// Whether `path` is a NetCDF file whose global attribute `attr` equals
/// `expected`. Any failure to open or read counts as "no".
///
/// The file handle is dropped before returning on every path.
pub(crate) fn has_convention(path: &Path, attr: &str, expected: &str) -> bool {
    silence_hdf5_errors();

    let file = match netcdf::open(path) {
        Ok(file) => file,
        Err(e) => {
            debug!(path = %path.display(), error = %e, "Not a NetCDF file");
            return false;
        }
    };
    let matches = global_str(&file, attr).as_deref() == Some(expected);
    debug!(
        path = %path.display(),
        attribute = attr,
        matches = matches,
        "Checked NetCDF convention"
    );
    matches
}

/// Read a global string attribute.
pub(crate) fn global_str(file: &netcdf::File, name: &str) -> Option<String> {
    if !file.attributes().any(|attr| attr.name() == name) {
        return None;
    }
    match file.attribute(name)?.value().ok()? {
        netcdf::AttributeValue::Str(s) => Some(s),
        netcdf::AttributeValue::Strs(strs) => strs.into_iter().next(),
        _ => None,
    }
}

/// Units label shown for a stored units attribute.
///
/// Empty or absent units read as "No units", a percent sign is kept as is,
/// anything else is wrapped in `$...$` for math rendering.
pub(crate) fn normalize_units(units: Option<&str>) -> String {
    match units {
        None | Some("") => "No units".to_string(),
        Some("%") => "%".to_string(),
        Some(units) => format!("${}$", units),
    }
}

/// Read a whole variable as cleaned `f64` values together with its shape.
pub(crate) fn read_values(
    file: &netcdf::File,
    name: &str,
    config: &LoadConfig,
) -> InputResult<(Vec<f64>, Vec<usize>)> {
    let var = file
        .variable(name)
        .ok_or_else(|| InputError::MissingData(format!("{} variable", name)))?;
    let shape: Vec<usize> = var.dimensions().iter().map(|d| d.len()).collect();
    let mut values: Vec<f64> = var.get_values(..)?;
    clean_slice(&mut values, config.missing_value, get_f64_attr(&var, "_FillValue"));
    Ok((values, shape))
}

/// Read a 1-D coordinate variable.
pub(crate) fn read_coord(file: &netcdf::File, name: &str, config: &LoadConfig) -> InputResult<Vec<f64>> {
    let (values, shape) = read_values(file, name, config)?;
    if shape.len() != 1 {
        return Err(InputError::InvalidFormat(format!(
            "{} should be 1-D, has shape {:?}",
            name, shape
        )));
    }
    Ok(values)
}

/// Read an optional 1-D coordinate variable; absent means empty.
pub(crate) fn read_optional_coord(
    file: &netcdf::File,
    name: &str,
    config: &LoadConfig,
) -> InputResult<Vec<f64>> {
    if file.variable(name).is_none() {
        return Ok(Vec::new());
    }
    read_coord(file, name, config)
}

/// Read a `[date, offset, location]` array.
pub(crate) fn read_array3(
    file: &netcdf::File,
    name: &str,
    dims: (usize, usize, usize),
    config: &LoadConfig,
) -> InputResult<Array3<f64>> {
    let (values, shape) = read_values(file, name, config)?;
    if shape != [dims.0, dims.1, dims.2] {
        return Err(InputError::InvalidFormat(format!(
            "{} has shape {:?}, expected {:?}",
            name, shape, [dims.0, dims.1, dims.2]
        )));
    }
    Array3::from_shape_vec(dims, values).map_err(|e| InputError::InvalidFormat(format!("{}: {}", name, e)))
}

/// Read a `[date, offset, location, n]` array. With `trailing` set, the last
/// axis must have that length; otherwise any length is accepted.
pub(crate) fn read_array4(
    file: &netcdf::File,
    name: &str,
    dims: (usize, usize, usize),
    trailing: Option<usize>,
    config: &LoadConfig,
) -> InputResult<Array4<f64>> {
    let (values, shape) = read_values(file, name, config)?;
    let ok = shape.len() == 4
        && shape[..3] == [dims.0, dims.1, dims.2]
        && trailing.map_or(true, |n| shape[3] == n);
    if !ok {
        return Err(InputError::InvalidFormat(format!(
            "{} has shape {:?}, expected [{}, {}, {}, {}]",
            name,
            shape,
            dims.0,
            dims.1,
            dims.2,
            trailing.map_or("*".to_string(), |n| n.to_string())
        )));
    }
    Array4::from_shape_vec((dims.0, dims.1, dims.2, shape[3]), values)
        .map_err(|e| InputError::InvalidFormat(format!("{}: {}", name, e)))
}

/// Convert stored dates (floats in the file) into `YYYYMMDD` integers.
pub(crate) fn to_dates(values: &[f64]) -> InputResult<Vec<i64>> {
    values
        .iter()
        .map(|&v| {
            as_integer(v).ok_or_else(|| InputError::InvalidFormat(format!("invalid date value {}", v)))
        })
        .collect()
}

/// Zip the parallel id/lat/lon/elev arrays into locations. Missing ids stay
/// unassigned.
pub(crate) fn to_locations(
    ids: &[f64],
    lats: &[f64],
    lons: &[f64],
    elevs: &[f64],
) -> InputResult<Vec<Location>> {
    let n = lats.len();
    if ids.len() != n || lons.len() != n || elevs.len() != n {
        return Err(InputError::InvalidFormat(format!(
            "location arrays differ in length (id {}, lat {}, lon {}, elev {})",
            ids.len(),
            n,
            lons.len(),
            elevs.len()
        )));
    }
    (0..n)
        .map(|i| {
            let id = if ids[i].is_nan() {
                None
            } else {
                Some(as_integer(ids[i]).ok_or_else(|| {
                    InputError::InvalidFormat(format!("invalid location id {}", ids[i]))
                })?)
            };
            Ok(Location::new(id, lats[i], lons[i], elevs[i]))
        })
        .collect()
}

/// Check if a variable has an attribute with the given name.
/// This avoids HDF5 error spam when checking for optional attributes.
fn has_attr(var: &netcdf::Variable, name: &str) -> bool {
    var.attributes().any(|attr| attr.name() == name)
}

/// Helper to get f64 attribute.
fn get_f64_attr(var: &netcdf::Variable, name: &str) -> Option<f64> {
    if !has_attr(var, name) {
        return None;
    }
    let attr_value = var.attribute_value(name)?.ok()?;
    f64::try_from(attr_value).ok()
}
