//! Format detection and the single entry point for loading a file.

use std::fmt;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::comps::Comps;
use crate::config::LoadConfig;
use crate::error::{InputError, InputResult};
use crate::input::Input;
use crate::netcdf_cf::NetcdfCf;
use crate::text::Text;

/// The on-disk layouts an [`Input`] can be loaded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    /// NetCDF tagged `Conventions = "verif_1.0.0"`
    NetcdfCf,
    /// Legacy COMPS NetCDF
    Comps,
    /// Whitespace-delimited text
    Text,
}

impl Format {
    /// Probe order. Text accepts anything, so it must come last.
    pub const PRIORITY: [Format; 3] = [Format::NetcdfCf, Format::Comps, Format::Text];

    pub fn name(self) -> &'static str {
        match self {
            Format::NetcdfCf => "netcdf",
            Format::Comps => "comps",
            Format::Text => "text",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Format::NetcdfCf => "verif CF NetCDF (Conventions = verif_1.0.0)",
            Format::Comps => "COMPS NetCDF with one variable per threshold/quantile",
            Format::Text => "Whitespace-delimited text with a header line",
        }
    }

    pub fn decoder(self) -> &'static dyn Decoder {
        match self {
            Format::NetcdfCf => &NetcdfCf,
            Format::Comps => &Comps,
            Format::Text => &Text,
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A file layout that can be recognized and loaded.
pub trait Decoder: Send + Sync {
    fn format(&self) -> Format;

    /// Cheap check whether `path` is in this layout. Never errors; anything
    /// unreadable is simply not valid.
    fn is_valid(&self, path: &Path) -> bool;

    /// Load the whole file into a snapshot.
    fn load(&self, source: &InputSource, config: &LoadConfig) -> InputResult<Input>;
}

/// A file to load: the name as the caller gave it and the expanded path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputSource {
    pub full_name: String,
    pub path: PathBuf,
}

impl InputSource {
    /// `~` at the start of `name` expands to the home directory.
    pub fn new(name: impl Into<String>) -> Self {
        let full_name = name.into();
        let path = PathBuf::from(shellexpand::tilde(&full_name).as_ref());
        Self { full_name, path }
    }
}

/// First format in [`Format::PRIORITY`] that accepts `path`.
pub fn detect_format(path: impl AsRef<Path>) -> InputResult<Format> {
    detect_format_in(path.as_ref(), &Format::PRIORITY)
}

/// First format in `candidates` that accepts `path`.
pub fn detect_format_in(path: &Path, candidates: &[Format]) -> InputResult<Format> {
    if !path.exists() {
        return Err(InputError::FileNotFound(path.to_path_buf()));
    }
    for &format in candidates {
        let accepted = format.decoder().is_valid(path);
        debug!(path = %path.display(), format = %format, accepted, "Probed input format");
        if accepted {
            return Ok(format);
        }
    }
    Err(InputError::UnrecognizedFormat(path.to_path_buf()))
}

/// Load `name` with the default configuration.
pub fn get_input(name: &str) -> InputResult<Input> {
    get_input_with_config(name, &LoadConfig::default())
}

/// Detect the format of `name` and load it.
pub fn get_input_with_config(name: &str, config: &LoadConfig) -> InputResult<Input> {
    let source = InputSource::new(name);
    let format = detect_format(&source.path)?;
    debug!(input = %source.full_name, format = %format, "Loading input");
    let input = format.decoder().load(&source, config)?;

    let (dates, offsets, locations) = input.obs().dim();
    info!(
        input = %source.full_name,
        format = %format,
        dates,
        offsets,
        locations,
        thresholds = input.thresholds().len(),
        quantiles = input.quantiles().len(),
        warnings = input.warnings().len(),
        "Loaded verification input"
    );
    Ok(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_ends_with_text() {
        assert_eq!(Format::PRIORITY.last(), Some(&Format::Text));
        for format in Format::PRIORITY {
            assert_eq!(format.decoder().format(), format);
        }
    }

    #[test]
    fn test_tilde_expansion_keeps_full_name() {
        let source = InputSource::new("~/data/a.txt");
        assert_eq!(source.full_name, "~/data/a.txt");
        if std::env::var_os("HOME").is_some() {
            assert!(!source.path.starts_with("~"));
        }

        let plain = InputSource::new("data/a.txt");
        assert_eq!(plain.path, PathBuf::from("data/a.txt"));
    }

    #[test]
    fn test_missing_file() {
        let result = detect_format("/nonexistent/verif/input.nc");
        assert!(matches!(result, Err(InputError::FileNotFound(_))));
    }
}
