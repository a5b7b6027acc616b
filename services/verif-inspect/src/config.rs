//! Load settings for the inspector.

use anyhow::{Context, Result};
use std::fs;

use verif_input::LoadConfig;

/// Settings from a YAML file when one is given, otherwise from the
/// environment.
pub fn resolve(path: Option<&str>) -> Result<LoadConfig> {
    match path {
        Some(path) => from_yaml(path),
        None => Ok(LoadConfig::from_env()),
    }
}

/// Parse a YAML settings file. Keys left out keep their defaults.
pub fn from_yaml(path: &str) -> Result<LoadConfig> {
    let expanded = shellexpand::tilde(path);
    let content = fs::read_to_string(expanded.as_ref())
        .with_context(|| format!("Failed to read config file: {}", path))?;
    serde_yaml::from_str(&content).with_context(|| format!("Failed to parse config file: {}", path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::TempWorkspace;

    #[test]
    fn test_from_yaml() {
        let ws = TempWorkspace::new();
        let path = ws.write("load.yaml", "missing_value: -9999\nelev_tolerance: 2.5\n");
        let config = from_yaml(path.to_str().unwrap()).unwrap();
        assert_eq!(config.missing_value, -9999.0);
        assert_eq!(config.elev_tolerance, 2.5);
        assert_eq!(config.lat_lon_tolerance, LoadConfig::default().lat_lon_tolerance);
    }

    #[test]
    fn test_from_yaml_missing_file() {
        let err = from_yaml("/no/such/load.yaml").unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_from_yaml_bad_value() {
        let ws = TempWorkspace::new();
        let path = ws.write("load.yaml", "missing_value: lots\n");
        assert!(from_yaml(path.to_str().unwrap()).is_err());
    }
}
