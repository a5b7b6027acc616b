//! Loader configuration.
//!
//! Defines the missing-value sentinel and the tolerances used when checking
//! that rows sharing a location id agree on its coordinates.

use serde::{Deserialize, Serialize};
use std::env;

use verif_common::MISSING_VALUE;

/// Default tolerance (degrees) for latitude/longitude comparisons.
pub const DEFAULT_LAT_LON_TOLERANCE: f64 = 0.0001;

/// Default tolerance (meters) for elevation comparisons.
pub const DEFAULT_ELEV_TOLERANCE: f64 = 0.001;

/// Settings shared by all decoders.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadConfig {
    /// Numeric sentinel meaning "missing"; read as NaN
    pub missing_value: f64,

    /// Maximum lat/lon difference before a location conflict is reported
    pub lat_lon_tolerance: f64,

    /// Maximum elevation difference before a location conflict is reported
    pub elev_tolerance: f64,
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            missing_value: MISSING_VALUE,
            lat_lon_tolerance: DEFAULT_LAT_LON_TOLERANCE,
            elev_tolerance: DEFAULT_ELEV_TOLERANCE,
        }
    }
}

impl LoadConfig {
    /// Load configuration from environment variables.
    ///
    /// Unset or unparsable variables fall back to the defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            missing_value: env_f64("VERIF_MISSING_VALUE").unwrap_or(defaults.missing_value),
            lat_lon_tolerance: env_f64("VERIF_LAT_LON_TOLERANCE")
                .unwrap_or(defaults.lat_lon_tolerance),
            elev_tolerance: env_f64("VERIF_ELEV_TOLERANCE").unwrap_or(defaults.elev_tolerance),
        }
    }
}

fn env_f64(name: &str) -> Option<f64> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = LoadConfig::default();
        assert_eq!(config.missing_value, -999.0);
        assert_eq!(config.lat_lon_tolerance, 0.0001);
        assert_eq!(config.elev_tolerance, 0.001);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config: LoadConfig = serde_yaml::from_str("elev_tolerance: 0.5\n").unwrap();
        assert_eq!(config.elev_tolerance, 0.5);
        assert_eq!(config.missing_value, -999.0);
    }
}
