//! Observation location records.

use serde::{Deserialize, Serialize};

/// A single observation location.
///
/// The identifier may be unassigned while a file is being parsed. Once an
/// identifier is set it cannot be replaced.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    id: Option<i64>,
    lat: f64,
    lon: f64,
    elev: f64,
}

impl Location {
    /// Create a location from an optional identifier and its coordinates.
    pub fn new(id: Option<i64>, lat: f64, lon: f64, elev: f64) -> Self {
        Self { id, lat, lon, elev }
    }

    pub fn id(&self) -> Option<i64> {
        self.id
    }

    /// Latitude in degrees
    pub fn lat(&self) -> f64 {
        self.lat
    }

    /// Longitude in degrees
    pub fn lon(&self) -> f64 {
        self.lon
    }

    /// Elevation in meters
    pub fn elev(&self) -> f64 {
        self.elev
    }

    /// Set the identifier of a location that does not have one yet.
    ///
    /// Returns `false` and leaves the location untouched when an identifier
    /// was already assigned.
    pub fn assign_id(&mut self, id: i64) -> bool {
        if self.id.is_some() {
            return false;
        }
        self.id = Some(id);
        true
    }

    /// Whether `(lat, lon, elev)` lies within the given tolerances of this
    /// location. NaN components are not compared.
    pub fn matches(&self, lat: f64, lon: f64, elev: f64, lat_lon_tol: f64, elev_tol: f64) -> bool {
        let within = |value: f64, reference: f64, tol: f64| {
            value.is_nan() || (value - reference).abs() <= tol
        };
        within(lat, self.lat, lat_lon_tol)
            && within(lon, self.lon, lat_lon_tol)
            && within(elev, self.elev, elev_tol)
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.id {
            Some(id) => write!(f, "{} ({}, {}, {})", id, self.lat, self.lon, self.elev),
            None => write!(f, "? ({}, {}, {})", self.lat, self.lon, self.elev),
        }
    }
}
