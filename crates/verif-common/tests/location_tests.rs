//! Tests for Location and Variable records.

use verif_common::{Location, Variable};

// ============================================================================
// Location tests
// ============================================================================

#[test]
fn test_location_new() {
    let loc = Location::new(Some(214), 49.2, -122.1, 92.0);
    assert_eq!(loc.id(), Some(214));
    assert_eq!(loc.lat(), 49.2);
    assert_eq!(loc.lon(), -122.1);
    assert_eq!(loc.elev(), 92.0);
}

#[test]
fn test_location_unassigned() {
    let loc = Location::new(None, 50.3, -120.3, 150.0);
    assert_eq!(loc.id(), None);
    assert_eq!(loc.to_string(), "? (50.3, -120.3, 150)");
}

#[test]
fn test_location_id_is_immutable_once_set() {
    let mut loc = Location::new(Some(180), 50.3, -120.3, 150.0);
    assert!(!loc.assign_id(0));
    assert_eq!(loc.id(), Some(180));
}

#[test]
fn test_location_serializes_missing_id_as_null() {
    let loc = Location::new(None, 1.0, 2.0, 3.0);
    let json = serde_json::to_value(loc).unwrap();
    assert!(json["id"].is_null());
    assert_eq!(json["lat"], 1.0);
}

// ============================================================================
// Variable tests
// ============================================================================

#[test]
fn test_variable_display() {
    let var = Variable::new("Temperature", "$^oC$");
    assert_eq!(var.to_string(), "Temperature [$^oC$]");
}
