//! Tests for format detection.

use std::path::PathBuf;

use test_utils::{fixtures, CompsFile, TempWorkspace};
use verif_input::{detect_format, detect_format_in, get_input, Format, InputError, InputSource};

// ============================================================================
// Detection order
// ============================================================================

#[test]
fn test_text_file_detected_as_text() {
    let ws = TempWorkspace::new();
    let path = ws.write("obs.txt", fixtures::THREE_ROWS);
    assert_eq!(detect_format(&path).unwrap(), Format::Text);
}

#[test]
fn test_restricted_candidates() {
    let ws = TempWorkspace::new();
    let text = ws.write("obs.txt", fixtures::THREE_ROWS);
    let comps = ws.path("comps.nc");
    CompsFile::small().write(&comps).unwrap();

    assert!(matches!(
        detect_format_in(&text, &[Format::NetcdfCf, Format::Comps]),
        Err(InputError::UnrecognizedFormat(_))
    ));
    assert_eq!(detect_format_in(&comps, &[Format::NetcdfCf, Format::Comps]).unwrap(), Format::Comps);
    assert_eq!(detect_format_in(&comps, &[Format::Text]).unwrap(), Format::Text);
}

#[test]
fn test_no_candidates() {
    let ws = TempWorkspace::new();
    let path = ws.write("obs.txt", fixtures::THREE_ROWS);
    let err = detect_format_in(&path, &[]).unwrap_err();
    assert!(matches!(err, InputError::UnrecognizedFormat(_)));
    assert!(err.to_string().contains("not a valid input file"));
}

// ============================================================================
// Missing files
// ============================================================================

#[test]
fn test_missing_file() {
    let ws = TempWorkspace::new();
    let path = ws.path("nothing_here.nc");
    match get_input(path.to_str().unwrap()) {
        Err(InputError::FileNotFound(p)) => assert_eq!(p, path),
        other => panic!("expected FileNotFound, got {:?}", other.map(|i| i.full_name().to_string())),
    }
}

#[test]
fn test_missing_file_even_without_candidates() {
    let err = detect_format_in(&PathBuf::from("/no/such/dir/a.txt"), &[]).unwrap_err();
    assert!(matches!(err, InputError::FileNotFound(_)));
}

// ============================================================================
// Sources
// ============================================================================

#[test]
fn test_source_keeps_given_name() {
    let source = InputSource::new("relative/path.txt");
    assert_eq!(source.full_name, "relative/path.txt");
    assert_eq!(source.path, PathBuf::from("relative/path.txt"));
}

#[test]
fn test_format_names() {
    let names: Vec<&str> = Format::PRIORITY.iter().map(|f| f.name()).collect();
    assert_eq!(names, vec!["netcdf", "comps", "text"]);
    assert_eq!(Format::Comps.to_string(), "comps");
}
