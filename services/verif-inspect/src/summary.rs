//! Plain-text summary of a loaded input.

use std::fmt::{Display, Write};

use verif_input::Input;

/// Render `input` for the terminal, listing at most `preview` entries per
/// axis.
pub fn render(input: &Input, preview: usize) -> String {
    let mut out = String::new();
    let (dates, offsets, locations) = input.obs().dim();
    let missing = input.obs().iter().filter(|v| v.is_nan()).count();

    let _ = writeln!(out, "File:        {}", input.full_name());
    let _ = writeln!(out, "Format:      {}", input.format().description());
    let _ = writeln!(out, "Variable:    {}", input.variable());

    let calendar: Vec<String> = input
        .dates()
        .iter()
        .zip(input.calendar_dates())
        .map(|(raw, date)| date.map_or_else(|| raw.to_string(), |d| d.to_string()))
        .collect();
    let _ = writeln!(out, "Dates:       {} {}", dates, list(&calendar, preview));
    let _ = writeln!(out, "Offsets:     {} {}", offsets, list(input.offsets(), preview));
    let _ = writeln!(out, "Locations:   {} {}", locations, list(input.locations(), preview));
    let _ = writeln!(out, "Thresholds:  {}", list(input.thresholds(), preview));
    let _ = writeln!(out, "Quantiles:   {}", list(input.quantiles(), preview));
    if let Some(ens) = input.ensemble() {
        let _ = writeln!(out, "Members:     {}", ens.dim().3);
    }
    if input.pit().is_some() {
        let _ = writeln!(out, "PIT:         present");
    }
    let _ = writeln!(out, "Missing obs: {} of {}", missing, input.obs().len());

    if !input.warnings().is_empty() {
        let _ = writeln!(out, "Warnings:");
        for warning in input.warnings() {
            let _ = writeln!(out, "  - {}", warning);
        }
    }
    out
}

fn list<T: Display>(items: &[T], preview: usize) -> String {
    let mut shown: Vec<String> = items.iter().take(preview).map(|i| i.to_string()).collect();
    if items.len() > preview {
        shown.push(format!("... (+{})", items.len() - preview));
    }
    format!("[{}]", shown.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::{fixtures, TempWorkspace};
    use verif_input::get_input;

    #[test]
    fn test_list_truncates() {
        assert_eq!(list(&[1, 2, 3], 5), "[1, 2, 3]");
        assert_eq!(list(&[1, 2, 3], 2), "[1, 2, ... (+1)]");
        assert_eq!(list::<f64>(&[], 2), "[]");
    }

    #[test]
    fn test_render_text_input() {
        let ws = TempWorkspace::new();
        let path = ws.write("three.txt", fixtures::THREE_ROWS);
        let input = get_input(path.to_str().unwrap()).unwrap();
        let summary = render(&input, 5);

        assert!(summary.contains("Variable:    Unknown [Unknown units]"));
        assert!(summary.contains("Dates:       1 [2015-01-01]"));
        assert!(summary.contains("Offsets:     2 [0, 1]"));
        assert!(summary.contains("214 (49.2, -122.1, 92)"));
        assert!(summary.contains("Thresholds:  [10]"));
        assert!(summary.contains("Missing obs: 1 of 4"));
        assert!(!summary.contains("Warnings:"));
    }

    #[test]
    fn test_render_lists_warnings() {
        let ws = TempWorkspace::new();
        let path = ws.write("conflict.txt", fixtures::CONFLICTING_LOCATIONS);
        let input = get_input(path.to_str().unwrap()).unwrap();
        let summary = render(&input, 5);
        assert!(summary.contains("Warnings:\n  - Conflicting lat/lon/elev information for id 7"));
    }
}
