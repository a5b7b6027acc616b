//! Text inputs covering common loading scenarios.

/// Two locations, two offsets, one threshold column.
///
/// Location 214 has rows at offsets 0 and 1, location 180 only at offset 0,
/// so `[0, 1, loc180]` has no data.
pub const THREE_ROWS: &str = "\
date offset id lat lon elev obs fcst p10
20150101 0 214 49.2 -122.1 92 3.4 2.1 0.91
20150101 1 214 49.2 -122.1 92 4.7 4.2 0.85
20150101 0 180 50.3 -120.3 150 0.2 -1.2 0.99
";

/// Metadata comments ahead of the header, plus quantile and pit columns.
pub const WITH_METADATA: &str = "\
# variable: Precip
# units: mm
date offset id lat lon elev obs fcst q0.1 q0.9 pit
20120101 0 1 60 10 100 1.2 0.8 0.1 2.5 0.41
20120101 0 2 61 11 200 -999 0.0 0.0 0.9 -999
20120102 12 1 60 10 100 0.0 0.1 0.0 0.4 0.52
";

/// No id column; locations are told apart by coordinates.
pub const WITHOUT_IDS: &str = "\
offset lat lon elev obs fcst
0 60 10 100 1 2
0 61 11 200 3 4
6 60 10 100 5 6
";

/// Location 7 appears twice with different coordinates, then a third time
/// with yet another set.
pub const CONFLICTING_LOCATIONS: &str = "\
date offset id lat lon elev obs fcst
20150101 0 7 60 10 100 1 1
20150101 6 7 61 10 100 2 2
20150101 12 7 62 10 100 3 3
";

/// A mix of rows with and without ids.
pub const MIXED_IDS: &str = "\
offset id lat lon elev obs fcst
0 5 60 10 100 1 1
0 -999 61 11 200 2 2
0 3 62 12 300 3 3
0 -999 63 13 400 4 4
";

/// The third line has one field too few.
pub const SHORT_ROW: &str = "\
date offset obs fcst
20150101 0 1 2
20150101 6 1
";

/// Header without `fcst`.
pub const MISSING_FCST: &str = "\
date offset id obs
20150101 0 1 2
";
