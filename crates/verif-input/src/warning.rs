//! Non-fatal findings recorded while loading a file.

use tracing::warn;

/// A data-quality issue that was recovered from during a load.
///
/// Every warning is logged when it is recorded and kept on the resulting
/// [`Input`](crate::Input).
#[derive(Debug, Clone, PartialEq)]
pub enum LoadWarning {
    /// A row repeated a location id with different coordinates. The
    /// coordinates first seen for the id are kept.
    ConflictingLocationMetadata {
        id: i64,
        found: (f64, f64, f64),
        kept: (f64, f64, f64),
    },

    /// A text row whose date is the missing sentinel. The row is skipped.
    MissingDate { line: usize },

    /// A comment line that is neither `variable:` nor `units:`.
    IgnoredMetadataLine { line: usize, content: String },

    /// A header column that does not map to any attribute.
    IgnoredColumn { name: String, reason: String },
}

impl std::fmt::Display for LoadWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadWarning::ConflictingLocationMetadata { id, found, kept } => write!(
                f,
                "Conflicting lat/lon/elev information for id {}: ({}, {}, {}) does not match ({}, {}, {})",
                id, found.0, found.1, found.2, kept.0, kept.1, kept.2
            ),
            LoadWarning::MissingDate { line } => {
                write!(f, "Skipping line {}: missing date", line)
            }
            LoadWarning::IgnoredMetadataLine { line, content } => {
                write!(f, "Ignoring line {} '{}'", line, content)
            }
            LoadWarning::IgnoredColumn { name, reason } => {
                write!(f, "Ignoring column '{}': {}", name, reason)
            }
        }
    }
}

/// Collects warnings for one load and logs each as it arrives.
#[derive(Debug, Default)]
pub(crate) struct WarningLog {
    file: String,
    warnings: Vec<LoadWarning>,
}

impl WarningLog {
    pub(crate) fn new(file: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            warnings: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, warning: LoadWarning) {
        warn!(file = %self.file, "{}", warning);
        self.warnings.push(warning);
    }

    pub(crate) fn into_inner(self) -> Vec<LoadWarning> {
        self.warnings
    }
}
