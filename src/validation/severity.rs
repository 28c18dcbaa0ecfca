//! Severity Classification
//!
//! Maps a raw theme-check line to a severity by looking for marker tokens.

use serde::{Deserialize, Serialize};

/// Severity of a diagnostic message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
    /// No marker token matched
    Undefined,
}

/// Marker tokens in lookup order. `tc-required` has to come first.
pub const MARKERS: [(&str, Severity); 4] = [
    ("tc-required", Severity::Error),
    ("tc-warning", Severity::Warning),
    ("tc-info", Severity::Info),
    ("tc-recommended", Severity::Info),
];

/// Classify a diagnostic line.
///
/// A marker only counts when its first occurrence sits past the start of the
/// line, so a line that begins with the marker stays `Undefined`.
pub fn classify(line: &str) -> Severity {
    MARKERS
        .iter()
        .find(|(marker, _)| line.find(marker).is_some_and(|idx| idx > 0))
        .map(|(_, severity)| *severity)
        .unwrap_or(Severity::Undefined)
}
