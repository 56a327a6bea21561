//! Error types for ad-hoc pattern replacement.
//!
//! Follows the workspace convention: library crates use `thiserror` for explicit error enums.

use thiserror::Error;

/// Error types for ad-hoc find/replace.
///
/// Every variant renders with the `Regex Error: ` prefix so front ends that
/// show the message in place of output keep their existing text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PatternError {
    /// The find pattern failed to compile.
    #[error("Regex Error: {0}")]
    Pattern(String),

    /// The replacement template is malformed (bad escape or group reference).
    #[error("Regex Error: {0}")]
    Template(String),
}

impl From<regex::Error> for PatternError {
    fn from(err: regex::Error) -> Self {
        Self::Pattern(err.to_string())
    }
}
