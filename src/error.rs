//! Error types for the fallible surface of the crate.
//!
//! The simulation itself never returns errors: broken contracts panic and
//! degenerate geometry is a defined non-hit. Only loading a [`Tuning`]
//! document from outside can fail.
//!
//! [`Tuning`]: crate::Tuning

use std::fmt;

/// Failure while loading or validating a tuning document
#[derive(Debug)]
pub enum TuningError {
    /// The tuning file could not be read
    Io(std::io::Error),
    /// The document is not valid tuning JSON
    Parse(serde_json::Error),
    /// A value is outside the range the simulation can run with
    Invalid {
        /// Field name as it appears in the document
        name: &'static str,
        /// The rejected value
        value: f32,
        /// Human-readable description of the accepted range
        expected: &'static str,
    },
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TuningError::Io(e) => write!(f, "failed to read tuning file: {}", e),
            TuningError::Parse(e) => write!(f, "failed to parse tuning: {}", e),
            TuningError::Invalid {
                name,
                value,
                expected,
            } => write!(
                f,
                "tuning value '{}' = {} is outside accepted range {}",
                name, value, expected
            ),
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TuningError::Io(e) => Some(e),
            TuningError::Parse(e) => Some(e),
            TuningError::Invalid { .. } => None,
        }
    }
}

impl From<std::io::Error> for TuningError {
    fn from(e: std::io::Error) -> Self {
        TuningError::Io(e)
    }
}

impl From<serde_json::Error> for TuningError {
    fn from(e: serde_json::Error) -> Self {
        TuningError::Parse(e)
    }
}
