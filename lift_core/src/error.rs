//! Error types for the lift_core library.

use std::fmt;
use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Kind of record an identifier failed to resolve to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecordKind {
    Exercise,
    Workout,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordKind::Exercise => f.write_str("exercise"),
            RecordKind::Workout => f.write_str("workout"),
        }
    }
}

/// Core error type for lift_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Malformed or missing required input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Identifier does not resolve to an existing record
    #[error("{kind} {id} not found")]
    NotFound { kind: RecordKind, id: u64 },

    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    pub(crate) fn validation(msg: impl Into<String>) -> Self {
        Error::Validation(msg.into())
    }

    pub(crate) fn exercise_not_found(id: impl Into<u64>) -> Self {
        Error::NotFound {
            kind: RecordKind::Exercise,
            id: id.into(),
        }
    }

    pub(crate) fn workout_not_found(id: impl Into<u64>) -> Self {
        Error::NotFound {
            kind: RecordKind::Workout,
            id: id.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation(_))
    }
}
