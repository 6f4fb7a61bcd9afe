//! Error types for the smartcab crate

use thiserror::Error;

use crate::types::Action;

/// Main error type for the smartcab crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("state {state} is not in the Q-table (ensure it before reading values)")]
    MissingState { state: String },

    #[error("action '{action}' is not a legal action for state {state}")]
    UnknownAction { action: Action, state: String },

    #[error("invalid action set: {reason}")]
    InvalidActionSet { reason: String },

    #[error("{name} must be a finite value in [0, 1], got {value}")]
    InvalidParameter { name: &'static str, value: f64 },

    #[error("{name} must be finite, got {value}")]
    NonFinite { name: &'static str, value: f64 },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("environment failure: {message}")]
    Environment { message: String },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("progress bar template error: {message}")]
    ProgressBarTemplate { message: String },
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            operation: "IO operation".to_string(),
            source,
        }
    }
}

/// Check that a learning parameter lies in the closed unit interval.
pub(crate) fn check_unit_interval(name: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(Error::InvalidParameter { name, value })
    }
}

/// Reject NaN and infinite rewards or estimates.
pub(crate) fn check_finite(name: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(Error::NonFinite { name, value })
    }
}
