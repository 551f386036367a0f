//! Errors raised by flag registration and parsing.

use crate::value::ValueError;
use thiserror::Error;

/// Errors that can occur while registering flags or parsing arguments.
#[derive(Debug, Error)]
pub enum FlagError {
    /// A registration precondition failed, a flag was given a value that
    /// cannot be coerced, a required value is missing, or a positional
    /// index is out of range.
    #[error("flag invalid argument: {message}")]
    InvalidArgument {
        message: String,
        #[source]
        source: Option<ValueError>,
    },

    #[error("flag contains '=': {0}")]
    ContainsEquals(String),

    /// Reserved for structural failures of the argument vector.
    #[error("parse error: {0}")]
    Parse(String),
}

impl FlagError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        FlagError::InvalidArgument {
            message: message.into(),
            source: None,
        }
    }

    pub(crate) fn invalid_value(token: &str, source: ValueError) -> Self {
        FlagError::InvalidArgument {
            message: format!("{} {}", token, source),
            source: Some(source),
        }
    }

    /// Whether this error belongs to the invalid-argument category.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, FlagError::InvalidArgument { .. })
    }
}
