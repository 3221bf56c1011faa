//! Validation Error Types

use thiserror::Error;

/// Errors during input validation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Required field left at its default or not positive
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// Negative, fractional where a count is expected, or non-finite
    #[error("{field} has invalid value {value}")]
    InvalidValue { field: &'static str, value: f64 },

    /// Selection outside the set of valid values
    #[error("{field} value {value:?} is not a valid selection")]
    UnknownSelection { field: &'static str, value: String },
}
