//! Core error types for musicshop-core.
//!
//! Uses `thiserror` for structured, matchable variants covering every way an
//! incoming draft can fail validation.

use thiserror::Error;

/// Validation errors produced while turning drafts into typed fields.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoreError {
    /// A required field was absent, null, or blank.
    #[error("missing required field: '{field}'")]
    MissingField { field: &'static str },

    /// A numeric field could not be parsed as a finite number.
    #[error("field '{field}' is not a number: '{value}'")]
    InvalidNumber { field: &'static str, value: String },

    /// A foreign-key field was neither an integer, a numeric string, nor empty.
    #[error("field '{field}' is not a valid id: '{value}'")]
    InvalidReference { field: &'static str, value: String },
}
