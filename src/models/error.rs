//! Validation error types for Farmstead models
//!
//! This module defines error types specifically for payload validation,
//! separate from the general application errors.

use std::fmt;
use thiserror::Error;

/// Main validation error type
#[derive(Error, Debug, Clone)]
pub struct ValidationError {
    /// The kind of validation error
    pub kind: ValidationErrorKind,
    /// The field that failed validation
    pub field: String,
    /// Optional additional context
    pub context: Option<String>,
}

impl ValidationError {
    /// Create a new validation error
    pub fn new(kind: ValidationErrorKind, field: impl Into<String>) -> Self {
        Self {
            kind,
            field: field.into(),
            context: None,
        }
    }

    /// Create a validation error with additional context
    pub fn with_context(
        kind: ValidationErrorKind,
        field: impl Into<String>,
        context: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            field: field.into(),
            context: Some(context.into()),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.context {
            Some(ctx) => write!(
                f,
                "Validation failed for field '{}': {} - {}",
                self.field, self.kind, ctx
            ),
            None => write!(
                f,
                "Validation failed for field '{}': {}",
                self.field, self.kind
            ),
        }
    }
}

/// Specific validation error types
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Field is required but missing
    #[error("Required field is missing")]
    RequiredField,

    /// Value is not a number and cannot be parsed as one
    #[error("Value is not a valid number")]
    InvalidNumber,

    /// Value must be a string
    #[error("Value must be a string")]
    InvalidString,

    /// Value must not be negative
    #[error("Value must be non-negative")]
    NegativeValue,

    /// Field value is too short
    #[error("Value is below minimum length")]
    TooShort { min: usize },

    /// Custom validation error
    #[error("{0}")]
    Custom(String),
}

/// Result type alias for validation operations
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Convert validation errors to application errors
impl From<ValidationError> for crate::error::Error {
    fn from(err: ValidationError) -> Self {
        crate::error::Error::validation(err.to_string())
    }
}
