//! # Error Types
//!
//! Structured error types for kcal_core. The calculation path has exactly one
//! failure mode, input validation, represented by [`CalcError::InvalidInput`]
//! and [`CalcError::MissingField`]. Both carry the user-facing message that a
//! front end shows before prompting again.
//!
//! Loading an [`EngineConfig`](crate::config::EngineConfig) from disk can fail
//! in other ways; those variants never occur while calculating.
//!
//! ## Example
//!
//! ```rust
//! use kcal_core::errors::{CalcError, CalcResult};
//!
//! fn check_age(age: u32) -> CalcResult<()> {
//!     if age < 10 {
//!         return Err(CalcError::invalid_input(
//!             "alter",
//!             age.to_string(),
//!             "Alter muss mindestens 10 Jahre betragen",
//!             "Bitte gültige Werte eingeben.",
//!         ));
//!     }
//!     Ok(())
//! }
//!
//! let err = check_age(9).unwrap_err();
//! assert!(err.is_validation());
//! assert_eq!(err.user_message(), "Bitte gültige Werte eingeben.");
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for kcal_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for calculation and configuration operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// A field value could not be parsed or is out of range
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
        /// Message for the person filling in the form
        message: String,
    },

    /// A required field is empty or absent
    #[error("Missing required field: {field}")]
    MissingField { field: String, message: String },

    /// An engine configuration value is unusable
    #[error("Invalid configuration '{field}': {reason}")]
    InvalidConfig { field: String, reason: String },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
            message: message.into(),
        }
    }

    /// Create a MissingField error
    pub fn missing_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        CalcError::MissingField {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create an InvalidConfig error
    pub fn invalid_config(field: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidConfig {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// True for the input validation kind; the caller should re-prompt.
    pub fn is_validation(&self) -> bool {
        matches!(self, CalcError::InvalidInput { .. } | CalcError::MissingField { .. })
    }

    /// The name of the offending input field, if any
    pub fn field(&self) -> Option<&str> {
        match self {
            CalcError::InvalidInput { field, .. }
            | CalcError::MissingField { field, .. }
            | CalcError::InvalidConfig { field, .. } => Some(field),
            _ => None,
        }
    }

    /// Message suitable for showing to the person using the calculator.
    ///
    /// Validation errors return their form message; everything else falls
    /// back to the `Display` text.
    pub fn user_message(&self) -> String {
        match self {
            CalcError::InvalidInput { message, .. } | CalcError::MissingField { message, .. } => {
                message.clone()
            }
            other => other.to_string(),
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::MissingField { .. } => "MISSING_FIELD",
            CalcError::InvalidConfig { .. } => "INVALID_CONFIG",
            CalcError::FileError { .. } => "FILE_ERROR",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
        }
    }
}

impl From<serde_json::Error> for CalcError {
    fn from(err: serde_json::Error) -> Self {
        CalcError::SerializationError {
            reason: err.to_string(),
        }
    }
}
