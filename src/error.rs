//! Error types for hotswap-handler.
//!
//! Dispatch never produces errors of its own: whatever the current handler
//! returns is handed back untouched. The types here only cover the optional
//! validation step in front of a swap.

use std::fmt;

/// Result type alias for hotswap-handler operations.
pub type Result<T> = std::result::Result<T, SwapError>;

/// Errors that can occur when swapping a handler.
#[derive(Debug, thiserror::Error)]
pub enum SwapError {
    /// The replacement handler failed validation and was not installed.
    #[error("Handler rejected for cell '{cell}': {source}")]
    Rejected {
        /// Name of the cell that refused the handler
        cell: String,
        /// Why the handler was refused
        #[source]
        source: ValidationError,
    },
}

/// Validation error reported by a handler's `validate` implementation.
#[derive(Debug)]
pub enum ValidationError {
    /// Custom validation error with a message.
    Custom(String),

    /// A specific part of the handler is misconfigured.
    InvalidField {
        /// The field name/path
        field: String,
        /// The reason why it's invalid
        reason: String,
    },

    /// Multiple validation errors occurred.
    Multiple(Vec<ValidationError>),
}

impl ValidationError {
    /// Create a custom validation error.
    pub fn custom(msg: impl Into<String>) -> Self {
        Self::Custom(msg.into())
    }

    /// Create an invalid field error.
    pub fn invalid_field(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidField {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Custom(msg) => write!(f, "{}", msg),
            Self::InvalidField { field, reason } => {
                write!(f, "Field '{}' is invalid: {}", field, reason)
            }
            Self::Multiple(errors) => {
                writeln!(f, "Multiple validation errors:")?;
                for (i, err) in errors.iter().enumerate() {
                    writeln!(f, "  {}. {}", i + 1, err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ValidationError {}

impl SwapError {
    /// The validation error behind a rejection.
    pub fn validation(&self) -> &ValidationError {
        match self {
            Self::Rejected { source, .. } => source,
        }
    }
}
