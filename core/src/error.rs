//! Error types for schema walking.

use thiserror::Error;

use crate::validate::SchemaError;

/// Why a value has no display form.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DisplayError {
    /// Value of an external type with no textual representation.
    #[error("value of type {0} has no display form")]
    Opaque(String),
    /// NaN or infinite float.
    #[error("non-finite number {0}")]
    NonFinite(f64),
}

/// Errors that abort a walk.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DocError {
    /// Malformed field metadata or schema references.
    #[error("invalid schema: {0}")]
    Schema(#[from] SchemaError),

    /// A default or example value cannot be shown as text.
    #[error("cannot convert value of field '{field}': {source}")]
    ValueConversion {
        /// Resolved environment variable name of the field.
        field: String,
        /// Underlying display failure.
        #[source]
        source: DisplayError,
    },
}

/// Convenience alias for results with [`DocError`].
pub type Result<T> = std::result::Result<T, DocError>;
