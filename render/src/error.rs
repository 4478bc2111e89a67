//! Error types for rendering and serializing rows.

use thiserror::Error;

/// Errors that can occur while writing rows.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Writing to the sink failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization failure.
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML serialization failure.
    #[error("YAML serialization failed: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Rendered output was not valid UTF-8.
    #[error("rendered output is not UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Convenience alias for results with [`RenderError`].
pub type Result<T> = std::result::Result<T, RenderError>;
