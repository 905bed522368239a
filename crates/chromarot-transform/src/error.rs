//! Error types for chromarot-transform

use thiserror::Error;

/// Errors that can occur during rotation and compositing
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TransformError {
    /// Core library error (`InvalidPlane`, `ShapeMismatch`, `UnsupportedChannelCount`, ...)
    #[error("core error: {0}")]
    Core(#[from] chromarot_core::Error),

    /// Invalid transformation parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
}

/// Result type for transform operations
pub type TransformResult<T> = Result<T, TransformError>;
