//! Error types for chromarot-core
//!
//! Provides a unified error type for all operations in the core crate.
//! Every failure is local and synchronous: an operation either returns a
//! complete result or an error, never a partially written buffer.

use thiserror::Error;

/// chromarot core error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Plane or buffer with a zero dimension
    #[error("invalid plane dimensions: {width}x{height}")]
    InvalidPlane { width: u32, height: u32 },

    /// Planes of unequal size handed to a merge
    #[error("shape mismatch: expected {}x{}, got {}x{}", .expected.0, .expected.1, .actual.0, .actual.1)]
    ShapeMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },

    /// Channel count outside {1, 3, 4}
    #[error("unsupported channel count: {0}")]
    UnsupportedChannelCount(u32),

    /// Index out of bounds
    #[error("index out of bounds: {index} >= {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// Invalid parameter value
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Result type alias for chromarot core operations
pub type Result<T> = std::result::Result<T, Error>;
