//! Error types for the test framework

use thiserror::Error;

/// Errors that can occur during regression testing
#[derive(Debug, Error)]
pub enum TestError {
    /// Failed to build a synthetic fixture
    #[error("failed to build fixture '{name}': {message}")]
    Fixture { name: String, message: String },

    /// One or more comparisons failed
    #[error("{test_name}_reg failed with {count} failure(s)")]
    RegressionFailed { test_name: String, count: usize },
}

/// Result type for test operations
pub type TestResult<T> = Result<T, TestError>;
