//! chromarot-test - Regression test framework for chromarot
//!
//! This crate provides a small regression harness and synthetic fixtures.
//! Two modes are supported:
//!
//! - **Compare**: Record and report every failed comparison (default)
//! - **Display**: Same checks, plus verbose per-comparison output
//!
//! # Usage
//!
//! ```ignore
//! use chromarot_test::{RegParams, gradient_rgb};
//!
//! let mut rp = RegParams::new("rotate");
//! let pix = gradient_rgb(10, 10).unwrap();
//! rp.compare_values(10.0, pix.width() as f64, 0.0);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: Set to "compare" or "display"

mod error;
mod fixtures;
mod params;

pub use error::{TestError, TestResult};
pub use fixtures::{checker_plane, gradient_rgb, gradient_rgba, indexed_stripes, solid_rgb};
pub use params::{RegParams, RegTestMode};
