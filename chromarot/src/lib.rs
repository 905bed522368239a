//! chromarot - Per-channel image rotation
//!
//! Rotates the color channels of a raster image independently, re-aligns
//! the results on a common canvas, and reports per-channel histograms of
//! the image before and after.
//!
//! # Overview
//!
//! - Channel splitting and merging
//! - Expand-to-fit rotation with bicubic resampling
//! - Canvas reconciliation of differently sized planes
//! - Normalized per-channel histograms
//!
//! Decoding, encoding and drawing histograms are left to the caller.
//!
//! # Example
//!
//! ```
//! use chromarot::transform::{RotationRequest, transform};
//! use chromarot::{ChannelLayout, HistogramOptions, PixelBuffer, compute_histograms};
//!
//! let buf = PixelBuffer::new(10, 10, ChannelLayout::Rgb).unwrap();
//! let out = transform(buf, &RotationRequest::new(0.0).red(45.0)).unwrap();
//! assert_eq!(out.dimensions(), (15, 15));
//!
//! let hists = compute_histograms(&out, &HistogramOptions::default()).unwrap();
//! assert_eq!(hists.len(), 3);
//! ```

// Re-export core types (primary data structures used everywhere)
pub use chromarot_core::*;

// Re-export the transform crate as a module to avoid name conflicts
pub use chromarot_transform as transform;
