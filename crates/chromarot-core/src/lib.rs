//! chromarot core - pixel buffers, channel planes and histograms
//!
//! This crate provides the data structures used throughout chromarot:
//!
//! - [`PixelBuffer`] - A raster image stored as one plane per channel
//! - [`Plane`] - A single-channel 8-bit matrix
//! - [`Palette`] - Color table for indexed buffers
//! - [`split`] / [`merge`] - Channel separation and recombination
//! - [`compute_histograms`] - Normalized per-channel intensity histograms

pub mod buffer;
pub mod channel;
pub mod convert;
pub mod error;
pub mod histogram;
pub mod palette;
pub mod plane;

pub use buffer::{Channel, ChannelLayout, PixelBuffer};
pub use channel::{ChannelPlanes, merge, merge_planes, split};
pub use convert::RemovePaletteTarget;
pub use error::{Error, Result};
pub use histogram::{
    DEFAULT_BINS, Histogram, HistogramComparison, HistogramOptions, HistogramRenderer,
    RenderError, compute_histograms, render_histograms,
};
pub use palette::{MAX_PALETTE_ENTRIES, Palette, RgbaQuad};
pub use plane::Plane;
