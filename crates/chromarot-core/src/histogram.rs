//! Per-channel intensity histograms
//!
//! Histograms are computed on visible color only: the buffer is converted
//! to opaque RGB first (palette expanded, greyscale replicated, alpha
//! flattened onto a background). Each channel's counts are normalized to
//! a density so that `sum(density) * bin_width == 1`.
//!
//! Turning bin data into a picture is left to a [`HistogramRenderer`].

use crate::buffer::{Channel, PixelBuffer};
use crate::error::{Error, Result};

/// Default number of bins
pub const DEFAULT_BINS: usize = 128;

/// Largest representable sample value; bins span `[0, MAX_SAMPLE]`
const MAX_SAMPLE: f64 = 255.0;

/// Options for [`compute_histograms`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistogramOptions {
    /// Number of equal-width bins spanning [0, 255]
    pub bins: usize,
    /// Opaque color that translucent pixels are flattened onto
    pub background: [u8; 3],
}

impl Default for HistogramOptions {
    fn default() -> Self {
        Self {
            bins: DEFAULT_BINS,
            background: [255, 255, 255],
        }
    }
}

impl HistogramOptions {
    /// Create options with a specific bin count
    pub fn with_bins(bins: usize) -> Self {
        Self {
            bins,
            ..Default::default()
        }
    }

    /// Set the flattening background
    pub fn background(mut self, r: u8, g: u8, b: u8) -> Self {
        self.background = [r, g, b];
        self
    }
}

/// Normalized histogram of one channel
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    channel: Channel,
    counts: Vec<u64>,
    density: Vec<f64>,
    bin_width: f64,
    total: u64,
}

impl Histogram {
    /// Channel this histogram describes.
    #[inline]
    pub fn channel(&self) -> Channel {
        self.channel
    }

    /// Display label, e.g. `"Red"`.
    #[inline]
    pub fn label(&self) -> &'static str {
        self.channel.label()
    }

    /// Number of bins.
    #[inline]
    pub fn len(&self) -> usize {
        self.density.len()
    }

    /// Always false; a histogram has at least one bin.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.density.is_empty()
    }

    /// Raw per-bin pixel counts.
    #[inline]
    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    /// Per-bin densities: `count / (total * bin_width)`.
    #[inline]
    pub fn density(&self) -> &[f64] {
        &self.density
    }

    /// Width of one bin in intensity units.
    #[inline]
    pub fn bin_width(&self) -> f64 {
        self.bin_width
    }

    /// Number of pixels counted.
    #[inline]
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Left edges of each bin, followed by the right edge of the last one.
    pub fn bin_edges(&self) -> Vec<f64> {
        (0..=self.density.len())
            .map(|i| i as f64 * self.bin_width)
            .collect()
    }
}

/// Compute normalized R, G, B histograms of a buffer.
///
/// # Errors
///
/// Returns [`Error::InvalidParameter`] if `options.bins` is 0.
///
/// # Examples
///
/// ```
/// use chromarot_core::{HistogramOptions, PixelBuffer, compute_histograms};
///
/// let buf = PixelBuffer::from_interleaved(2, 1, 3, &[0, 128, 255, 0, 128, 255]).unwrap();
/// let hists = compute_histograms(&buf, &HistogramOptions::default()).unwrap();
/// assert_eq!(hists.len(), 3);
/// assert_eq!(hists[0].label(), "Red");
/// assert_eq!(hists[0].counts()[0], 2);
/// ```
pub fn compute_histograms(buffer: &PixelBuffer, options: &HistogramOptions) -> Result<Vec<Histogram>> {
    let bins = options.bins;
    if bins == 0 {
        return Err(Error::InvalidParameter("bins must be at least 1".into()));
    }

    let rgb = buffer.clone().to_rgb(options.background)?;
    let (w, h) = rgb.dimensions();
    let total = (w as u64) * (h as u64);
    let bin_width = MAX_SAMPLE / bins as f64;

    // Value 255 lands in the last bin; the upper edge is closed
    let mut lut = [0usize; 256];
    for (v, slot) in lut.iter_mut().enumerate() {
        *slot = ((v * bins) / 255).min(bins - 1);
    }

    let hists = [Channel::Red, Channel::Green, Channel::Blue]
        .into_iter()
        .zip(rgb.planes())
        .map(|(channel, plane)| {
            let mut counts = vec![0u64; bins];
            for &v in plane.data() {
                counts[lut[v as usize]] += 1;
            }
            let norm = total as f64 * bin_width;
            let density = counts.iter().map(|&c| c as f64 / norm).collect();
            Histogram {
                channel,
                counts,
                density,
                bin_width,
                total,
            }
        })
        .collect();

    tracing::debug!(width = w, height = h, bins, "compute_histograms");
    Ok(hists)
}

/// External service that turns histogram data into a displayable image
///
/// The encoding of the output (PNG bytes, base64 text, a widget, ...)
/// is entirely the renderer's concern.
pub trait HistogramRenderer {
    /// Rendered representation
    type Output;
    /// Rendering failure
    type Error;

    /// Render the histograms of one buffer.
    fn render(&self, histograms: &[Histogram]) -> std::result::Result<Self::Output, Self::Error>;
}

/// Error from [`render_histograms`]
#[derive(Debug, thiserror::Error)]
pub enum RenderError<E> {
    /// Histogram computation failed
    #[error(transparent)]
    Histogram(#[from] Error),
    /// The renderer failed
    #[error("histogram rendering failed")]
    Renderer(E),
}

/// Compute the histograms of `buffer` and hand them to `renderer`.
pub fn render_histograms<R: HistogramRenderer>(
    buffer: &PixelBuffer,
    options: &HistogramOptions,
    renderer: &R,
) -> std::result::Result<R::Output, RenderError<R::Error>> {
    let hists = compute_histograms(buffer, options)?;
    renderer.render(&hists).map_err(RenderError::Renderer)
}

/// Histograms of a buffer before and after a transform
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramComparison {
    /// Histograms of the source buffer
    pub source: Vec<Histogram>,
    /// Histograms of the transformed buffer
    pub result: Vec<Histogram>,
}

impl HistogramComparison {
    /// Compute both sides independently with the same options.
    pub fn compute(source: &PixelBuffer, result: &PixelBuffer, options: &HistogramOptions) -> Result<Self> {
        Ok(Self {
            source: compute_histograms(source, options)?,
            result: compute_histograms(result, options)?,
        })
    }

    /// Render each side with `renderer`, source first.
    pub fn render<R: HistogramRenderer>(
        &self,
        renderer: &R,
    ) -> std::result::Result<(R::Output, R::Output), R::Error> {
        Ok((renderer.render(&self.source)?, renderer.render(&self.result)?))
    }
}
