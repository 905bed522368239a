//! PixelBuffer - the in-memory raster
//!
//! A `PixelBuffer` holds one [`Plane`] per channel, all of identical size.
//! Supported layouts are greyscale (1 channel), RGB (3) and RGBA (4).
//! A greyscale buffer may instead carry a [`Palette`], in which case its
//! single plane holds palette indices.
//!
//! # Ownership model
//!
//! A buffer is owned by whichever stage currently processes it. Stages
//! take buffers by value or by shared reference and always allocate
//! their output; nothing is mutated in place behind a caller's back.

use crate::error::{Error, Result};
use crate::palette::{Palette, RgbaQuad};
use crate::plane::Plane;

/// A single channel of a buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    /// Greyscale intensity (or palette index for indexed buffers)
    Gray,
    /// Red
    Red,
    /// Green
    Green,
    /// Blue
    Blue,
    /// Alpha (opacity)
    Alpha,
}

impl Channel {
    /// Human-readable label, e.g. `"Red"`.
    pub fn label(self) -> &'static str {
        match self {
            Channel::Gray => "Gray",
            Channel::Red => "Red",
            Channel::Green => "Green",
            Channel::Blue => "Blue",
            Channel::Alpha => "Alpha",
        }
    }
}

/// Channel arrangement of a buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelLayout {
    /// One greyscale channel
    Gray,
    /// Red, green, blue
    Rgb,
    /// Red, green, blue, alpha
    Rgba,
}

impl ChannelLayout {
    /// Layout for a raw channel count.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedChannelCount`] unless `count` is 1, 3 or 4.
    pub fn from_count(count: u32) -> Result<Self> {
        match count {
            1 => Ok(ChannelLayout::Gray),
            3 => Ok(ChannelLayout::Rgb),
            4 => Ok(ChannelLayout::Rgba),
            _ => Err(Error::UnsupportedChannelCount(count)),
        }
    }

    /// Number of channels.
    pub fn channel_count(self) -> u32 {
        match self {
            ChannelLayout::Gray => 1,
            ChannelLayout::Rgb => 3,
            ChannelLayout::Rgba => 4,
        }
    }

    /// Channels in storage order.
    pub fn channels(self) -> &'static [Channel] {
        match self {
            ChannelLayout::Gray => &[Channel::Gray],
            ChannelLayout::Rgb => &[Channel::Red, Channel::Green, Channel::Blue],
            ChannelLayout::Rgba => &[Channel::Red, Channel::Green, Channel::Blue, Channel::Alpha],
        }
    }

    /// Storage index of `channel`, or `None` if the layout lacks it.
    pub fn index_of(self, channel: Channel) -> Option<usize> {
        self.channels().iter().position(|&c| c == channel)
    }

    /// True if the layout has an alpha channel.
    pub fn has_alpha(self) -> bool {
        self == ChannelLayout::Rgba
    }
}

/// In-memory raster image
///
/// # Examples
///
/// ```
/// use chromarot_core::{ChannelLayout, PixelBuffer};
///
/// let buf = PixelBuffer::new(64, 48, ChannelLayout::Rgb).unwrap();
/// assert_eq!(buf.dimensions(), (64, 48));
/// assert_eq!(buf.channel_count(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    layout: ChannelLayout,
    planes: Vec<Plane>,
    palette: Option<Palette>,
}

impl PixelBuffer {
    /// Create a zero-filled buffer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPlane`] if width or height is 0.
    pub fn new(width: u32, height: u32, layout: ChannelLayout) -> Result<Self> {
        let planes = (0..layout.channel_count())
            .map(|_| Plane::new(width, height))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            width,
            height,
            layout,
            planes,
            palette: None,
        })
    }

    /// Assemble a buffer from per-channel planes.
    ///
    /// # Errors
    ///
    /// - [`Error::UnsupportedChannelCount`] if the plane count does not match `layout`
    /// - [`Error::ShapeMismatch`] if the planes differ in size
    pub fn from_planes(layout: ChannelLayout, planes: Vec<Plane>) -> Result<Self> {
        if planes.len() != layout.channel_count() as usize {
            return Err(Error::UnsupportedChannelCount(planes.len() as u32));
        }
        let (width, height) = planes[0].dimensions();
        if let Some(bad) = planes.iter().find(|p| p.dimensions() != (width, height)) {
            return Err(Error::ShapeMismatch {
                expected: (width, height),
                actual: bad.dimensions(),
            });
        }
        Ok(Self {
            width,
            height,
            layout,
            planes,
            palette: None,
        })
    }

    /// Build a buffer from interleaved samples (`RGBRGB...`, `RGBARGBA...`, or grey).
    ///
    /// This is the hand-off format of image decoders.
    pub fn from_interleaved(width: u32, height: u32, channels: u32, data: &[u8]) -> Result<Self> {
        let layout = ChannelLayout::from_count(channels)?;
        if width == 0 || height == 0 {
            return Err(Error::InvalidPlane { width, height });
        }
        let n = channels as usize;
        let npix = (width as usize) * (height as usize);
        if data.len() != npix * n {
            return Err(Error::InvalidParameter(format!(
                "{}x{}x{} buffer needs {} bytes, got {}",
                width,
                height,
                channels,
                npix * n,
                data.len()
            )));
        }

        let mut planes = Vec::with_capacity(n);
        for c in 0..n {
            let samples: Vec<u8> = data.iter().skip(c).step_by(n).copied().collect();
            planes.push(Plane::from_vec(width, height, samples)?);
        }
        Self::from_planes(layout, planes)
    }

    /// Create an indexed buffer from a plane of palette indices.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if the palette is empty or an
    /// index refers past its end.
    pub fn new_indexed(indices: Plane, palette: Palette) -> Result<Self> {
        if palette.is_empty() {
            return Err(Error::InvalidParameter("palette is empty".into()));
        }
        if let Some(&bad) = indices.data().iter().find(|&&i| i as usize >= palette.len()) {
            return Err(Error::IndexOutOfBounds {
                index: bad as usize,
                len: palette.len(),
            });
        }
        let (width, height) = indices.dimensions();
        Ok(Self {
            width,
            height,
            layout: ChannelLayout::Gray,
            planes: vec![indices],
            palette: Some(palette),
        })
    }

    /// Width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// `(width, height)`.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Channel layout.
    #[inline]
    pub fn layout(&self) -> ChannelLayout {
        self.layout
    }

    /// Number of channels (1, 3 or 4).
    #[inline]
    pub fn channel_count(&self) -> u32 {
        self.layout.channel_count()
    }

    /// True if the buffer has an alpha channel.
    #[inline]
    pub fn has_alpha(&self) -> bool {
        self.layout.has_alpha()
    }

    /// True if the single plane holds palette indices.
    #[inline]
    pub fn is_indexed(&self) -> bool {
        self.palette.is_some()
    }

    /// The palette of an indexed buffer.
    #[inline]
    pub fn palette(&self) -> Option<&Palette> {
        self.palette.as_ref()
    }

    /// Plane for `channel`, if the layout has it.
    pub fn plane(&self, channel: Channel) -> Option<&Plane> {
        self.layout.index_of(channel).map(|i| &self.planes[i])
    }

    /// All planes in storage order.
    #[inline]
    pub fn planes(&self) -> &[Plane] {
        &self.planes
    }

    /// Consume the buffer, returning its planes in storage order.
    pub fn into_planes(self) -> Vec<Plane> {
        self.planes
    }

    /// Consume the buffer, returning planes and palette.
    pub fn into_parts(self) -> (ChannelLayout, Vec<Plane>, Option<Palette>) {
        (self.layout, self.planes, self.palette)
    }

    /// Replace the palette of an indexed buffer's index plane.
    ///
    /// Used by transforms that move indices without blending them.
    ///
    /// # Errors
    ///
    /// Same checks as [`PixelBuffer::new_indexed`]: the buffer must be a
    /// single plane, the palette non-empty, and every index inside it.
    pub fn with_palette(self, palette: Option<Palette>) -> Result<Self> {
        let Some(palette) = palette else {
            return Ok(Self {
                palette: None,
                ..self
            });
        };
        if self.layout != ChannelLayout::Gray {
            return Err(Error::InvalidParameter(
                "palette requires a single index plane".into(),
            ));
        }
        let (_, mut planes, _) = self.into_parts();
        match planes.pop() {
            Some(indices) => Self::new_indexed(indices, palette),
            None => Err(Error::UnsupportedChannelCount(0)),
        }
    }

    /// Read the pixel at (x, y) as RGBA.
    ///
    /// Greyscale replicates the value; indexed buffers look up the palette;
    /// buffers without alpha report 255.
    pub fn get_rgba(&self, x: u32, y: u32) -> Option<RgbaQuad> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let sample = |i: usize| self.planes[i].get_unchecked(x, y);
        let quad = match (self.layout, &self.palette) {
            (ChannelLayout::Gray, Some(pal)) => {
                pal.get(sample(0) as usize).copied().unwrap_or_default()
            }
            (ChannelLayout::Gray, None) => RgbaQuad::gray(sample(0)),
            (ChannelLayout::Rgb, _) => RgbaQuad::rgb(sample(0), sample(1), sample(2)),
            (ChannelLayout::Rgba, _) => {
                RgbaQuad::new(sample(0), sample(1), sample(2), sample(3))
            }
        };
        Some(quad)
    }

    /// Interleave the planes back into a single byte vector.
    pub fn to_interleaved(&self) -> Vec<u8> {
        let n = self.planes.len();
        let npix = (self.width as usize) * (self.height as usize);
        let mut out = vec![0u8; npix * n];
        for (c, plane) in self.planes.iter().enumerate() {
            for (i, &v) in plane.data().iter().enumerate() {
                out[i * n + c] = v;
            }
        }
        out
    }
}
