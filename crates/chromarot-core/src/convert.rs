//! Layout conversions
//!
//! Conversions between indexed, greyscale, RGB and RGBA buffers. These run
//! before channel splitting (palette indices must never be split as color)
//! and before histogramming (only visible color is counted).

use crate::buffer::{ChannelLayout, PixelBuffer};
use crate::error::{Error, Result};
use crate::plane::Plane;

/// Target for [`PixelBuffer::remove_palette`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RemovePaletteTarget {
    /// RGBA if any palette entry is translucent, RGB otherwise
    #[default]
    BasedOnSrc,
    /// Always RGB (palette alpha dropped)
    ToFullColor,
    /// Always RGBA
    WithAlpha,
}

impl PixelBuffer {
    /// Expand palette indices into direct color planes.
    ///
    /// Buffers without a palette are returned unchanged.
    pub fn remove_palette(self, target: RemovePaletteTarget) -> Result<PixelBuffer> {
        let Some(palette) = self.palette() else {
            return Ok(self);
        };

        let layout = match target {
            RemovePaletteTarget::BasedOnSrc if !palette.is_opaque() => ChannelLayout::Rgba,
            RemovePaletteTarget::BasedOnSrc | RemovePaletteTarget::ToFullColor => {
                ChannelLayout::Rgb
            }
            RemovePaletteTarget::WithAlpha => ChannelLayout::Rgba,
        };

        // Unused indices map to black, matching an empty palette slot
        let mut lut = [[0u8; 4]; 256];
        for (entry, c) in lut.iter_mut().zip(palette.colors()) {
            *entry = [c.red, c.green, c.blue, c.alpha];
        }

        let (w, h) = self.dimensions();
        let indices = &self.planes()[0];
        let mut planes = Vec::with_capacity(layout.channel_count() as usize);
        for c in 0..layout.channel_count() as usize {
            let samples = indices
                .data()
                .iter()
                .map(|&i| lut[i as usize][c])
                .collect();
            planes.push(Plane::from_vec(w, h, samples)?);
        }

        tracing::trace!(width = w, height = h, ?layout, "remove_palette");
        PixelBuffer::from_planes(layout, planes)
    }

    /// Convert to RGB or RGBA, keeping alpha if present.
    ///
    /// Indexed buffers are expanded via [`RemovePaletteTarget::BasedOnSrc`];
    /// greyscale is replicated into three channels.
    pub fn to_direct_color(self) -> Result<PixelBuffer> {
        let buf = self.remove_palette(RemovePaletteTarget::BasedOnSrc)?;
        match buf.layout() {
            ChannelLayout::Rgb | ChannelLayout::Rgba => Ok(buf),
            ChannelLayout::Gray => {
                let gray = buf.into_planes().remove(0);
                PixelBuffer::from_planes(
                    ChannelLayout::Rgb,
                    vec![gray.clone(), gray.clone(), gray],
                )
            }
        }
    }

    /// Flatten alpha onto an opaque background color.
    ///
    /// Each channel becomes `(a * c + (255 - a) * bg) / 255`. Buffers
    /// without alpha are returned unchanged.
    pub fn remove_alpha(self, background: [u8; 3]) -> Result<PixelBuffer> {
        if !self.has_alpha() {
            return Ok(self);
        }

        let mut planes = self.into_planes();
        let Some(alpha) = planes.pop() else {
            return Err(Error::UnsupportedChannelCount(0));
        };
        let (w, h) = alpha.dimensions();

        let mut out = Vec::with_capacity(3);
        for (plane, &bg) in planes.iter().zip(background.iter()) {
            let samples = plane
                .data()
                .iter()
                .zip(alpha.data())
                .map(|(&c, &a)| {
                    let a = a as u32;
                    ((a * c as u32 + (255 - a) * bg as u32) / 255).min(255) as u8
                })
                .collect();
            out.push(Plane::from_vec(w, h, samples)?);
        }

        PixelBuffer::from_planes(ChannelLayout::Rgb, out)
    }

    /// Convert to opaque RGB: palette removed, grey expanded, alpha flattened.
    pub fn to_rgb(self, background: [u8; 3]) -> Result<PixelBuffer> {
        self.to_direct_color()?.remove_alpha(background)
    }
}
