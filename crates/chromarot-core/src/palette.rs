//! Palette - color table for indexed buffers
//!
//! An indexed [`PixelBuffer`](crate::PixelBuffer) stores one plane of
//! palette indices. The palette maps each index to an RGBA color.
//! Indexed buffers are converted to direct color before any per-channel
//! work; see [`PixelBuffer::remove_palette`](crate::PixelBuffer::remove_palette).

use crate::error::{Error, Result};

/// Maximum number of palette entries (8-bit indices)
pub const MAX_PALETTE_ENTRIES: usize = 256;

/// RGBA color entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RgbaQuad {
    /// Red component
    pub red: u8,
    /// Green component
    pub green: u8,
    /// Blue component
    pub blue: u8,
    /// Alpha component
    pub alpha: u8,
}

impl RgbaQuad {
    /// Create a new RGBA color
    pub fn new(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Create an RGB color (alpha = 255)
    pub fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self::new(red, green, blue, 255)
    }

    /// Create a grayscale color
    pub fn gray(value: u8) -> Self {
        Self::rgb(value, value, value)
    }
}

/// Color table for indexed images
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<RgbaQuad>,
}

impl Palette {
    /// Create an empty palette.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Check if empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Get a color by index.
    pub fn get(&self, index: usize) -> Option<&RgbaQuad> {
        self.colors.get(index)
    }

    /// All entries in index order.
    pub fn colors(&self) -> &[RgbaQuad] {
        &self.colors
    }

    /// Append a color, returning its index.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] when the palette is full.
    pub fn add_color(&mut self, color: RgbaQuad) -> Result<usize> {
        if self.colors.len() >= MAX_PALETTE_ENTRIES {
            return Err(Error::InvalidParameter(format!(
                "palette full ({} entries)",
                MAX_PALETTE_ENTRIES
            )));
        }
        self.colors.push(color);
        Ok(self.colors.len() - 1)
    }

    /// Append an opaque RGB color.
    pub fn add_rgb(&mut self, r: u8, g: u8, b: u8) -> Result<usize> {
        self.add_color(RgbaQuad::rgb(r, g, b))
    }

    /// Append an RGBA color.
    pub fn add_rgba(&mut self, r: u8, g: u8, b: u8, a: u8) -> Result<usize> {
        self.add_color(RgbaQuad::new(r, g, b, a))
    }

    /// True if every entry is fully opaque.
    pub fn is_opaque(&self) -> bool {
        self.colors.iter().all(|c| c.alpha == 255)
    }

    /// True if any entry has unequal R, G, B.
    pub fn has_color(&self) -> bool {
        self.colors
            .iter()
            .any(|c| c.red != c.green || c.green != c.blue)
    }
}
