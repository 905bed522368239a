//! Plane - a single channel of 8-bit samples
//!
//! A `Plane` is a row-major `width * height` byte matrix. Planes are
//! produced by splitting a [`PixelBuffer`](crate::PixelBuffer) or by the
//! rotation kernel, and consumed by the compositor and the merger.
//!
//! # Ownership model
//!
//! Planes are plain owned values. Transforms take a plane by value and
//! return a new one, so a plane is never shared between pipeline stages.

use crate::error::{Error, Result};

/// Single-channel 8-bit image plane
///
/// # Examples
///
/// ```
/// use chromarot_core::Plane;
///
/// let mut plane = Plane::new(4, 3).unwrap();
/// plane.set(1, 2, 200).unwrap();
/// assert_eq!(plane.get(1, 2), Some(200));
/// assert_eq!(plane.dimensions(), (4, 3));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plane {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Plane {
    /// Create a new plane filled with zeros.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPlane`] if width or height is 0.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Self::new_filled(width, height, 0)
    }

    /// Create a new plane with every sample set to `value`.
    pub fn new_filled(width: u32, height: u32, value: u8) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidPlane { width, height });
        }
        let len = (width as usize) * (height as usize);
        Ok(Plane {
            width,
            height,
            data: vec![value; len],
        })
    }

    /// Wrap existing row-major samples.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPlane`] for a zero dimension and
    /// [`Error::InvalidParameter`] if `data.len() != width * height`.
    pub fn from_vec(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidPlane { width, height });
        }
        let expected = (width as usize) * (height as usize);
        if data.len() != expected {
            return Err(Error::InvalidParameter(format!(
                "plane {}x{} needs {} samples, got {}",
                width,
                height,
                expected,
                data.len()
            )));
        }
        Ok(Plane {
            width,
            height,
            data,
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

    /// Check if two planes have the same width and height.
    pub fn same_size(&self, other: &Plane) -> bool {
        self.width == other.width && self.height == other.height
    }

    /// Get the sample at (x, y), or `None` if out of bounds.
    pub fn get(&self, x: u32, y: u32) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.get_unchecked(x, y))
    }

    /// Get the sample at (x, y) without bounds checking against width.
    ///
    /// # Panics
    ///
    /// Panics if the computed index is past the end of the plane.
    #[inline]
    pub fn get_unchecked(&self, x: u32, y: u32) -> u8 {
        self.data[self.index(x, y)]
    }

    /// Set the sample at (x, y).
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if (x, y) lies outside the plane.
    pub fn set(&mut self, x: u32, y: u32, value: u8) -> Result<()> {
        if x >= self.width {
            return Err(Error::IndexOutOfBounds {
                index: x as usize,
                len: self.width as usize,
            });
        }
        if y >= self.height {
            return Err(Error::IndexOutOfBounds {
                index: y as usize,
                len: self.height as usize,
            });
        }
        self.set_unchecked(x, y, value);
        Ok(())
    }

    /// Set the sample at (x, y) without bounds checking against width.
    #[inline]
    pub fn set_unchecked(&mut self, x: u32, y: u32, value: u8) {
        let idx = self.index(x, y);
        self.data[idx] = value;
    }

    /// Borrow one row.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row(&self, y: u32) -> &[u8] {
        let start = (y as usize) * (self.width as usize);
        &self.data[start..start + self.width as usize]
    }

    /// Mutably borrow one row.
    #[inline]
    pub fn row_mut(&mut self, y: u32) -> &mut [u8] {
        let start = (y as usize) * (self.width as usize);
        let w = self.width as usize;
        &mut self.data[start..start + w]
    }

    /// Raw samples in row-major order.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Consume the plane and return its samples.
    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }

    /// Set every sample to `value`.
    pub fn fill(&mut self, value: u8) {
        self.data.fill(value);
    }

    /// Copy `src` into this plane with its top-left corner at (x, y).
    ///
    /// Parts of `src` falling outside this plane are clipped; negative
    /// offsets are allowed.
    pub fn paste(&mut self, src: &Plane, x: i64, y: i64) {
        let dst_w = self.width as i64;
        let dst_h = self.height as i64;

        let x0 = x.max(0);
        let y0 = y.max(0);
        let x1 = (x + src.width as i64).min(dst_w);
        let y1 = (y + src.height as i64).min(dst_h);
        if x0 >= x1 || y0 >= y1 {
            return;
        }

        let span = (x1 - x0) as usize;
        let sx = (x0 - x) as usize;
        for dy in y0..y1 {
            let sy = (dy - y) as u32;
            let src_row = &src.row(sy)[sx..sx + span];
            let dst_row = self.row_mut(dy as u32);
            dst_row[x0 as usize..x0 as usize + span].copy_from_slice(src_row);
        }
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        (y as usize) * (self.width as usize) + x as usize
    }
}
