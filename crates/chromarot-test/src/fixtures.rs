//! Synthetic test images
//!
//! Deterministic buffers used by the regression tests in place of image
//! files; decoding files is outside chromarot.

use crate::error::{TestError, TestResult};
use chromarot_core::{PixelBuffer, Palette, Plane};

fn fixture<T>(name: &str, res: chromarot_core::Result<T>) -> TestResult<T> {
    res.map_err(|e| TestError::Fixture {
        name: name.to_string(),
        message: e.to_string(),
    })
}

/// RGB buffer with red rising left to right, green rising top to bottom,
/// and blue constant at 128.
pub fn gradient_rgb(width: u32, height: u32) -> TestResult<PixelBuffer> {
    let mut data = Vec::with_capacity((width * height * 3) as usize);
    for y in 0..height {
        for x in 0..width {
            data.push(ramp(x, width));
            data.push(ramp(y, height));
            data.push(128);
        }
    }
    fixture("gradient_rgb", PixelBuffer::from_interleaved(width, height, 3, &data))
}

/// RGBA version of [`gradient_rgb`] with a diagonal alpha ramp.
pub fn gradient_rgba(width: u32, height: u32) -> TestResult<PixelBuffer> {
    let mut data = Vec::with_capacity((width * height * 4) as usize);
    for y in 0..height {
        for x in 0..width {
            data.push(ramp(x, width));
            data.push(ramp(y, height));
            data.push(128);
            data.push(ramp(x + y, width + height - 1));
        }
    }
    fixture("gradient_rgba", PixelBuffer::from_interleaved(width, height, 4, &data))
}

/// Opaque RGB buffer of a single color.
pub fn solid_rgb(width: u32, height: u32, r: u8, g: u8, b: u8) -> TestResult<PixelBuffer> {
    let data: Vec<u8> = std::iter::repeat_n([r, g, b], (width * height) as usize)
        .flatten()
        .collect();
    fixture("solid_rgb", PixelBuffer::from_interleaved(width, height, 3, &data))
}

/// Plane of `cell`-sized squares alternating between 0 and 255.
pub fn checker_plane(width: u32, height: u32, cell: u32) -> TestResult<Plane> {
    let cell = cell.max(1);
    let data = (0..height)
        .flat_map(|y| (0..width).map(move |x| if (x / cell + y / cell) % 2 == 0 { 255 } else { 0 }))
        .collect();
    fixture("checker_plane", Plane::from_vec(width, height, data))
}

/// Indexed buffer of vertical stripes cycling through red, green and blue.
pub fn indexed_stripes(width: u32, height: u32) -> TestResult<PixelBuffer> {
    let mut palette = Palette::new();
    fixture("indexed_stripes", palette.add_rgb(255, 0, 0))?;
    fixture("indexed_stripes", palette.add_rgb(0, 255, 0))?;
    fixture("indexed_stripes", palette.add_rgb(0, 0, 255))?;
    let data = (0..height)
        .flat_map(|_| (0..width).map(|x| (x % 3) as u8))
        .collect();
    let indices = fixture("indexed_stripes", Plane::from_vec(width, height, data))?;
    fixture("indexed_stripes", PixelBuffer::new_indexed(indices, palette))
}

fn ramp(v: u32, extent: u32) -> u8 {
    if extent <= 1 {
        return 0;
    }
    ((v.min(extent - 1) * 255) / (extent - 1)) as u8
}
