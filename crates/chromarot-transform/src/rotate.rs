//! Expand-to-fit rotation
//!
//! This module provides:
//! - Rotation of a single [`Plane`] by an arbitrary angle ([`rotate`])
//! - Coherent rotation of every channel of a [`PixelBuffer`] ([`rotate_buffer`])
//! - Exact orthogonal rotations (90/180/270 degrees)
//!
//! The output canvas is enlarged to the tight axis-aligned box around the
//! rotated rectangle, so nothing is cropped. Positive angles rotate
//! counter-clockwise. Pixels whose inverse-mapped source location falls
//! outside the original plane keep the fill value.
//!
//! # Interpolation
//!
//! - **Bicubic**: Catmull-Rom cubic over a 4x4 neighborhood. Default.
//! - **Bilinear**: 2x2 neighborhood.
//! - **Sampling**: Nearest neighbor. Used for palette indices.

use crate::{TransformError, TransformResult};
use chromarot_core::{PixelBuffer, Plane};
use tracing::{debug, trace};

// ============================================================================
// Constants
// ============================================================================

/// Angles within this many degrees of a multiple of 90 take the exact path
const ORTHO_TOLERANCE: f64 = 1e-9;

/// Slack absorbed before rounding a bounding box up, so that 10.0000000001
/// from `cos(90)` noise does not become 11
const BOUNDS_EPSILON: f64 = 1e-6;

/// Catmull-Rom coefficient
const CUBIC_A: f64 = -0.5;

// ============================================================================
// Options
// ============================================================================

/// Resampling method for arbitrary-angle rotation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Interpolation {
    /// Bicubic (Catmull-Rom) over a 4x4 neighborhood
    #[default]
    Bicubic,
    /// Bilinear over a 2x2 neighborhood
    Bilinear,
    /// Nearest neighbor
    Sampling,
}

/// Options for rotation operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotateOptions {
    /// Resampling method
    pub interpolation: Interpolation,
    /// Background value for uncovered pixels
    pub fill: u8,
}

impl Default for RotateOptions {
    fn default() -> Self {
        Self {
            interpolation: Interpolation::Bicubic,
            fill: 0,
        }
    }
}

impl RotateOptions {
    /// Create options with a specific interpolation
    pub fn with_interpolation(interpolation: Interpolation) -> Self {
        Self {
            interpolation,
            ..Default::default()
        }
    }

    /// Set the background fill value
    pub fn fill(mut self, fill: u8) -> Self {
        self.fill = fill;
        self
    }
}

/// A plane after rotation, with the size of its expanded canvas
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotatedPlane {
    plane: Plane,
}

impl RotatedPlane {
    /// Wrap a plane that was not rotated; keeps its original size.
    pub fn unrotated(plane: Plane) -> Self {
        Self { plane }
    }

    /// Width after expansion.
    #[inline]
    pub fn width(&self) -> u32 {
        self.plane.width()
    }

    /// Height after expansion.
    #[inline]
    pub fn height(&self) -> u32 {
        self.plane.height()
    }

    /// `(width, height)` after expansion.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        self.plane.dimensions()
    }

    /// Borrow the rotated samples.
    #[inline]
    pub fn plane(&self) -> &Plane {
        &self.plane
    }

    /// Take the rotated plane.
    pub fn into_plane(self) -> Plane {
        self.plane
    }
}

// ============================================================================
// Angle handling
// ============================================================================

/// Quarter-turn classification of a normalized angle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Quadrant {
    Identity,
    Ccw90,
    Half,
    Cw90,
    Arbitrary,
}

/// Reduce an angle in degrees to `[0, 360)`.
///
/// Any finite value is accepted; rotation is periodic.
pub fn normalize_angle(degrees: f64) -> f64 {
    let a = degrees.rem_euclid(360.0);
    // rem_euclid can round tiny negatives up to exactly 360
    if a >= 360.0 { 0.0 } else { a }
}

fn classify(normalized: f64) -> Quadrant {
    let near = |target: f64| (normalized - target).abs() < ORTHO_TOLERANCE;
    if near(0.0) || near(360.0) {
        Quadrant::Identity
    } else if near(90.0) {
        Quadrant::Ccw90
    } else if near(180.0) {
        Quadrant::Half
    } else if near(270.0) {
        Quadrant::Cw90
    } else {
        Quadrant::Arbitrary
    }
}

fn check_angle(degrees: f64) -> TransformResult<f64> {
    if !degrees.is_finite() {
        return Err(TransformError::InvalidParameters(format!(
            "rotation angle must be finite, got {}",
            degrees
        )));
    }
    Ok(normalize_angle(degrees))
}

/// Size of the tight axis-aligned box around a `width x height` rectangle
/// rotated by `degrees` about its center.
///
/// `newW = ceil(|W cos| + |H sin|)`, `newH = ceil(|W sin| + |H cos|)`.
///
/// # Example
///
/// ```
/// use chromarot_transform::rotated_bounds;
///
/// assert_eq!(rotated_bounds(100, 50, 90.0), (50, 100));
/// assert_eq!(rotated_bounds(10, 10, 45.0), (15, 15));
/// assert_eq!(rotated_bounds(10, 10, -315.0), (15, 15));
/// ```
pub fn rotated_bounds(width: u32, height: u32, degrees: f64) -> (u32, u32) {
    let normalized = normalize_angle(degrees);
    match classify(normalized) {
        Quadrant::Identity | Quadrant::Half => (width, height),
        Quadrant::Ccw90 | Quadrant::Cw90 => (height, width),
        Quadrant::Arbitrary => {
            let rad = normalized.to_radians();
            let (sin_a, cos_a) = (rad.sin().abs(), rad.cos().abs());
            let w = width as f64;
            let h = height as f64;
            let new_w = (w * cos_a + h * sin_a - BOUNDS_EPSILON).ceil().max(1.0);
            let new_h = (w * sin_a + h * cos_a - BOUNDS_EPSILON).ceil().max(1.0);
            (new_w as u32, new_h as u32)
        }
    }
}

// ============================================================================
// Plane rotation
// ============================================================================

/// Rotate a plane by `degrees` (counter-clockwise) with default options.
///
/// An angle of 0 (or any multiple of 360) returns the plane untouched,
/// without resampling or allocating.
///
/// # Example
///
/// ```
/// use chromarot_core::Plane;
/// use chromarot_transform::rotate;
///
/// let plane = Plane::new_filled(10, 10, 200).unwrap();
/// let rotated = rotate(plane, 45.0).unwrap();
/// assert_eq!(rotated.dimensions(), (15, 15));
/// ```
pub fn rotate(plane: Plane, degrees: f64) -> TransformResult<RotatedPlane> {
    rotate_with_options(plane, degrees, &RotateOptions::default())
}

/// Rotate a plane by `degrees` (counter-clockwise) using `options`.
///
/// # Errors
///
/// Returns [`TransformError::InvalidParameters`] for a non-finite angle.
pub fn rotate_with_options(
    plane: Plane,
    degrees: f64,
    options: &RotateOptions,
) -> TransformResult<RotatedPlane> {
    let normalized = check_angle(degrees)?;
    let (w, h) = plane.dimensions();

    let rotated = match classify(normalized) {
        Quadrant::Identity => return Ok(RotatedPlane { plane }),
        Quadrant::Ccw90 => rotate_90(&plane, false)?,
        Quadrant::Half => rotate_180(&plane)?,
        Quadrant::Cw90 => rotate_90(&plane, true)?,
        Quadrant::Arbitrary => rotate_arbitrary(&plane, normalized, options)?,
    };

    trace!(
        angle = degrees,
        src_w = w,
        src_h = h,
        dst_w = rotated.width(),
        dst_h = rotated.height(),
        "rotate plane"
    );
    Ok(RotatedPlane { plane: rotated })
}

/// Rotate a plane by 90 degrees
///
/// # Arguments
/// * `plane` - Input plane
/// * `clockwise` - If true, rotate clockwise; otherwise counterclockwise
pub fn rotate_90(plane: &Plane, clockwise: bool) -> TransformResult<Plane> {
    let (w, h) = plane.dimensions();

    // Output dimensions are swapped
    let mut out = Plane::new(h, w)?;
    for y in 0..h {
        for x in 0..w {
            let val = plane.get_unchecked(x, y);
            let (nx, ny) = if clockwise {
                (h - 1 - y, x)
            } else {
                (y, w - 1 - x)
            };
            out.set_unchecked(nx, ny, val);
        }
    }
    Ok(out)
}

/// Rotate a plane by 180 degrees
pub fn rotate_180(plane: &Plane) -> TransformResult<Plane> {
    let (w, h) = plane.dimensions();
    let mut data = plane.data().to_vec();
    data.reverse();
    Ok(Plane::from_vec(w, h, data)?)
}

fn rotate_arbitrary(src: &Plane, degrees: f64, options: &RotateOptions) -> TransformResult<Plane> {
    let (sw, sh) = src.dimensions();
    let (dw, dh) = rotated_bounds(sw, sh, degrees);
    let mut dst = Plane::new_filled(dw, dh, options.fill)?;

    let rad = degrees.to_radians();
    let (sin_a, cos_a) = rad.sin_cos();

    // Centers of the original and expanded canvases
    let src_w = sw as f64;
    let src_h = sh as f64;
    let cx_src = src_w / 2.0;
    let cy_src = src_h / 2.0;
    let cx_dst = dw as f64 / 2.0;
    let cy_dst = dh as f64 / 2.0;

    for dy in 0..dh {
        let y_rel = dy as f64 + 0.5 - cy_dst;
        for dx in 0..dw {
            let x_rel = dx as f64 + 0.5 - cx_dst;

            // Inverse rotation of the destination pixel center (y axis points down)
            let sx = x_rel * cos_a - y_rel * sin_a + cx_src;
            let sy = x_rel * sin_a + y_rel * cos_a + cy_src;

            if sx < 0.0 || sy < 0.0 || sx >= src_w || sy >= src_h {
                continue;
            }

            // Convert to sample-index space, where sample i sits at i + 0.5
            let px = sx - 0.5;
            let py = sy - 0.5;
            let val = match options.interpolation {
                Interpolation::Bicubic => sample_bicubic(src, px, py),
                Interpolation::Bilinear => sample_bilinear(src, px, py),
                Interpolation::Sampling => src.get_unchecked(sx as u32, sy as u32),
            };
            dst.set_unchecked(dx, dy, val);
        }
    }

    Ok(dst)
}

/// Sample with edge clamping.
#[inline]
fn clamped(src: &Plane, x: i64, y: i64) -> f64 {
    let cx = x.clamp(0, src.width() as i64 - 1) as u32;
    let cy = y.clamp(0, src.height() as i64 - 1) as u32;
    src.get_unchecked(cx, cy) as f64
}

#[inline]
fn to_sample(v: f64) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}

/// Bilinear interpolation at a fractional sample position.
fn sample_bilinear(src: &Plane, px: f64, py: f64) -> u8 {
    let x0 = px.floor();
    let y0 = py.floor();
    let fx = px - x0;
    let fy = py - y0;
    let (x0, y0) = (x0 as i64, y0 as i64);

    let p00 = clamped(src, x0, y0);
    let p10 = clamped(src, x0 + 1, y0);
    let p01 = clamped(src, x0, y0 + 1);
    let p11 = clamped(src, x0 + 1, y0 + 1);

    let top = p00 * (1.0 - fx) + p10 * fx;
    let bottom = p01 * (1.0 - fx) + p11 * fx;
    to_sample(top * (1.0 - fy) + bottom * fy)
}

/// Keys cubic convolution weights for taps at offsets -1, 0, 1, 2.
fn cubic_weights(t: f64) -> [f64; 4] {
    let w = |d: f64| {
        let d = d.abs();
        if d <= 1.0 {
            ((CUBIC_A + 2.0) * d - (CUBIC_A + 3.0)) * d * d + 1.0
        } else if d < 2.0 {
            ((CUBIC_A * d - 5.0 * CUBIC_A) * d + 8.0 * CUBIC_A) * d - 4.0 * CUBIC_A
        } else {
            0.0
        }
    };
    [w(t + 1.0), w(t), w(1.0 - t), w(2.0 - t)]
}

/// Bicubic interpolation at a fractional sample position.
fn sample_bicubic(src: &Plane, px: f64, py: f64) -> u8 {
    let x0 = px.floor();
    let y0 = py.floor();
    let wx = cubic_weights(px - x0);
    let wy = cubic_weights(py - y0);
    let (x0, y0) = (x0 as i64, y0 as i64);

    let mut acc = 0.0;
    for (j, wyj) in wy.iter().enumerate() {
        let y = y0 - 1 + j as i64;
        let row: f64 = wx
            .iter()
            .enumerate()
            .map(|(i, wxi)| wxi * clamped(src, x0 - 1 + i as i64, y))
            .sum();
        acc += wyj * row;
    }
    to_sample(acc)
}

// ============================================================================
// Buffer rotation
// ============================================================================

/// Rotate every channel of a buffer by the same angle.
///
/// All planes share one geometry, so the channels stay registered.
/// Indexed buffers are rotated with [`Interpolation::Sampling`] so palette
/// indices are moved, never blended, and keep their palette.
///
/// # Errors
///
/// For indexed buffers, [`TransformError::InvalidParameters`] if
/// `options.fill` is not a valid palette index.
///
/// # Example
///
/// ```
/// use chromarot_core::{ChannelLayout, PixelBuffer};
/// use chromarot_transform::{RotateOptions, rotate_buffer};
///
/// let buf = PixelBuffer::new(40, 20, ChannelLayout::Rgba).unwrap();
/// let rotated = rotate_buffer(buf, 90.0, &RotateOptions::default()).unwrap();
/// assert_eq!(rotated.dimensions(), (20, 40));
/// ```
pub fn rotate_buffer(
    buffer: PixelBuffer,
    degrees: f64,
    options: &RotateOptions,
) -> TransformResult<PixelBuffer> {
    let (w, h) = buffer.dimensions();
    let (layout, planes, palette) = buffer.into_parts();

    let sampling;
    let options = if let Some(pal) = &palette {
        // The fill becomes a palette index for uncovered pixels
        if options.fill as usize >= pal.len() {
            return Err(TransformError::InvalidParameters(format!(
                "fill index {} outside palette of {} entries",
                options.fill,
                pal.len()
            )));
        }
        sampling = RotateOptions {
            interpolation: Interpolation::Sampling,
            ..options.clone()
        };
        &sampling
    } else {
        options
    };

    let rotated = planes
        .into_iter()
        .map(|p| rotate_with_options(p, degrees, options).map(RotatedPlane::into_plane))
        .collect::<TransformResult<Vec<_>>>()?;

    let out = PixelBuffer::from_planes(layout, rotated)?.with_palette(palette)?;
    debug!(
        angle = degrees,
        ?layout,
        src_w = w,
        src_h = h,
        dst_w = out.width(),
        dst_h = out.height(),
        "rotate buffer"
    );
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered(w: u32, h: u32) -> Plane {
        Plane::from_vec(w, h, (0..w * h).map(|v| v as u8).collect()).unwrap()
    }

    #[test]
    fn test_normalize_angle() {
        assert_eq!(normalize_angle(370.0), 10.0);
        assert_eq!(normalize_angle(-90.0), 270.0);
        assert_eq!(normalize_angle(720.0), 0.0);
        assert_eq!(normalize_angle(-1e-20), 0.0);
    }

    #[test]
    fn test_zero_angle_is_identity() {
        let p = numbered(5, 3);
        for angle in [0.0, 360.0, -720.0] {
            let r = rotate(p.clone(), angle).unwrap();
            assert_eq!(r.plane(), &p);
        }
    }

    #[test]
    fn test_rotate_90_ccw_mapping() {
        // 3x2 plane:
        //   0 1 2
        //   3 4 5
        let p = numbered(3, 2);
        let r = rotate(p, 90.0).unwrap();
        assert_eq!(r.dimensions(), (2, 3));
        // Counter-clockwise: top-right moves to top-left
        assert_eq!(r.plane().row(0), &[2, 5]);
        assert_eq!(r.plane().row(2), &[0, 3]);
    }

    #[test]
    fn test_rotate_90_cw_and_back() {
        let p = numbered(4, 3);
        let cw = rotate_90(&p, true).unwrap();
        assert_eq!(cw.get(0, 0), Some(8));
        let back = rotate_90(&cw, false).unwrap();
        assert_eq!(back, p);
    }

    #[test]
    fn test_negative_90_is_clockwise() {
        let p = numbered(4, 3);
        let r = rotate(p.clone(), -90.0).unwrap();
        assert_eq!(r.plane(), &rotate_90(&p, true).unwrap());
    }

    #[test]
    fn test_rotate_180() {
        let p = numbered(3, 2);
        let r = rotate(p, 540.0).unwrap();
        assert_eq!(r.plane().data(), &[5, 4, 3, 2, 1, 0]);
    }

    #[test]
    fn test_bounds_match_formula() {
        for &(w, h) in &[(10u32, 10u32), (40, 17), (3, 100)] {
            for angle in [1.0, 30.0, 45.0, 100.0, 233.5, -17.0] {
                let rad = f64::to_radians(angle);
                let ew = (w as f64 * rad.cos().abs() + h as f64 * rad.sin().abs()).ceil();
                let eh = (w as f64 * rad.sin().abs() + h as f64 * rad.cos().abs()).ceil();
                let (bw, bh) = rotated_bounds(w, h, angle);
                assert!((bw as f64 - ew).abs() <= 1.0, "{w}x{h}@{angle}: {bw} vs {ew}");
                assert!((bh as f64 - eh).abs() <= 1.0, "{w}x{h}@{angle}: {bh} vs {eh}");
            }
        }
    }

    #[test]
    fn test_constant_plane_interior_preserved() {
        let p = Plane::new_filled(20, 20, 200).unwrap();
        for interp in [Interpolation::Bicubic, Interpolation::Bilinear, Interpolation::Sampling] {
            let opts = RotateOptions::with_interpolation(interp);
            let r = rotate_with_options(p.clone(), 45.0, &opts).unwrap();
            let (w, h) = r.dimensions();
            assert_eq!((w, h), (29, 29));
            // Center is well inside the source
            assert_eq!(r.plane().get(w / 2, h / 2), Some(200));
            // Corners of the expanded canvas are background
            assert_eq!(r.plane().get(0, 0), Some(0));
            assert_eq!(r.plane().get(w - 1, h - 1), Some(0));
        }
    }

    #[test]
    fn test_fill_value_used_for_background() {
        let p = Plane::new_filled(8, 8, 100).unwrap();
        let r = rotate_with_options(p, 30.0, &RotateOptions::default().fill(77)).unwrap();
        assert_eq!(r.plane().get(0, 0), Some(77));
    }

    #[test]
    fn test_non_finite_angle_rejected() {
        let p = Plane::new(2, 2).unwrap();
        assert!(matches!(
            rotate(p, f64::NAN),
            Err(TransformError::InvalidParameters(_))
        ));
    }

    #[test]
    fn test_cubic_weights_sum_to_one() {
        for t in [0.0, 0.25, 0.5, 0.9] {
            let s: f64 = cubic_weights(t).iter().sum();
            assert!((s - 1.0).abs() < 1e-12);
        }
        assert_eq!(cubic_weights(0.0), [0.0, 1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_bicubic_kernel_values() {
        // Row 0, 0, 100, 200 sampled halfway between the 2nd and 3rd sample
        let p = Plane::from_vec(4, 1, vec![0, 0, 100, 200]).unwrap();
        // -0.0625 * 0 + 0.5625 * 0 + 0.5625 * 100 - 0.0625 * 200 = 43.75
        assert_eq!(sample_bicubic(&p, 1.5, 0.0), 44);
        assert_eq!(sample_bilinear(&p, 1.5, 0.0), 50);
        // Integer positions reproduce the samples exactly
        assert_eq!(sample_bicubic(&p, 2.0, 0.0), 100);
        // Overshoot is clamped
        let step = Plane::from_vec(4, 1, vec![0, 255, 255, 255]).unwrap();
        assert_eq!(sample_bicubic(&step, 1.5, 0.0), 255);
    }

    #[test]
    fn test_default_interpolation_is_bicubic() {
        let p = Plane::from_vec(6, 6, (0..36).map(|v| ((v * 37) % 256) as u8).collect()).unwrap();
        let default = rotate(p.clone(), 25.0).unwrap();
        let bicubic = rotate_with_options(
            p.clone(),
            25.0,
            &RotateOptions::with_interpolation(Interpolation::Bicubic),
        )
        .unwrap();
        let bilinear = rotate_with_options(
            p,
            25.0,
            &RotateOptions::with_interpolation(Interpolation::Bilinear),
        )
        .unwrap();
        assert_eq!(default, bicubic);
        assert_ne!(default, bilinear);
    }
}
