//! Canvas reconciliation of independently rotated planes
//!
//! Planes rotated by different angles come back with different sizes.
//! [`Canvas::enclosing`] finds the smallest canvas that holds all of them
//! and [`Canvas::place`] centers each plane on it, so the results can be
//! merged into one buffer.

use crate::rotate::RotatedPlane;
use crate::{TransformError, TransformResult};
use chromarot_core::Plane;
use tracing::{debug, trace};

/// Common target size for a set of planes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Canvas {
    width: u32,
    height: u32,
    fill: u8,
}

impl Canvas {
    /// Create a canvas of an explicit size with a zero background.
    pub fn new(width: u32, height: u32) -> TransformResult<Self> {
        if width == 0 || height == 0 {
            return Err(TransformError::InvalidParameters(format!(
                "canvas must be non-empty, got {}x{}",
                width, height
            )));
        }
        Ok(Self {
            width,
            height,
            fill: 0,
        })
    }

    /// Smallest canvas covering every `(width, height)` in `sizes`.
    ///
    /// Width and height are maximized independently.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::InvalidParameters`] if `sizes` is empty.
    ///
    /// # Example
    ///
    /// ```
    /// use chromarot_transform::Canvas;
    ///
    /// let canvas = Canvas::enclosing([(10, 4), (6, 9)]).unwrap();
    /// assert_eq!(canvas.dimensions(), (10, 9));
    /// ```
    pub fn enclosing<I>(sizes: I) -> TransformResult<Self>
    where
        I: IntoIterator<Item = (u32, u32)>,
    {
        let (width, height) = sizes
            .into_iter()
            .reduce(|(w0, h0), (w, h)| (w0.max(w), h0.max(h)))
            .ok_or_else(|| TransformError::InvalidParameters("no planes to enclose".into()))?;
        Self::new(width, height)
    }

    /// Set the value of canvas pixels not covered by a placed plane.
    pub fn fill(mut self, fill: u8) -> Self {
        self.fill = fill;
        self
    }

    /// Canvas width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Canvas height.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// `(width, height)` of the canvas.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Top-left position that centers a `width x height` plane.
    ///
    /// Odd remainders round down, so the extra column or row lands on the
    /// right or bottom.
    pub fn center_offset(&self, width: u32, height: u32) -> (i64, i64) {
        (
            (self.width as i64 - width as i64).div_euclid(2),
            (self.height as i64 - height as i64).div_euclid(2),
        )
    }

    /// Center `plane` on the canvas.
    ///
    /// A plane already of canvas size is returned unchanged. Larger planes
    /// are clipped symmetrically.
    pub fn place(&self, plane: Plane) -> TransformResult<Plane> {
        if plane.dimensions() == self.dimensions() {
            return Ok(plane);
        }
        let (x, y) = self.center_offset(plane.width(), plane.height());
        let mut out = Plane::new_filled(self.width, self.height, self.fill)?;
        out.paste(&plane, x, y);
        trace!(
            src_w = plane.width(),
            src_h = plane.height(),
            x,
            y,
            "place plane on canvas"
        );
        Ok(out)
    }

    /// Place every rotated plane, preserving order.
    pub fn reconcile(&self, planes: Vec<RotatedPlane>) -> TransformResult<Vec<Plane>> {
        planes
            .into_iter()
            .map(|p| self.place(p.into_plane()))
            .collect()
    }
}

/// Center a set of rotated planes on their enclosing canvas.
///
/// Returns the canvas together with the aligned planes, in input order.
pub fn reconcile(planes: Vec<RotatedPlane>) -> TransformResult<(Canvas, Vec<Plane>)> {
    let canvas = Canvas::enclosing(planes.iter().map(RotatedPlane::dimensions))?;
    let aligned = canvas.reconcile(planes)?;
    debug!(
        width = canvas.width(),
        height = canvas.height(),
        planes = aligned.len(),
        "reconcile"
    );
    Ok((canvas, aligned))
}
