//! Request pipeline: per-channel rotation followed by an optional global pass
//!
//! A [`RotationRequest`] is turned into a [`RotationPlan`] once, up front.
//! Whole-image requests skip channel splitting entirely. Per-channel
//! requests go through split, independent rotation, reconciliation onto a
//! common canvas, merge, and finally a global rotation when the global
//! angle disagrees with at least one channel angle.

use crate::composite::Canvas;
use crate::rotate::{RotateOptions, RotatedPlane, normalize_angle, rotate_buffer, rotate_with_options};
use crate::TransformResult;
use chromarot_core::{
    Channel, HistogramComparison, HistogramOptions, PixelBuffer, merge, split,
};
use tracing::debug;

/// Rotation angles for one request, in degrees counter-clockwise
///
/// Channel angles default to 0, which leaves that channel in place. The
/// alpha plane is only rotated when [`RotationRequest::alpha`] is set.
///
/// # Example
///
/// ```
/// use chromarot_transform::{RotationPlan, RotationRequest};
///
/// let req = RotationRequest::new(90.0);
/// assert_eq!(req.plan(), RotationPlan::WholeImage { angle: 90.0 });
///
/// let req = RotationRequest::new(0.0).red(45.0);
/// assert!(matches!(req.plan(), RotationPlan::PerChannel { red, .. } if red == 45.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RotationRequest {
    /// Rotation applied to the whole image
    pub angle_global: f64,
    /// Independent rotation of the red plane
    pub angle_red: f64,
    /// Independent rotation of the green plane
    pub angle_green: f64,
    /// Independent rotation of the blue plane
    pub angle_blue: f64,
    /// Independent rotation of the alpha plane; `None` leaves it unrotated
    pub angle_alpha: Option<f64>,
}

impl RotationRequest {
    /// Request a whole-image rotation by `global` degrees.
    pub fn new(global: f64) -> Self {
        Self {
            angle_global: global,
            ..Default::default()
        }
    }

    /// Set the red channel angle
    pub fn red(mut self, degrees: f64) -> Self {
        self.angle_red = degrees;
        self
    }

    /// Set the green channel angle
    pub fn green(mut self, degrees: f64) -> Self {
        self.angle_green = degrees;
        self
    }

    /// Set the blue channel angle
    pub fn blue(mut self, degrees: f64) -> Self {
        self.angle_blue = degrees;
        self
    }

    /// Set the alpha channel angle
    pub fn alpha(mut self, degrees: f64) -> Self {
        self.angle_alpha = Some(degrees);
        self
    }

    /// Decide how this request is executed on a buffer with alpha.
    ///
    /// See [`RotationRequest::plan_for`].
    pub fn plan(&self) -> RotationPlan {
        self.plan_for(true)
    }

    /// Decide how this request is executed.
    ///
    /// `angle_alpha` is ignored unless the buffer being transformed
    /// carries an alpha plane.
    pub fn plan_for(&self, has_alpha: bool) -> RotationPlan {
        let alpha = self.angle_alpha.filter(|_| has_alpha);
        let rgb = [self.angle_red, self.angle_green, self.angle_blue];
        let per_channel = rgb.iter().any(|&a| normalize_angle(a) != 0.0)
            || alpha.is_some_and(|a| normalize_angle(a) != 0.0);

        if !per_channel {
            return RotationPlan::WholeImage {
                angle: self.angle_global,
            };
        }

        let global = normalize_angle(self.angle_global);
        let differs = rgb
            .iter()
            .chain(alpha.as_ref())
            .any(|&a| normalize_angle(a) != global);

        RotationPlan::PerChannel {
            red: self.angle_red,
            green: self.angle_green,
            blue: self.angle_blue,
            alpha,
            global: (global != 0.0 && differs).then_some(self.angle_global),
        }
    }
}

/// Execution strategy for a [`RotationRequest`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RotationPlan {
    /// Rotate every channel together by one angle
    WholeImage {
        /// Angle in degrees
        angle: f64,
    },
    /// Rotate channels independently, then optionally rotate the result
    PerChannel {
        /// Red angle
        red: f64,
        /// Green angle
        green: f64,
        /// Blue angle
        blue: f64,
        /// Alpha angle, `None` to leave alpha unrotated
        alpha: Option<f64>,
        /// Final whole-image pass, if one is needed
        global: Option<f64>,
    },
}

impl RotationPlan {
    /// Angle applied to `channel` in the per-channel stage.
    ///
    /// Whole-image plans report their single angle for every channel.
    pub fn angle_for(&self, channel: Channel) -> f64 {
        match *self {
            Self::WholeImage { angle } => angle,
            Self::PerChannel {
                red,
                green,
                blue,
                alpha,
                ..
            } => match channel {
                Channel::Red => red,
                Channel::Green => green,
                Channel::Blue => blue,
                Channel::Alpha => alpha.unwrap_or(0.0),
                Channel::Gray => 0.0,
            },
        }
    }
}

/// Apply a rotation request with default options.
///
/// # Example
///
/// ```
/// use chromarot_core::{ChannelLayout, PixelBuffer};
/// use chromarot_transform::{RotationRequest, transform};
///
/// let buf = PixelBuffer::new(10, 10, ChannelLayout::Rgb).unwrap();
/// let out = transform(buf, &RotationRequest::new(0.0).red(45.0)).unwrap();
/// assert_eq!(out.dimensions(), (15, 15));
/// ```
pub fn transform(source: PixelBuffer, request: &RotationRequest) -> TransformResult<PixelBuffer> {
    transform_with_options(source, request, &RotateOptions::default())
}

/// Apply a rotation request.
///
/// # Errors
///
/// Propagates plane construction and merge errors, and rejects non-finite
/// angles with [`crate::TransformError::InvalidParameters`].
pub fn transform_with_options(
    source: PixelBuffer,
    request: &RotationRequest,
    options: &RotateOptions,
) -> TransformResult<PixelBuffer> {
    // Translucent palettes become RGBA before channels are split
    let has_alpha = source.has_alpha() || source.palette().is_some_and(|p| !p.is_opaque());
    let plan = request.plan_for(has_alpha);
    debug!(?plan, layout = ?source.layout(), width = source.width(), height = source.height(), "transform");

    match plan {
        RotationPlan::WholeImage { angle } => rotate_buffer(source, angle, options),
        RotationPlan::PerChannel { global, .. } => {
            let merged = rotate_channels(source, &plan, options)?;
            match global {
                Some(angle) => {
                    debug!(angle, "global pass");
                    rotate_buffer(merged, angle, options)
                }
                None => Ok(merged),
            }
        }
    }
}

fn rotate_channels(
    source: PixelBuffer,
    plan: &RotationPlan,
    options: &RotateOptions,
) -> TransformResult<PixelBuffer> {
    let planes = split(source.to_direct_color()?)?;
    let layout = planes.layout();

    let rotated = planes
        .into_pairs()
        .into_iter()
        .map(|(channel, plane)| match (channel, plan) {
            // Unset alpha keeps its original size and is only centered
            (Channel::Alpha, RotationPlan::PerChannel { alpha: None, .. }) => {
                Ok(RotatedPlane::unrotated(plane))
            }
            _ => rotate_with_options(plane, plan.angle_for(channel), options),
        })
        .collect::<TransformResult<Vec<_>>>()?;

    let canvas = Canvas::enclosing(rotated.iter().map(RotatedPlane::dimensions))?.fill(options.fill);
    let aligned = canvas.reconcile(rotated)?;
    debug!(
        width = canvas.width(),
        height = canvas.height(),
        ?layout,
        "per-channel rotation merged"
    );
    Ok(merge(layout, aligned, canvas.dimensions())?)
}

/// Result of [`transform_with_histograms`]
#[derive(Debug, Clone)]
pub struct TransformOutput {
    /// Transformed buffer
    pub buffer: PixelBuffer,
    /// Histograms of the source and of `buffer`
    pub histograms: HistogramComparison,
}

/// Apply a request and compute before/after histograms.
///
/// Source histograms are taken before the buffer is consumed.
pub fn transform_with_histograms(
    source: PixelBuffer,
    request: &RotationRequest,
    options: &RotateOptions,
    histogram_options: &HistogramOptions,
) -> TransformResult<TransformOutput> {
    let before = chromarot_core::compute_histograms(&source, histogram_options)?;
    let buffer = transform_with_options(source, request, options)?;
    let after = chromarot_core::compute_histograms(&buffer, histogram_options)?;
    Ok(TransformOutput {
        buffer,
        histograms: HistogramComparison {
            source: before,
            result: after,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chromarot_core::ChannelLayout;

    fn numbered_rgb(w: u32, h: u32) -> PixelBuffer {
        let data: Vec<u8> = (0..w * h * 3).map(|i| (i % 251) as u8).collect();
        PixelBuffer::from_interleaved(w, h, 3, &data).unwrap()
    }

    #[test]
    fn test_plan_whole_image() {
        assert_eq!(
            RotationRequest::new(30.0).plan(),
            RotationPlan::WholeImage { angle: 30.0 }
        );
        // Multiples of 360 are not a per-channel rotation
        assert_eq!(
            RotationRequest::new(0.0).red(360.0).alpha(-720.0).plan(),
            RotationPlan::WholeImage { angle: 0.0 }
        );
    }

    #[test]
    fn test_plan_global_pass_only_when_angles_differ() {
        let req = RotationRequest::new(30.0).red(30.0).green(30.0).blue(390.0);
        assert!(matches!(req.plan(), RotationPlan::PerChannel { global: None, .. }));

        let req = RotationRequest::new(30.0).red(10.0);
        assert!(matches!(req.plan(), RotationPlan::PerChannel { global: Some(g), .. } if g == 30.0));

        let req = RotationRequest::new(0.0).red(10.0);
        assert!(matches!(req.plan(), RotationPlan::PerChannel { global: None, .. }));
    }

    #[test]
    fn test_plan_ignores_alpha_without_alpha_plane() {
        let req = RotationRequest::new(30.0).red(30.0).green(30.0).blue(30.0).alpha(10.0);
        assert!(matches!(req.plan_for(true), RotationPlan::PerChannel { global: Some(_), .. }));
        assert!(matches!(
            req.plan_for(false),
            RotationPlan::PerChannel { alpha: None, global: None, .. }
        ));
        assert_eq!(
            RotationRequest::new(0.0).alpha(10.0).plan_for(false),
            RotationPlan::WholeImage { angle: 0.0 }
        );
    }

    #[test]
    fn test_angle_for() {
        let plan = RotationRequest::new(0.0).red(5.0).blue(7.0).plan();
        assert_eq!(plan.angle_for(Channel::Red), 5.0);
        assert_eq!(plan.angle_for(Channel::Green), 0.0);
        assert_eq!(plan.angle_for(Channel::Blue), 7.0);
        assert_eq!(plan.angle_for(Channel::Alpha), 0.0);
    }

    #[test]
    fn test_identity_request() {
        let buf = numbered_rgb(6, 4);
        let out = transform(buf.clone(), &RotationRequest::default()).unwrap();
        assert_eq!(out, buf);
    }

    #[test]
    fn test_whole_image_90() {
        let buf = numbered_rgb(4, 4);
        let out = transform(buf.clone(), &RotationRequest::new(90.0)).unwrap();
        assert_eq!(out.dimensions(), (4, 4));
        for c in 0..3 {
            assert_eq!(out.planes()[c].get(0, 0), buf.planes()[c].get(3, 0));
        }
    }

    #[test]
    fn test_per_channel_quarter_turns_keep_square_size() {
        let buf = numbered_rgb(5, 5);
        let req = RotationRequest::new(0.0).red(90.0).green(180.0);
        let out = transform(buf.clone(), &req).unwrap();
        assert_eq!(out.dimensions(), (5, 5));
        assert_eq!(out.planes()[2], buf.planes()[2]);
        assert_eq!(out.planes()[1].get(0, 0), buf.planes()[1].get(4, 4));
    }

    #[test]
    fn test_gray_promoted_for_per_channel() {
        let buf = PixelBuffer::new(4, 2, ChannelLayout::Gray).unwrap();
        let out = transform(buf, &RotationRequest::new(0.0).green(90.0)).unwrap();
        assert_eq!(out.layout(), ChannelLayout::Rgb);
        assert_eq!(out.dimensions(), (4, 4));
    }

    #[test]
    fn test_alpha_unrotated_by_default() {
        let data: Vec<u8> = (0..4 * 2).flat_map(|i| [10, 20, 30, i as u8]).collect();
        let buf = PixelBuffer::from_interleaved(4, 2, 4, &data).unwrap();
        let out = transform(buf, &RotationRequest::new(0.0).red(90.0)).unwrap();
        assert_eq!(out.layout(), ChannelLayout::Rgba);
        assert_eq!(out.dimensions(), (4, 4));
        // Alpha stays upright, centered vertically
        let alpha = out.plane(Channel::Alpha).unwrap();
        assert_eq!(alpha.row(0), &[0, 0, 0, 0]);
        assert_eq!(alpha.row(1), &[0, 1, 2, 3]);
        assert_eq!(alpha.row(2), &[4, 5, 6, 7]);
    }

    #[test]
    fn test_non_finite_angle_rejected() {
        let buf = numbered_rgb(2, 2);
        assert!(transform(buf, &RotationRequest::new(0.0).red(f64::INFINITY)).is_err());
    }

    #[test]
    fn test_histograms_before_and_after() {
        let buf = numbered_rgb(8, 8);
        let out = transform_with_histograms(
            buf,
            &RotationRequest::new(90.0),
            &RotateOptions::default(),
            &HistogramOptions::default(),
        )
        .unwrap();
        // A lossless rotation permutes pixels, so histograms agree
        assert_eq!(out.histograms.source, out.histograms.result);
        assert_eq!(out.histograms.source.len(), 3);
    }
}
