//! chromarot-transform - Rotation and compositing for chromarot
//!
//! This crate provides:
//!
//! - Expand-to-fit rotation of single planes and whole buffers
//! - Exact orthogonal rotations (90, 180, 270 degrees)
//! - Canvas reconciliation of planes with differing sizes
//! - The per-channel rotation pipeline ([`transform`])

pub mod composite;
mod error;
pub mod pipeline;
pub mod rotate;

pub use composite::{Canvas, reconcile};
pub use error::{TransformError, TransformResult};
pub use pipeline::{
    RotationPlan, RotationRequest, TransformOutput, transform, transform_with_histograms,
    transform_with_options,
};
pub use rotate::{
    Interpolation, RotateOptions, RotatedPlane, normalize_angle, rotate, rotate_90, rotate_180,
    rotate_buffer, rotate_with_options, rotated_bounds,
};
