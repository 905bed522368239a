//! Channel splitting and merging
//!
//! [`split`] breaks a buffer into independent [`Plane`]s, one per channel;
//! [`merge`] reassembles equally sized planes into a buffer. Planes handed
//! to `merge` must already share one canvas size; reconciling planes of
//! different sizes is the compositor's job, not the merger's.

use crate::buffer::{Channel, ChannelLayout, PixelBuffer};
use crate::convert::RemovePaletteTarget;
use crate::error::{Error, Result};
use crate::plane::Plane;

/// Planes of a split buffer, addressable by [`Channel`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelPlanes {
    layout: ChannelLayout,
    planes: Vec<Plane>,
}

impl ChannelPlanes {
    /// Layout the planes were split from.
    #[inline]
    pub fn layout(&self) -> ChannelLayout {
        self.layout
    }

    /// Plane for `channel`, if present.
    pub fn get(&self, channel: Channel) -> Option<&Plane> {
        self.layout.index_of(channel).map(|i| &self.planes[i])
    }

    /// Number of planes.
    #[inline]
    pub fn len(&self) -> usize {
        self.planes.len()
    }

    /// Always false; a split yields at least one plane.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.planes.is_empty()
    }

    /// Iterate `(channel, plane)` pairs in storage order.
    pub fn iter(&self) -> impl Iterator<Item = (Channel, &Plane)> {
        self.layout.channels().iter().copied().zip(self.planes.iter())
    }

    /// Consume into `(channel, plane)` pairs in storage order.
    pub fn into_pairs(self) -> Vec<(Channel, Plane)> {
        self.layout
            .channels()
            .iter()
            .copied()
            .zip(self.planes)
            .collect()
    }
}

/// Split a buffer into one plane per channel.
///
/// Indexed buffers are first expanded to direct color so palette indices
/// are never treated as a color plane. An alpha plane is carried through
/// untouched.
///
/// # Examples
///
/// ```
/// use chromarot_core::{Channel, PixelBuffer, split};
///
/// let buf = PixelBuffer::from_interleaved(1, 1, 3, &[1, 2, 3]).unwrap();
/// let planes = split(buf).unwrap();
/// assert_eq!(planes.get(Channel::Green).unwrap().get(0, 0), Some(2));
/// ```
pub fn split(buffer: PixelBuffer) -> Result<ChannelPlanes> {
    let buffer = buffer.remove_palette(RemovePaletteTarget::BasedOnSrc)?;
    let (layout, planes, _) = buffer.into_parts();
    tracing::trace!(?layout, planes = planes.len(), "split");
    Ok(ChannelPlanes { layout, planes })
}

/// Merge equally sized planes into a buffer.
///
/// # Arguments
///
/// * `layout` - Channel layout of the result
/// * `planes` - One plane per channel of `layout`, in storage order
/// * `target_size` - `(width, height)` every plane must have
///
/// # Errors
///
/// - [`Error::UnsupportedChannelCount`] if the number of planes does not fit `layout`
/// - [`Error::ShapeMismatch`] if any plane differs from `target_size`
pub fn merge(layout: ChannelLayout, planes: Vec<Plane>, target_size: (u32, u32)) -> Result<PixelBuffer> {
    if planes.len() != layout.channel_count() as usize {
        return Err(Error::UnsupportedChannelCount(planes.len() as u32));
    }
    if let Some(bad) = planes.iter().find(|p| p.dimensions() != target_size) {
        return Err(Error::ShapeMismatch {
            expected: target_size,
            actual: bad.dimensions(),
        });
    }
    PixelBuffer::from_planes(layout, planes)
}

/// Merge the planes of a [`ChannelPlanes`] back into a buffer.
pub fn merge_planes(planes: ChannelPlanes, target_size: (u32, u32)) -> Result<PixelBuffer> {
    merge(planes.layout, planes.planes, target_size)
}
