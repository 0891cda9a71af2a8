//! Error types for detection-volume operations.

use skiff_core::LocalPos;
use std::fmt;

/// Errors from [`DetectionVolume`](crate::DetectionVolume) addressing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VolumeError {
    /// A position lies outside the volume on at least one axis.
    ///
    /// Surfaced to the caller rather than clamped: an over-range
    /// position means the traversal has outgrown what the volume can
    /// represent.
    OutOfBounds {
        /// The offending volume-local position.
        pos: LocalPos,
    },
}

impl fmt::Display for VolumeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds { pos } => {
                write!(f, "local position {pos} outside the detection volume")
            }
        }
    }
}

impl std::error::Error for VolumeError {}
