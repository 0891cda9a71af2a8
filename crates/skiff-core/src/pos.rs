//! Coordinate types for world space and detection-volume space.

use std::fmt;

/// An absolute position in the voxel world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WorldPos {
    /// East-west axis.
    pub x: i32,
    /// Vertical axis.
    pub y: i32,
    /// North-south axis.
    pub z: i32,
}

impl WorldPos {
    /// Construct a world position.
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// This position shifted by the given per-axis offsets.
    pub const fn offset(self, dx: i32, dy: i32, dz: i32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.z + dz)
    }
}

impl fmt::Display for WorldPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// A position in detection-volume-local coordinates.
///
/// Local coordinates are non-negative inside the volume; values outside
/// the volume's extents (including negatives) are representable so that
/// traversal steps off the edge can be detected rather than clamped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LocalPos {
    /// East-west axis, volume-local.
    pub x: i32,
    /// Vertical axis, volume-local.
    pub y: i32,
    /// North-south axis, volume-local.
    pub z: i32,
}

impl LocalPos {
    /// Construct a local position.
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }
}

impl fmt::Display for LocalPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}
