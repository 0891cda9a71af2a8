//! Packed frontier encoding of volume-local positions.
//!
//! The traversal frontier holds millions of pending positions in the
//! worst case, so positions cross that boundary as a single `u32`
//! rather than a three-field struct. The packing lives only here;
//! everything else works with [`LocalPos`].

use skiff_core::LocalPos;

/// Field widths: x in bits 0..11, z in bits 11..22, y in bits 22..32.
///
/// Each field strictly exceeds its volume extent (672 < 2048 for x/z,
/// 256 < 1024 for y), so a ±1 step that leaves the volume decodes to a
/// value the volume rejects as out of bounds instead of wrapping onto a
/// valid coordinate.
const X_BITS: u32 = 11;
const Z_BITS: u32 = 11;

const X_MASK: u32 = (1 << X_BITS) - 1;
const Z_MASK: u32 = (1 << Z_BITS) - 1;
const Y_MASK: u32 = (1 << (32 - X_BITS - Z_BITS)) - 1;

const Z_SHIFT: u32 = X_BITS;
const Y_SHIFT: u32 = X_BITS + Z_BITS;

/// A volume-local position packed into 32 bits for the frontier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PackedPos(u32);

impl PackedPos {
    /// Pack a local position.
    ///
    /// Coordinates are masked to their field widths; positions outside
    /// the encodable range (negative, or past a field's extent) decode
    /// to an out-of-bounds local position and are caught by the volume
    /// bounds check downstream.
    pub fn encode(pos: LocalPos) -> Self {
        let x = (pos.x as u32) & X_MASK;
        let z = (pos.z as u32) & Z_MASK;
        let y = (pos.y as u32) & Y_MASK;
        Self(x | (z << Z_SHIFT) | (y << Y_SHIFT))
    }

    /// Unpack into named fields.
    ///
    /// Always succeeds; the decoded coordinates may lie outside the
    /// detection volume, which the volume itself reports.
    pub fn decode(self) -> LocalPos {
        LocalPos::new(
            (self.0 & X_MASK) as i32,
            ((self.0 >> Y_SHIFT) & Y_MASK) as i32,
            ((self.0 >> Z_SHIFT) & Z_MASK) as i32,
        )
    }

    /// This position stepped by one voxel along each given axis delta.
    ///
    /// Deltas are limited to ±1. A step off a field's low edge borrows
    /// into the neighbouring field, but the borrowed-from decode is
    /// itself out of volume bounds, so the error is still caught.
    pub fn step(self, dx: i32, dy: i32, dz: i32) -> Self {
        debug_assert!(dx.abs() <= 1 && dy.abs() <= 1 && dz.abs() <= 1);
        let delta = (dx as u32)
            .wrapping_add((dz as u32) << Z_SHIFT)
            .wrapping_add((dy as u32) << Y_SHIFT);
        Self(self.0.wrapping_add(delta))
    }

    /// The raw packed word, as stored on the frontier.
    pub fn raw(self) -> u32 {
        self.0
    }

    /// Rebuild from a raw frontier word.
    pub fn from_raw(raw: u32) -> Self {
        Self(raw)
    }
}
