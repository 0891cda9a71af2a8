//! The chunked sparse detection volume.
//!
//! A fixed 672×256×672 cuboid of visitation state, horizontally
//! centered on the detection anchor and spanning the full world height.
//! The volume is divided into 32×16×32 chunks whose backing buffers are
//! allocated on first write, so a compact craft touches only a handful
//! of the 21×16×21 chunks.

use crate::error::VolumeError;
use skiff_core::{LocalPos, WorldPos};

/// Chunk extent exponents per axis.
pub const CHUNK_BITS_X: u32 = 5;
/// Vertical chunk extent exponent.
pub const CHUNK_BITS_Y: u32 = 4;
/// North-south chunk extent exponent.
pub const CHUNK_BITS_Z: u32 = 5;

/// Chunk extent along x (32 voxels).
pub const CHUNK_SIZE_X: i32 = 1 << CHUNK_BITS_X;
/// Chunk extent along y (16 voxels).
pub const CHUNK_SIZE_Y: i32 = 1 << CHUNK_BITS_Y;
/// Chunk extent along z (32 voxels).
pub const CHUNK_SIZE_Z: i32 = 1 << CHUNK_BITS_Z;

/// Chunks per axis. Odd horizontal counts keep the anchor's chunk at
/// the exact center of the volume.
pub const CHUNK_COUNT_X: i32 = 21;
/// Vertical chunk count: full 256-voxel world height.
pub const CHUNK_COUNT_Y: i32 = 16;
/// North-south chunk count.
pub const CHUNK_COUNT_Z: i32 = 21;

/// Volume extent along x, in voxels.
pub const VOLUME_SIZE_X: i32 = CHUNK_SIZE_X * CHUNK_COUNT_X;
/// Volume extent along y, in voxels.
pub const VOLUME_SIZE_Y: i32 = CHUNK_SIZE_Y * CHUNK_COUNT_Y;
/// Volume extent along z, in voxels.
pub const VOLUME_SIZE_Z: i32 = CHUNK_SIZE_Z * CHUNK_COUNT_Z;

/// Horizontal center of the volume: the anchor's local x.
pub const VOLUME_HALF_X: i32 = VOLUME_SIZE_X / 2;
/// Horizontal center of the volume: the anchor's local z.
pub const VOLUME_HALF_Z: i32 = VOLUME_SIZE_Z / 2;

const CHUNK_LEN: usize = (CHUNK_SIZE_X * CHUNK_SIZE_Y * CHUNK_SIZE_Z) as usize;
const CHUNK_GRID_LEN: usize = (CHUNK_COUNT_X * CHUNK_COUNT_Y * CHUNK_COUNT_Z) as usize;

/// Per-voxel visitation state.
///
/// State is monotonic: a voxel moves from `NotVisited` to exactly one
/// terminal state and is never overwritten.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum VoxelState {
    /// Not yet reached by the traversal.
    #[default]
    NotVisited,
    /// Reached, but not part of the craft.
    Rejected,
    /// Reached and accepted into the craft.
    Accepted,
}

/// Sparse tri-state voxel index over the detection volume.
pub struct DetectionVolume {
    /// Lazily allocated chunk buffers, indexed by chunk grid position.
    chunks: Vec<Option<Box<[VoxelState]>>>,
    anchor: WorldPos,
}

impl DetectionVolume {
    /// Create an empty volume horizontally centered on `anchor`.
    ///
    /// No chunk storage is allocated until the first write.
    pub fn new(anchor: WorldPos) -> Self {
        let mut chunks = Vec::new();
        chunks.resize_with(CHUNK_GRID_LEN, || None);
        Self { chunks, anchor }
    }

    /// The world-space anchor this volume is centered on.
    pub fn anchor(&self) -> WorldPos {
        self.anchor
    }

    /// The anchor's volume-local position: horizontal center, own
    /// vertical coordinate.
    pub fn anchor_local(&self) -> LocalPos {
        LocalPos::new(VOLUME_HALF_X, self.anchor.y, VOLUME_HALF_Z)
    }

    /// Whether a local position lies inside the volume.
    pub fn contains(&self, pos: LocalPos) -> bool {
        (0..VOLUME_SIZE_X).contains(&pos.x)
            && (0..VOLUME_SIZE_Y).contains(&pos.y)
            && (0..VOLUME_SIZE_Z).contains(&pos.z)
    }

    /// Convert a volume-local position to world space.
    pub fn local_to_world(&self, pos: LocalPos) -> WorldPos {
        WorldPos::new(
            self.anchor.x + pos.x - VOLUME_HALF_X,
            pos.y,
            self.anchor.z + pos.z - VOLUME_HALF_Z,
        )
    }

    /// Convert a world position to volume-local space.
    pub fn world_to_local(&self, pos: WorldPos) -> LocalPos {
        LocalPos::new(
            pos.x - self.anchor.x + VOLUME_HALF_X,
            pos.y,
            pos.z - self.anchor.z + VOLUME_HALF_Z,
        )
    }

    /// The visitation state at `pos`.
    ///
    /// Unallocated chunks read as `NotVisited`. Out-of-volume positions
    /// are an error, never clamped.
    pub fn state(&self, pos: LocalPos) -> Result<VoxelState, VolumeError> {
        let (chunk_index, voxel_index) = self.indices(pos)?;
        Ok(match &self.chunks[chunk_index] {
            Some(chunk) => chunk[voxel_index],
            None => VoxelState::NotVisited,
        })
    }

    /// Record a terminal visitation state at `pos`, allocating the
    /// owning chunk on first write.
    pub fn set_state(&mut self, pos: LocalPos, state: VoxelState) -> Result<(), VolumeError> {
        let (chunk_index, voxel_index) = self.indices(pos)?;
        let chunk = self.chunks[chunk_index]
            .get_or_insert_with(|| vec![VoxelState::NotVisited; CHUNK_LEN].into_boxed_slice());
        debug_assert_eq!(
            chunk[voxel_index],
            VoxelState::NotVisited,
            "voxel state is monotonic"
        );
        chunk[voxel_index] = state;
        Ok(())
    }

    /// Number of chunk buffers currently allocated.
    pub fn allocated_chunks(&self) -> usize {
        self.chunks.iter().filter(|c| c.is_some()).count()
    }

    fn indices(&self, pos: LocalPos) -> Result<(usize, usize), VolumeError> {
        if !self.contains(pos) {
            return Err(VolumeError::OutOfBounds { pos });
        }
        let cx = pos.x >> CHUNK_BITS_X;
        let cy = pos.y >> CHUNK_BITS_Y;
        let cz = pos.z >> CHUNK_BITS_Z;
        let chunk_index = cx + CHUNK_COUNT_X * (cz + CHUNK_COUNT_Z * cy);

        let bx = pos.x & (CHUNK_SIZE_X - 1);
        let by = pos.y & (CHUNK_SIZE_Y - 1);
        let bz = pos.z & (CHUNK_SIZE_Z - 1);
        let voxel_index = bx + CHUNK_SIZE_X * (bz + CHUNK_SIZE_Z * by);

        Ok((chunk_index as usize, voxel_index as usize))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn anchor() -> WorldPos {
        WorldPos::new(1000, 64, -2000)
    }

    #[test]
    fn chunk_grid_covers_volume_exactly() {
        assert_eq!(CHUNK_SIZE_X * CHUNK_COUNT_X, VOLUME_SIZE_X);
        assert_eq!(CHUNK_SIZE_Y * CHUNK_COUNT_Y, VOLUME_SIZE_Y);
        assert_eq!(CHUNK_SIZE_Z * CHUNK_COUNT_Z, VOLUME_SIZE_Z);
    }

    #[test]
    fn anchor_maps_to_horizontal_center() {
        let v = DetectionVolume::new(anchor());
        let local = v.anchor_local();
        assert_eq!(local, LocalPos::new(VOLUME_HALF_X, 64, VOLUME_HALF_Z));
        assert_eq!(v.local_to_world(local), anchor());
    }

    #[test]
    fn world_local_roundtrip() {
        let v = DetectionVolume::new(anchor());
        let w = WorldPos::new(1010, 70, -2015);
        assert_eq!(v.local_to_world(v.world_to_local(w)), w);
    }

    #[test]
    fn fresh_volume_reads_not_visited_without_allocating() {
        let v = DetectionVolume::new(anchor());
        assert_eq!(
            v.state(LocalPos::new(0, 0, 0)).unwrap(),
            VoxelState::NotVisited
        );
        assert_eq!(v.allocated_chunks(), 0);
    }

    #[test]
    fn set_state_allocates_only_the_owning_chunk() {
        let mut v = DetectionVolume::new(anchor());
        v.set_state(LocalPos::new(5, 5, 5), VoxelState::Accepted)
            .unwrap();
        assert_eq!(v.allocated_chunks(), 1);
        assert_eq!(
            v.state(LocalPos::new(5, 5, 5)).unwrap(),
            VoxelState::Accepted
        );
        // Same chunk: no second allocation.
        v.set_state(LocalPos::new(6, 5, 5), VoxelState::Rejected)
            .unwrap();
        assert_eq!(v.allocated_chunks(), 1);
        // Different chunk.
        v.set_state(LocalPos::new(100, 5, 5), VoxelState::Accepted)
            .unwrap();
        assert_eq!(v.allocated_chunks(), 2);
    }

    #[test]
    fn out_of_bounds_is_an_error_not_a_clamp() {
        let mut v = DetectionVolume::new(anchor());
        for pos in [
            LocalPos::new(-1, 0, 0),
            LocalPos::new(VOLUME_SIZE_X, 0, 0),
            LocalPos::new(0, -1, 0),
            LocalPos::new(0, VOLUME_SIZE_Y, 0),
            LocalPos::new(0, 0, -1),
            LocalPos::new(0, 0, VOLUME_SIZE_Z),
        ] {
            assert_eq!(v.state(pos), Err(VolumeError::OutOfBounds { pos }));
            assert_eq!(
                v.set_state(pos, VoxelState::Accepted),
                Err(VolumeError::OutOfBounds { pos })
            );
        }
    }

    proptest! {
        #[test]
        fn state_reads_back_what_was_written(
            x in 0i32..VOLUME_SIZE_X,
            y in 0i32..VOLUME_SIZE_Y,
            z in 0i32..VOLUME_SIZE_Z,
            accepted in proptest::bool::ANY,
        ) {
            let mut v = DetectionVolume::new(anchor());
            let pos = LocalPos::new(x, y, z);
            let state = if accepted { VoxelState::Accepted } else { VoxelState::Rejected };
            v.set_state(pos, state).unwrap();
            prop_assert_eq!(v.state(pos).unwrap(), state);
        }

        #[test]
        fn distinct_positions_use_distinct_slots(
            x in 0i32..VOLUME_SIZE_X, y in 0i32..VOLUME_SIZE_Y, z in 0i32..VOLUME_SIZE_Z,
            dx in -1i32..=1, dy in -1i32..=1, dz in -1i32..=1,
        ) {
            prop_assume!((dx, dy, dz) != (0, 0, 0));
            let other = LocalPos::new(x + dx, y + dy, z + dz);
            let mut v = DetectionVolume::new(anchor());
            let pos = LocalPos::new(x, y, z);
            v.set_state(pos, VoxelState::Accepted).unwrap();
            if v.contains(other) {
                prop_assert_eq!(v.state(other).unwrap(), VoxelState::NotVisited);
            }
        }
    }
}
