//! Dense occupancy output of a successful detection.

use skiff_core::{LocalPos, WorldPos};
use skiff_space::{DetectionVolume, VoxelState};

/// Dense boolean occupancy over the accepted bounding box.
///
/// Cells are ordered x fastest, then z, then y: the flat index of
/// `(x, y, z)` is `x + size_x * (z + size_z * y)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OccupancyMask {
    size_x: usize,
    size_y: usize,
    size_z: usize,
    cells: Vec<bool>,
}

impl OccupancyMask {
    /// Materialise the accepted voxels of `volume` within the local
    /// bounding box `[min, max]` (inclusive).
    ///
    /// Unallocated chunks inside the box read as unoccupied.
    pub fn from_volume(volume: &DetectionVolume, min: LocalPos, max: LocalPos) -> Self {
        let size_x = (max.x - min.x + 1) as usize;
        let size_y = (max.y - min.y + 1) as usize;
        let size_z = (max.z - min.z + 1) as usize;
        let mut cells = Vec::with_capacity(size_x * size_y * size_z);
        for y in min.y..=max.y {
            for z in min.z..=max.z {
                for x in min.x..=max.x {
                    let occupied = matches!(
                        volume.state(LocalPos::new(x, y, z)),
                        Ok(VoxelState::Accepted)
                    );
                    cells.push(occupied);
                }
            }
        }
        Self {
            size_x,
            size_y,
            size_z,
            cells,
        }
    }

    /// Bounding-box extent per axis.
    pub fn size(&self) -> (usize, usize, usize) {
        (self.size_x, self.size_y, self.size_z)
    }

    /// Whether the cell at box-relative `(x, y, z)` is occupied.
    pub fn get(&self, x: usize, y: usize, z: usize) -> bool {
        debug_assert!(x < self.size_x && y < self.size_y && z < self.size_z);
        self.cells[x + self.size_x * (z + self.size_z * y)]
    }

    /// The raw cell array in x-fastest order.
    pub fn cells(&self) -> &[bool] {
        &self.cells
    }

    /// Box-relative coordinates of every occupied cell, in cell order.
    pub fn iter_occupied(&self) -> impl Iterator<Item = (usize, usize, usize)> + '_ {
        self.cells.iter().enumerate().filter_map(|(i, &occupied)| {
            occupied.then(|| {
                let x = i % self.size_x;
                let z = (i / self.size_x) % self.size_z;
                let y = i / (self.size_x * self.size_z);
                (x, y, z)
            })
        })
    }

    /// Number of occupied cells.
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }
}

/// The assembled output of a successful detection.
///
/// Constructed once per successful call, owned exclusively by the
/// caller, immutable after construction. Never built on a failure path.
#[derive(Clone, Debug, PartialEq)]
pub struct DetectionResult {
    /// World-space minimum corner of the craft's bounding box.
    pub origin: WorldPos,
    /// Dense occupancy over the bounding box.
    pub mask: OccupancyMask,
    /// Total accepted voxel count.
    pub total: usize,
    /// Dynamic speed multiplier; `0.0` when no dynamic family is
    /// configured.
    pub speed_multiplier: f64,
}

impl DetectionResult {
    /// Bounding-box extent per axis.
    pub fn size(&self) -> (usize, usize, usize) {
        self.mask.size()
    }

    /// World-space maximum corner of the bounding box (inclusive).
    pub fn max_corner(&self) -> WorldPos {
        let (sx, sy, sz) = self.mask.size();
        WorldPos::new(
            self.origin.x + sx as i32 - 1,
            self.origin.y + sy as i32 - 1,
            self.origin.z + sz as i32 - 1,
        )
    }

    /// World position of a box-relative cell.
    pub fn cell_world_pos(&self, x: usize, y: usize, z: usize) -> WorldPos {
        self.origin.offset(x as i32, y as i32, z as i32)
    }
}
