//! The connectivity scanner: a bounded 14-direction flood fill with
//! inline classification.
//!
//! The scanner owns no state between calls. It consumes a fresh
//! [`DetectionVolume`] and a compiled [`BlockClassifier`], walks the
//! connected component around the anchor with a LIFO frontier, and
//! either produces a [`ScanOutcome`] or aborts with a terminal
//! [`DetectError`]. Aborts discard the scan entirely — no partial
//! results escape.

use log::debug;
use smallvec::SmallVec;

use skiff_core::{ActorIdentity, DetectError, LocalPos, NotificationSink, WorldAccessor, WorldPos};
use skiff_space::{DetectionVolume, FrontierStack, PackedPos, VolumeError, VoxelState};

use crate::classifier::BlockClassifier;

/// First sign line marking a pilot-locked craft.
pub const PILOT_MARKER: &str = "pilot:";

/// Connectivity model: axis-aligned horizontal steps, each optionally
/// combined with a vertical step, plus pure vertical steps. Both
/// horizontal components nonzero is excluded, giving 14 directions
/// rather than 6 or 26.
const NEIGHBOUR_OFFSETS: [(i32, i32, i32); 14] = [
    (-1, -1, 0),
    (-1, 0, 0),
    (-1, 1, 0),
    (1, -1, 0),
    (1, 0, 0),
    (1, 1, 0),
    (0, -1, -1),
    (0, 0, -1),
    (0, 1, -1),
    (0, -1, 1),
    (0, 0, 1),
    (0, 1, 1),
    (0, -1, 0),
    (0, 1, 0),
];

/// All four horizontal face neighbours, used by the paired-placement
/// check against world space.
const HORIZONTAL_OFFSETS: [(i32, i32); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Raw output of a completed scan, in volume-local coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScanOutcome {
    /// Minimum accepted extent per axis.
    pub min: LocalPos,
    /// Maximum accepted extent per axis.
    pub max: LocalPos,
    /// Total accepted voxel count.
    pub total: usize,
    /// Whether any reached voxel was water-family.
    pub water_contact: bool,
    /// Accepted voxels belonging to the dynamic-speed family.
    pub dynamic_count: usize,
}

/// The flood-fill engine.
pub struct ConnectivityScanner<'a> {
    world: &'a dyn WorldAccessor,
    actor: &'a dyn ActorIdentity,
    notifier: &'a dyn NotificationSink,
}

impl<'a> ConnectivityScanner<'a> {
    /// Create a scanner over the given collaborators.
    pub fn new(
        world: &'a dyn WorldAccessor,
        actor: &'a dyn ActorIdentity,
        notifier: &'a dyn NotificationSink,
    ) -> Self {
        Self {
            world,
            actor,
            notifier,
        }
    }

    /// The 14 neighbours of a packed position.
    fn neighbours(pos: PackedPos) -> SmallVec<[PackedPos; 14]> {
        NEIGHBOUR_OFFSETS
            .iter()
            .map(|&(dx, dy, dz)| pos.step(dx, dy, dz))
            .collect()
    }

    /// Walk the connected component around the volume's anchor.
    ///
    /// Classification happens inline: every popped voxel is folded into
    /// the classifier's quota counters and the running extent before
    /// its neighbours are scheduled. Any abort condition is terminal.
    pub fn scan(
        &self,
        volume: &mut DetectionVolume,
        classifier: &mut BlockClassifier,
    ) -> Result<ScanOutcome, DetectError> {
        let start = volume.anchor_local();
        let mut frontier = FrontierStack::with_capacity(1024);
        frontier.push(PackedPos::encode(start).raw());

        let mut min = start;
        let mut max = start;
        let mut total = 0usize;
        let mut dynamic_count = 0usize;
        let mut water_contact = false;

        while let Some(raw) = frontier.pop() {
            let packed = PackedPos::from_raw(raw);
            let pos = packed.decode();

            let state = match volume.state(pos) {
                Ok(state) => state,
                Err(VolumeError::OutOfBounds { pos }) => {
                    self.notifier
                        .notify("detection: structure extends beyond the detection volume");
                    return Err(DetectError::OutOfRange { pos });
                }
            };
            if state != VoxelState::NotVisited {
                continue;
            }

            let world_pos = volume.local_to_world(pos);
            let material = self.world.material_at(world_pos);

            if classifier.is_water(material) {
                water_contact = true;
            } else if classifier.is_sign(material) {
                self.check_sign(classifier, world_pos)?;
            }

            if classifier.is_forbidden(material) {
                self.notifier.notify("detection: forbidden material found");
                return Err(DetectError::ForbiddenMaterial {
                    material,
                    pos: world_pos,
                });
            }

            if !classifier.is_allowed(material) {
                // Terminal state; never revisited, neighbours stay
                // unscheduled.
                volume.set_state(pos, VoxelState::Rejected).map_err(oob)?;
                continue;
            }

            if classifier.is_paired(material) {
                for (dx, dz) in HORIZONTAL_OFFSETS {
                    if self.world.material_at(world_pos.offset(dx, 0, dz)) == material {
                        self.notifier
                            .notify("detection: paired blocks may not be placed side by side");
                        return Err(DetectError::IllegalPairedPlacement {
                            material,
                            pos: world_pos,
                        });
                    }
                }
            }

            if classifier.is_dynamic(material) {
                dynamic_count += 1;
            }

            volume.set_state(pos, VoxelState::Accepted).map_err(oob)?;
            total += 1;
            classifier.record_quota(material);

            min.x = min.x.min(pos.x);
            min.y = min.y.min(pos.y);
            min.z = min.z.min(pos.z);
            max.x = max.x.max(pos.x);
            max.y = max.y.max(pos.y);
            max.z = max.z.max(pos.z);

            if total > classifier.max_size() {
                self.notifier.notify(&format!(
                    "detection: craft too large (maximum {} blocks)",
                    classifier.max_size()
                ));
                return Err(DetectError::TooLarge {
                    count: total,
                    max: classifier.max_size(),
                });
            }

            for neighbour in Self::neighbours(packed) {
                frontier.push(neighbour.raw());
            }
        }

        debug!(
            "scan complete: {total} voxels, extent {min}..{max}, water contact {water_contact}"
        );
        Ok(ScanOutcome {
            min,
            max,
            total,
            water_contact,
            dynamic_count,
        })
    }

    /// Pilot-lock and forbidden-text checks for a sign voxel.
    ///
    /// Neither check changes the sign's own accept/reject
    /// classification. The forbidden-text match is advisory only: it
    /// notifies but never aborts, unlike forbidden materials.
    fn check_sign(
        &self,
        classifier: &BlockClassifier,
        pos: WorldPos,
    ) -> Result<(), DetectError> {
        let lines = self.world.sign_lines_at(pos);
        let lines: SmallVec<[String; 4]> =
            lines.iter().map(|line| line.to_lowercase()).collect();

        let mut unauthorized = false;
        if lines[0] == PILOT_MARKER {
            if let Some(name) = self.actor.name() {
                let name = name.to_lowercase();
                let listed = lines[1..].iter().any(|line| *line == name);
                unauthorized = !listed && !self.actor.has_override();
            }
        }

        // The advisory scan covers every line even when the pilot check
        // fails below.
        for line in &lines {
            if classifier.forbidden_text_matches(line) {
                self.notifier.notify("detection: forbidden sign text found");
            }
        }

        if unauthorized {
            self.notifier
                .notify("detection: you are not a registered pilot of this craft");
            return Err(DetectError::UnauthorizedPilot { pos });
        }
        Ok(())
    }
}

/// The volume bounds were checked when the position was popped, so a
/// write can only fail if that invariant breaks; surface it as the
/// traversal error rather than panicking.
fn oob(err: VolumeError) -> DetectError {
    let VolumeError::OutOfBounds { pos } = err;
    DetectError::OutOfRange { pos }
}
