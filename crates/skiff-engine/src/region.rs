//! Protected-region clearance for a detected craft.

use log::debug;

use skiff_core::{ActorIdentity, DetectError, NotificationSink, RegionProvider};

use crate::mask::DetectionResult;

/// Checks the detected occupancy against protected regions.
///
/// Constructed only when a region provider is configured; the check is
/// skipped entirely otherwise.
pub struct RegionConstraintChecker<'a> {
    provider: &'a dyn RegionProvider,
    actor: &'a dyn ActorIdentity,
    notifier: &'a dyn NotificationSink,
}

impl<'a> RegionConstraintChecker<'a> {
    /// Create a checker over the given collaborators.
    pub fn new(
        provider: &'a dyn RegionProvider,
        actor: &'a dyn ActorIdentity,
        notifier: &'a dyn NotificationSink,
    ) -> Self {
        Self {
            provider,
            actor,
            notifier,
        }
    }

    /// Deny detection if any occupied voxel lies inside a region that
    /// requires pilot authorization the actor lacks.
    ///
    /// Regions are pre-filtered by bounding-box overlap; only the
    /// overlapping ones pay the per-voxel membership test.
    pub fn check(&self, result: &DetectionResult) -> Result<(), DetectError> {
        let regions = self
            .provider
            .regions_overlapping(result.origin, result.max_corner());
        debug!("region clearance: {} overlapping region(s)", regions.len());

        for region in regions {
            if !region.requires_pilot_authorization(self.actor) {
                continue;
            }
            for (x, y, z) in result.mask.iter_occupied() {
                let pos = result.cell_world_pos(x, y, z);
                if region.contains(pos) {
                    self.notifier
                        .notify("detection: craft overlaps a protected region");
                    return Err(DetectError::RegionDenied { pos });
                }
            }
        }
        Ok(())
    }
}
