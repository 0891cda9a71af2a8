//! Collaborator contracts through which the detector reaches its host.
//!
//! All collaborators are injected explicitly (constructor or call-site
//! parameters), never reached through ambient globals, so the scanner
//! stays unit-testable against synthetic in-memory implementations.

use crate::id::MaterialId;
use crate::pos::WorldPos;

/// Read-only access to the voxel world during a scan.
///
/// Implementations are responsible for loading or caching whatever
/// underlying storage backs the coordinates; every coordinate inside
/// the detection volume must be safe to query.
pub trait WorldAccessor {
    /// The material occupying the given world position.
    fn material_at(&self, pos: WorldPos) -> MaterialId;

    /// The four text lines of the sign at the given position.
    ///
    /// Only called for positions whose material is in the policy's sign
    /// set. Positions without readable text return empty lines.
    fn sign_lines_at(&self, pos: WorldPos) -> [String; 4];
}

/// Identity of the actor requesting detection.
pub trait ActorIdentity {
    /// The actor's name, if a named actor is present.
    ///
    /// `None` models automated detection with no requesting actor; the
    /// pilot-lock sign check is skipped in that case.
    fn name(&self) -> Option<&str>;

    /// Whether the actor may bypass pilot-lock signs.
    fn has_override(&self) -> bool;
}

/// Fire-and-forget delivery of human-readable detection messages.
///
/// The detector never consults a return value; delivery failures are
/// the sink's problem.
pub trait NotificationSink {
    /// Deliver one message.
    fn notify(&self, message: &str);
}

/// A protected region that may deny detection inside its geometry.
pub trait ProtectedRegion {
    /// Minimum corner of the region's bounding box (inclusive).
    fn min(&self) -> WorldPos;

    /// Maximum corner of the region's bounding box (inclusive).
    fn max(&self) -> WorldPos;

    /// Whether this region requires explicit pilot authorization the
    /// given actor does not hold.
    fn requires_pilot_authorization(&self, actor: &dyn ActorIdentity) -> bool;

    /// Whether the given world position lies inside the region geometry
    /// (which may be narrower than the bounding box).
    fn contains(&self, pos: WorldPos) -> bool;
}

/// Enumerates protected regions overlapping a bounding box.
pub trait RegionProvider {
    /// Regions whose bounds overlap the box `[min, max]` (inclusive).
    fn regions_overlapping(&self, min: WorldPos, max: WorldPos) -> Vec<&dyn ProtectedRegion>;
}

/// Vertical limits imposed by a land-claim policy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HeightLimits {
    /// Lowest permitted vertical coordinate.
    pub min_y: i32,
    /// Highest permitted vertical coordinate.
    pub max_y: i32,
}

/// Land-claim policy collaborator.
///
/// Extension point: the detector queries configured limits but imposes
/// no constraint from them yet.
pub trait ClaimPolicy {
    /// Height limits for the world being scanned, if the claim system
    /// is active there.
    fn height_limits(&self) -> Option<HeightLimits>;
}
