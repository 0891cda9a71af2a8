//! Skiff: connected-structure detection for voxel worlds.
//!
//! From a single anchor voxel, Skiff finds the maximal connected set of
//! voxels forming a movable structure ("craft"), validates it against a
//! structural policy (allowed and forbidden materials, size bounds,
//! composition quotas, pilot-lock signs, paired-placement rules), and
//! produces a dense occupancy description plus a dynamic speed
//! multiplier.
//!
//! This facade crate re-exports the public API of the Skiff
//! sub-crates; adding `skiff` as a single dependency is sufficient for
//! most users.
//!
//! # Quick start
//!
//! ```rust
//! use skiff::prelude::*;
//!
//! // A policy allowing family 1 with at most 500 voxels.
//! let policy = StructuralPolicy {
//!     allowed: vec![MaterialSelector::Family(1)],
//!     min_size: 1,
//!     max_size: 500,
//!     ..Default::default()
//! };
//! let detector = Detector::new(&policy).unwrap();
//! // `detector.detect(anchor, &env)` scans the world reachable
//! // through the collaborators bundled in a `DetectorEnv`.
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types: materials, positions, policy, collaborator traits,
/// errors (`skiff-core`).
pub mod core {
    pub use skiff_core::*;
}

/// Spatial structures: detection volume, packed positions, frontiers
/// (`skiff-space`).
pub mod space {
    pub use skiff_space::*;
}

/// The detection engine: classifier, scanner, validator, result
/// (`skiff-engine`).
pub mod engine {
    pub use skiff_engine::*;
}

/// The types most callers need.
pub mod prelude {
    pub use skiff_core::{
        ActorIdentity, ClaimPolicy, DetectError, MaterialId, MaterialSelector, NotificationSink,
        ProtectedRegion, QuotaRule, RegionProvider, StructuralPolicy, ThresholdSpec,
        WorldAccessor, WorldPos,
    };
    pub use skiff_engine::{DetectionResult, Detector, DetectorEnv, OccupancyMask};
}
