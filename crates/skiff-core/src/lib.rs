//! Core types and contracts for the Skiff craft detector.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the material and coordinate types, the structural policy data model,
//! the collaborator traits through which the detector reaches the host
//! world, and the detection error types.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod id;
pub mod policy;
pub mod pos;
pub mod traits;

pub use error::{DetectError, PolicyError, QuotaBound, QuotaFailure};
pub use id::{MaterialId, MaterialSelector};
pub use policy::{QuotaRule, StructuralPolicy, Threshold, ThresholdSpec};
pub use pos::{LocalPos, WorldPos};
pub use traits::{
    ActorIdentity, ClaimPolicy, HeightLimits, NotificationSink, ProtectedRegion, RegionProvider,
    WorldAccessor,
};
