//! Spatial data structures for the Skiff craft detector.
//!
//! This crate holds everything the flood-fill traversal touches per
//! voxel: the packed frontier encoding ([`PackedPos`]), the chunked
//! sparse visitation index ([`DetectionVolume`]), and the growable
//! integer frontier buffers ([`FrontierStack`], [`FrontierQueue`]).

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod frontier;
pub mod packed;
pub mod volume;

pub use error::VolumeError;
pub use frontier::{FrontierQueue, FrontierStack};
pub use packed::PackedPos;
pub use volume::{DetectionVolume, VoxelState};
