//! The Skiff detection engine: bounded flood fill plus structural
//! validation.
//!
//! [`Detector::detect`] drives the whole pipeline from a single anchor
//! voxel: the [`ConnectivityScanner`] walks the 14-direction connected
//! component while classifying every voxel against the compiled
//! [`BlockClassifier`]; a clean scan is audited by the
//! [`CompositionValidator`]; the accepted set is then materialised as a
//! dense [`OccupancyMask`] and cleared against protected regions before
//! the final [`DetectionResult`] is assembled.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod classifier;
pub mod detector;
pub mod mask;
pub mod region;
pub mod scanner;
pub mod validator;

pub use classifier::{BlockClassifier, QuotaCounter};
pub use detector::{Detector, DetectorEnv};
pub use mask::{DetectionResult, OccupancyMask};
pub use region::RegionConstraintChecker;
pub use scanner::{ConnectivityScanner, ScanOutcome};
pub use validator::CompositionValidator;
