//! Error types for policy validation and craft detection.

use std::error::Error;
use std::fmt;

use crate::id::MaterialId;
use crate::pos::{LocalPos, WorldPos};

/// Errors from [`StructuralPolicy`](crate::policy::StructuralPolicy)
/// consistency checks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PolicyError {
    /// `min_size` exceeds `max_size`.
    InvalidSizeRange {
        /// Configured minimum total size.
        min: usize,
        /// Configured maximum total size.
        max: usize,
    },
    /// A nonzero dynamic speed factor was configured without naming the
    /// dynamic material family it applies to.
    DynamicFactorWithoutFamily,
}

impl fmt::Display for PolicyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSizeRange { min, max } => {
                write!(f, "min size {min} exceeds max size {max}")
            }
            Self::DynamicFactorWithoutFamily => {
                write!(f, "dynamic speed factor configured without a dynamic family")
            }
        }
    }
}

impl Error for PolicyError {}

/// Which bound of a quota rule was violated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuotaBound {
    /// The rule's minimum requirement.
    Min,
    /// The rule's maximum allowance.
    Max,
}

/// One violated composition quota.
///
/// Validation reports every violated rule, not just the first, so a
/// failed detection carries the full list of these.
#[derive(Clone, Debug, PartialEq)]
pub struct QuotaFailure {
    /// Name of the violated rule.
    pub name: String,
    /// Which bound was violated.
    pub bound: QuotaBound,
    /// Accepted voxels observed for the rule's materials.
    pub observed: usize,
    /// The computed requirement or allowance.
    pub required: usize,
    /// The percentage behind `required`, when percentage-encoded.
    pub percentage: Option<f64>,
    /// Total accepted voxel count the percentage was taken of.
    pub total: usize,
}

impl fmt::Display for QuotaFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let relation = match self.bound {
            QuotaBound::Min => '<',
            QuotaBound::Max => '>',
        };
        write!(
            f,
            "{}: {} {} {}",
            self.name, self.observed, relation, self.required
        )?;
        if let Some(pct) = self.percentage {
            write!(f, " ({:.2}% of {})", pct, self.total)?;
        }
        Ok(())
    }
}

/// Terminal failures of one detection attempt.
///
/// None of these are retried internally; the caller decides whether to
/// retry after the world or actor changes. Every variant has already
/// been notified to the [`NotificationSink`](crate::traits::NotificationSink)
/// by the time it is returned.
#[derive(Clone, Debug, PartialEq)]
pub enum DetectError {
    /// Traversal left the representable detection volume — the
    /// structure is larger than the detector can describe, or the
    /// anchor was malformed.
    OutOfRange {
        /// The offending volume-local position.
        pos: LocalPos,
    },
    /// A forbidden material was reached from the anchor.
    ForbiddenMaterial {
        /// The forbidden material.
        material: MaterialId,
        /// Where it was found.
        pos: WorldPos,
    },
    /// A pilot-lock sign does not list the requesting actor.
    UnauthorizedPilot {
        /// The sign's position.
        pos: WorldPos,
    },
    /// Two identical paired-placement-restricted voxels share a
    /// horizontal face.
    IllegalPairedPlacement {
        /// The restricted material.
        material: MaterialId,
        /// Position of the voxel whose neighbour matched.
        pos: WorldPos,
    },
    /// The craft exceeds the policy's maximum size.
    TooLarge {
        /// Accepted voxel count at the point of failure.
        count: usize,
        /// Configured maximum.
        max: usize,
    },
    /// The craft is below the policy's minimum size.
    TooSmall {
        /// Accepted voxel count.
        count: usize,
        /// Configured minimum.
        min: usize,
    },
    /// One or more composition quotas are unmet.
    QuotaViolation {
        /// Every violated rule.
        failures: Vec<QuotaFailure>,
    },
    /// An occupied voxel lies inside a protected region the actor is
    /// not authorized to pilot through.
    RegionDenied {
        /// The offending voxel.
        pos: WorldPos,
    },
}

impl fmt::Display for DetectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange { pos } => {
                write!(f, "structure extends beyond the detection volume at {pos}")
            }
            Self::ForbiddenMaterial { material, pos } => {
                write!(f, "forbidden material {material} at {pos}")
            }
            Self::UnauthorizedPilot { pos } => {
                write!(f, "actor is not a registered pilot of the sign at {pos}")
            }
            Self::IllegalPairedPlacement { material, pos } => {
                write!(f, "illegal paired placement of {material} at {pos}")
            }
            Self::TooLarge { count, max } => {
                write!(f, "craft too large: {count} voxels exceeds maximum {max}")
            }
            Self::TooSmall { count, min } => {
                write!(f, "craft too small: {count} voxels below minimum {min}")
            }
            Self::QuotaViolation { failures } => {
                write!(f, "{} composition quota(s) violated", failures.len())
            }
            Self::RegionDenied { pos } => {
                write!(f, "occupied voxel at {pos} lies in a protected region")
            }
        }
    }
}

impl Error for DetectError {}
