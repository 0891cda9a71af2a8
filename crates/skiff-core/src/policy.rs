//! The structural policy: what a detected craft is allowed to be made of.
//!
//! Policies are plain data constructed by the embedding application
//! (file parsing is out of scope) and validated once with
//! [`StructuralPolicy::validate`] before a detector is built from them.

use crate::error::PolicyError;
use crate::id::MaterialSelector;

/// Dual-encoded quota threshold as it appears in policy input.
///
/// Values below `10_000` are a percentage of the total accepted voxel
/// count; values at or above `10_000` are an absolute voxel count of
/// `value - 10_000`. The encoding is kept at the policy boundary and
/// decoded exactly once, via [`ThresholdSpec::decode`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ThresholdSpec(pub f64);

impl ThresholdSpec {
    /// Encoding pivot between percentage and absolute-count thresholds.
    pub const COUNT_BASE: f64 = 10_000.0;

    /// A percentage threshold.
    pub fn percentage(pct: f64) -> Self {
        Self(pct)
    }

    /// An absolute-count threshold.
    pub fn count(count: u32) -> Self {
        Self(Self::COUNT_BASE + f64::from(count))
    }

    /// Decode into the typed threshold representation.
    pub fn decode(self) -> Threshold {
        if self.0 >= Self::COUNT_BASE {
            Threshold::Count((self.0 - Self::COUNT_BASE) as u32)
        } else {
            Threshold::Percentage(self.0)
        }
    }
}

/// A decoded quota threshold.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Threshold {
    /// Percentage of the total accepted voxel count.
    Percentage(f64),
    /// Absolute voxel count, independent of the total.
    Count(u32),
}

impl Threshold {
    /// Minimum accepted-voxel count this threshold requires.
    ///
    /// Percentages round up: 10% of 95 voxels requires 10 of them.
    pub fn min_required(&self, total: usize) -> usize {
        match *self {
            Self::Percentage(pct) => (total as f64 * pct / 100.0).ceil() as usize,
            Self::Count(count) => count as usize,
        }
    }

    /// Maximum accepted-voxel count this threshold allows.
    ///
    /// Percentages round down: 10% of 95 voxels allows 9 of them.
    pub fn max_allowed(&self, total: usize) -> usize {
        match *self {
            Self::Percentage(pct) => (total as f64 * pct / 100.0).floor() as usize,
            Self::Count(count) => count as usize,
        }
    }

    /// The fraction of `total` this threshold represents, used as the
    /// baseline of the dynamic speed multiplier.
    pub fn baseline_ratio(&self, total: usize) -> f64 {
        match *self {
            Self::Percentage(pct) => pct / 100.0,
            Self::Count(count) => {
                if total == 0 {
                    0.0
                } else {
                    f64::from(count) / total as f64
                }
            }
        }
    }
}

/// A composition quota over the union of a set of materials.
///
/// All materials in one rule share a single counter: the min/max bounds
/// apply to their combined accepted count, not to each material alone.
#[derive(Clone, Debug, PartialEq)]
pub struct QuotaRule {
    /// Human-readable name used in violation reports.
    pub name: String,
    /// Materials whose accepted counts pool into this rule's counter.
    pub materials: Vec<MaterialSelector>,
    /// Optional lower bound on the pooled count.
    pub min: Option<ThresholdSpec>,
    /// Optional upper bound on the pooled count.
    pub max: Option<ThresholdSpec>,
}

/// The structural policy a detected craft is validated against.
///
/// World-specific material roles (water, signs, paired-restricted types)
/// are part of the policy rather than hardcoded, keeping the detection
/// engine independent of any one block catalogue.
#[derive(Clone, Debug, PartialEq)]
pub struct StructuralPolicy {
    /// Materials a craft may be built of.
    pub allowed: Vec<MaterialSelector>,
    /// Materials whose presence anywhere in the craft aborts detection.
    pub forbidden: Vec<MaterialSelector>,
    /// Sign text entries that trigger an advisory warning when matched.
    pub forbidden_sign_text: Vec<String>,
    /// Composition quotas.
    pub quotas: Vec<QuotaRule>,
    /// Minimum total accepted voxel count.
    pub min_size: usize,
    /// Maximum total accepted voxel count.
    pub max_size: usize,
    /// Whether the craft must touch a water-family voxel.
    pub require_water_contact: bool,
    /// Materials counting as water contact.
    pub water: Vec<MaterialSelector>,
    /// Materials carrying readable sign text.
    pub signs: Vec<MaterialSelector>,
    /// Materials forbidden from horizontally adjacent identical placement.
    pub paired: Vec<MaterialSelector>,
    /// Material family driving the dynamic speed multiplier.
    pub dynamic_family: Option<u16>,
    /// Scale factor of the dynamic speed multiplier; `0.0` disables it.
    pub dynamic_speed_factor: f64,
}

impl StructuralPolicy {
    /// Check internal consistency of the policy.
    pub fn validate(&self) -> Result<(), PolicyError> {
        if self.min_size > self.max_size {
            return Err(PolicyError::InvalidSizeRange {
                min: self.min_size,
                max: self.max_size,
            });
        }
        if self.dynamic_speed_factor != 0.0 && self.dynamic_family.is_none() {
            return Err(PolicyError::DynamicFactorWithoutFamily);
        }
        Ok(())
    }
}

impl Default for StructuralPolicy {
    fn default() -> Self {
        Self {
            allowed: Vec::new(),
            forbidden: Vec::new(),
            forbidden_sign_text: Vec::new(),
            quotas: Vec::new(),
            min_size: 0,
            max_size: usize::MAX,
            require_water_contact: false,
            water: Vec::new(),
            signs: Vec::new(),
            paired: Vec::new(),
            dynamic_family: None,
            dynamic_speed_factor: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn percentage_spec_decodes_as_percentage() {
        assert_eq!(
            ThresholdSpec::percentage(12.5).decode(),
            Threshold::Percentage(12.5)
        );
    }

    #[test]
    fn count_spec_decodes_as_count() {
        assert_eq!(ThresholdSpec::count(5).decode(), Threshold::Count(5));
        assert_eq!(ThresholdSpec(10_005.0).decode(), Threshold::Count(5));
    }

    #[test]
    fn min_required_rounds_up() {
        let t = Threshold::Percentage(10.0);
        assert_eq!(t.min_required(100), 10);
        assert_eq!(t.min_required(95), 10);
        assert_eq!(t.min_required(91), 10);
    }

    #[test]
    fn max_allowed_rounds_down() {
        let t = Threshold::Percentage(10.0);
        assert_eq!(t.max_allowed(100), 10);
        assert_eq!(t.max_allowed(95), 9);
    }

    #[test]
    fn count_threshold_ignores_total() {
        let t = Threshold::Count(7);
        assert_eq!(t.min_required(10), 7);
        assert_eq!(t.min_required(10_000), 7);
        assert_eq!(t.max_allowed(3), 7);
    }

    #[test]
    fn validate_rejects_inverted_size_range() {
        let policy = StructuralPolicy {
            min_size: 10,
            max_size: 5,
            ..Default::default()
        };
        assert!(matches!(
            policy.validate(),
            Err(PolicyError::InvalidSizeRange { min: 10, max: 5 })
        ));
    }

    #[test]
    fn validate_rejects_orphan_dynamic_factor() {
        let policy = StructuralPolicy {
            dynamic_speed_factor: 1.5,
            ..Default::default()
        };
        assert!(matches!(
            policy.validate(),
            Err(PolicyError::DynamicFactorWithoutFamily)
        ));
    }

    proptest! {
        #[test]
        fn min_never_exceeds_total_plus_rounding(pct in 0.0f64..100.0, total in 0usize..10_000) {
            let t = Threshold::Percentage(pct);
            prop_assert!(t.min_required(total) <= total + 1);
            prop_assert!(t.max_allowed(total) <= total);
        }

        #[test]
        fn min_and_max_agree_on_exact_multiples(total in 1usize..1_000) {
            // At 100% both bounds land exactly on the total.
            let t = Threshold::Percentage(100.0);
            prop_assert_eq!(t.min_required(total), total);
            prop_assert_eq!(t.max_allowed(total), total);
        }
    }
}
