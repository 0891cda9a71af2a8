//! The detection facade: one call from anchor to result.

use log::debug;

use skiff_core::{
    ActorIdentity, ClaimPolicy, DetectError, NotificationSink, PolicyError, RegionProvider,
    StructuralPolicy, WorldAccessor, WorldPos,
};
use skiff_space::DetectionVolume;

use crate::classifier::BlockClassifier;
use crate::mask::{DetectionResult, OccupancyMask};
use crate::region::RegionConstraintChecker;
use crate::scanner::{ConnectivityScanner, ScanOutcome};
use crate::validator::CompositionValidator;

/// The collaborators one detection call runs against.
///
/// Everything is injected explicitly; the engine holds no ambient
/// state. The region and claim collaborators are optional — their
/// checks are skipped when unconfigured.
pub struct DetectorEnv<'a> {
    /// Read-only voxel world access.
    pub world: &'a dyn WorldAccessor,
    /// The requesting actor.
    pub actor: &'a dyn ActorIdentity,
    /// Sink for human-readable detection messages.
    pub notifier: &'a dyn NotificationSink,
    /// Protected-region service, if any.
    pub regions: Option<&'a dyn RegionProvider>,
    /// Land-claim policy service, if any.
    pub claims: Option<&'a dyn ClaimPolicy>,
}

/// Detects crafts under one structural policy.
///
/// The detector itself is stateless between calls: classifier, volume,
/// and frontier are constructed per call, so concurrent detections of
/// independent crafts are safe through data isolation alone.
pub struct Detector<'a> {
    policy: &'a StructuralPolicy,
}

impl<'a> Detector<'a> {
    /// Build a detector over a policy, rejecting inconsistent policies.
    pub fn new(policy: &'a StructuralPolicy) -> Result<Self, PolicyError> {
        policy.validate()?;
        Ok(Self { policy })
    }

    /// Detect the craft anchored at `anchor`.
    ///
    /// Side-effect-free except for notifications on failure and
    /// advisory paths. Every failure is terminal for this attempt; the
    /// caller decides whether to retry after the world changes.
    pub fn detect(
        &self,
        anchor: WorldPos,
        env: &DetectorEnv<'_>,
    ) -> Result<DetectionResult, DetectError> {
        let mut classifier = BlockClassifier::compile(self.policy);
        let mut volume = DetectionVolume::new(anchor);

        let scanner = ConnectivityScanner::new(env.world, env.actor, env.notifier);
        let outcome = scanner.scan(&mut volume, &mut classifier)?;

        CompositionValidator::new(env.notifier).validate(&classifier, &outcome)?;

        let origin = volume.local_to_world(outcome.min);
        let mask = OccupancyMask::from_volume(&volume, outcome.min, outcome.max);
        let result = DetectionResult {
            origin,
            mask,
            total: outcome.total,
            speed_multiplier: dynamic_multiplier(&classifier, &outcome),
        };

        if let Some(provider) = env.regions {
            RegionConstraintChecker::new(provider, env.actor, env.notifier).check(&result)?;
        }

        // Extension point: claim limits are fetched but impose no
        // constraint yet.
        if let Some(claims) = env.claims {
            if let Some(limits) = claims.height_limits() {
                debug!("claim height limits {limits:?}; no constraint applied");
            }
        }

        debug!(
            "detected craft: {} voxels at {}, size {:?}",
            result.total,
            result.origin,
            result.size()
        );
        Ok(result)
    }
}

/// Dynamic speed multiplier: the dynamic family's accepted ratio above
/// its quota-minimum baseline, scaled by the configured factor.
fn dynamic_multiplier(classifier: &BlockClassifier, outcome: &ScanOutcome) -> f64 {
    let factor = classifier.dynamic_speed_factor();
    if factor == 0.0 || outcome.total == 0 {
        return 0.0;
    }
    let mut ratio = outcome.dynamic_count as f64 / outcome.total as f64;
    if let Some(index) = classifier.dynamic_quota_index() {
        if let Some(min) = classifier.quota_counters()[index].min {
            ratio -= min.baseline_ratio(outcome.total);
        }
    }
    ratio * factor
}
