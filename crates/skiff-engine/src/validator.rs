//! Post-scan composition audit.
//!
//! Runs only after a clean scan. Size bounds fail fast; quota rules are
//! all evaluated before reporting so a failed detection carries every
//! violated rule, not just the first.

use skiff_core::{DetectError, NotificationSink, QuotaBound, QuotaFailure, Threshold};

use crate::classifier::BlockClassifier;
use crate::scanner::ScanOutcome;

/// Validates a scan outcome against the compiled policy.
pub struct CompositionValidator<'a> {
    notifier: &'a dyn NotificationSink,
}

impl<'a> CompositionValidator<'a> {
    /// Create a validator reporting through the given sink.
    pub fn new(notifier: &'a dyn NotificationSink) -> Self {
        Self { notifier }
    }

    /// Audit size bounds, water contact, and composition quotas.
    pub fn validate(
        &self,
        classifier: &BlockClassifier,
        outcome: &ScanOutcome,
    ) -> Result<(), DetectError> {
        if outcome.total < classifier.min_size() {
            self.notifier.notify(&format!(
                "detection: craft too small (minimum {} blocks)",
                classifier.min_size()
            ));
            return Err(DetectError::TooSmall {
                count: outcome.total,
                min: classifier.min_size(),
            });
        }
        if outcome.total > classifier.max_size() {
            self.notifier.notify(&format!(
                "detection: craft too large (maximum {} blocks)",
                classifier.max_size()
            ));
            return Err(DetectError::TooLarge {
                count: outcome.total,
                max: classifier.max_size(),
            });
        }

        // Advisory only: the craft is still accepted without water
        // contact.
        if classifier.require_water_contact() && !outcome.water_contact {
            self.notifier
                .notify("detection: water contact required but not found");
        }

        // The arena holds each shared counter exactly once, so this
        // iteration evaluates every quota once even when many materials
        // reference it.
        let mut failures = Vec::new();
        for counter in classifier.quota_counters() {
            if let Some(min) = counter.min {
                let required = min.min_required(outcome.total);
                if counter.count < required {
                    failures.push(failure(
                        counter.name.clone(),
                        QuotaBound::Min,
                        counter.count,
                        required,
                        min,
                        outcome.total,
                    ));
                    // A rule failing its minimum cannot also exceed its
                    // maximum; move on to the next counter.
                    continue;
                }
            }
            if let Some(max) = counter.max {
                let allowed = max.max_allowed(outcome.total);
                if counter.count > allowed {
                    failures.push(failure(
                        counter.name.clone(),
                        QuotaBound::Max,
                        counter.count,
                        allowed,
                        max,
                        outcome.total,
                    ));
                }
            }
        }

        if failures.is_empty() {
            Ok(())
        } else {
            for f in &failures {
                let kind = match f.bound {
                    QuotaBound::Min => "not enough",
                    QuotaBound::Max => "too much",
                };
                self.notifier.notify(&format!("detection: {kind} {f}"));
            }
            Err(DetectError::QuotaViolation { failures })
        }
    }
}

fn failure(
    name: String,
    bound: QuotaBound,
    observed: usize,
    required: usize,
    threshold: Threshold,
    total: usize,
) -> QuotaFailure {
    let percentage = match threshold {
        Threshold::Percentage(pct) => Some(pct),
        Threshold::Count(_) => None,
    };
    QuotaFailure {
        name,
        bound,
        observed,
        required,
        percentage,
        total,
    }
}
