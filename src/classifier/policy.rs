//! Verdict policy
//!
//! Turns P(REAL) and feature density into a categorical verdict.
//!
//! Probability tiers (boundaries are inclusive on the outer tiers):
//! - `p >= real_threshold` -> Likely REAL
//! - `p <= fake_threshold` -> Likely FAKE
//! - otherwise            -> UNCERTAIN
//!
//! Density: an input with fewer than `min_feature_density` vocabulary terms
//! probably sits outside the training distribution. Depending on
//! `override_verdict_on_low_density` this either replaces the verdict with
//! OUT OF DOMAIN or is only reported alongside it.

use serde::{Deserialize, Serialize};

use crate::models::Verdict;

/// Default lower bound of the Likely REAL tier
pub const REAL_THRESHOLD: f64 = 0.70;
/// Default upper bound of the Likely FAKE tier
pub const FAKE_THRESHOLD: f64 = 0.30;
/// Default minimum count of non-zero features for an in-domain input
pub const MIN_FEATURE_DENSITY: usize = 30;

/// Policy constants
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerdictPolicy {
    /// Minimum P(REAL) for Likely REAL
    pub real_threshold: f64,
    /// Maximum P(REAL) for Likely FAKE
    pub fake_threshold: f64,
    /// Inputs with fewer non-zero features are flagged as low density
    pub min_feature_density: usize,
    /// Replace the verdict with OUT OF DOMAIN on low density (otherwise the
    /// flag is only an annotation)
    pub override_verdict_on_low_density: bool,
}

impl Default for VerdictPolicy {
    fn default() -> Self {
        Self {
            real_threshold: REAL_THRESHOLD,
            fake_threshold: FAKE_THRESHOLD,
            min_feature_density: MIN_FEATURE_DENSITY,
            override_verdict_on_low_density: true,
        }
    }
}

/// Policy output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    /// Final verdict
    pub verdict: Verdict,
    /// Verdict from the probability tiers alone
    pub probability_verdict: Verdict,
    /// Fewer non-zero features than the density floor
    pub low_density: bool,
}

impl VerdictPolicy {
    /// Check threshold ordering: `0 <= fake < real <= 1`
    pub fn validate(&self) -> Result<(), String> {
        let in_unit = |v: f64| (0.0..=1.0).contains(&v);
        if !in_unit(self.real_threshold) || !in_unit(self.fake_threshold) {
            return Err(format!(
                "thresholds must lie in [0, 1] (real={}, fake={})",
                self.real_threshold, self.fake_threshold
            ));
        }
        if self.fake_threshold >= self.real_threshold {
            return Err(format!(
                "fake_threshold ({}) must be below real_threshold ({})",
                self.fake_threshold, self.real_threshold
            ));
        }
        Ok(())
    }

    /// Verdict from the probability tiers only
    pub fn probability_verdict(&self, real_probability: f64) -> Verdict {
        if real_probability >= self.real_threshold {
            Verdict::LikelyReal
        } else if real_probability <= self.fake_threshold {
            Verdict::LikelyFake
        } else {
            Verdict::Uncertain
        }
    }

    /// Is this input below the density floor?
    pub fn is_low_density(&self, nnz: usize) -> bool {
        nnz < self.min_feature_density
    }

    /// Decide the verdict for one prediction. Pure function of the inputs
    /// and the policy constants.
    pub fn decide(&self, real_probability: f64, nnz: usize) -> Decision {
        let probability_verdict = self.probability_verdict(real_probability);
        let low_density = self.is_low_density(nnz);

        let verdict = if low_density && self.override_verdict_on_low_density {
            Verdict::OutOfDomain
        } else {
            probability_verdict
        };

        Decision {
            verdict,
            probability_verdict,
            low_density,
        }
    }
}
