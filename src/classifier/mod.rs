//! Fake news classifier
//!
//! Architecture: normalize → TF-IDF features → logistic regression →
//! verdict policy.
//!
//! The fitted pieces (vocabulary, weights, labels) are loaded once from
//! disk and never mutated. Everything downstream of the scorer is a pure
//! function of P(REAL) and the number of vocabulary terms found, so the
//! policy can be tested without a model.

pub mod artifacts;
mod features;
pub mod gate;
pub mod labels;
pub mod model;
pub mod normalize;
pub mod policy;
pub mod traits;
pub mod vectorizer;

pub use artifacts::{shared, ArtifactError, Artifacts};
pub use features::FeatureVector;
pub use gate::{InputGate, InputRejected};
pub use labels::LabelMap;
pub use model::{LogisticModel, LogisticScorer};
pub use normalize::normalize;
pub use policy::{Decision, VerdictPolicy};
pub use traits::{FeatureExtractor, Score, Scorer};
pub use vectorizer::{Norm, TfidfVectorizer};

use thiserror::Error;
use tracing::{debug, info};

use crate::models::{OutputRecord, RawInput};
use crate::reporters::present;

/// Errors surfaced by the programmatic entry point
#[derive(Error, Debug)]
pub enum PredictError {
    #[error(transparent)]
    Artifacts(#[from] ArtifactError),

    #[error(transparent)]
    Rejected(#[from] InputRejected),

    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),
}

/// Runs one article through the whole pipeline.
///
/// Holds only borrowed, read-only state, so one predictor can serve any
/// number of callers.
#[derive(Clone, Copy)]
pub struct Predictor<'a> {
    extractor: &'a dyn FeatureExtractor,
    scorer: &'a dyn Scorer,
    labels: &'a LabelMap,
    policy: VerdictPolicy,
    gate: InputGate,
}

impl<'a> Predictor<'a> {
    /// Predictor over loaded artifacts
    pub fn new(artifacts: &'a Artifacts, policy: VerdictPolicy, gate: InputGate) -> Self {
        Self::with_components(
            artifacts.vectorizer(),
            artifacts.scorer(),
            artifacts.labels(),
            policy,
            gate,
        )
    }

    /// Predictor over arbitrary extractor/scorer implementations
    pub fn with_components(
        extractor: &'a dyn FeatureExtractor,
        scorer: &'a dyn Scorer,
        labels: &'a LabelMap,
        policy: VerdictPolicy,
        gate: InputGate,
    ) -> Self {
        Self {
            extractor,
            scorer,
            labels,
            policy,
            gate,
        }
    }

    pub fn policy(&self) -> &VerdictPolicy {
        &self.policy
    }

    pub fn gate(&self) -> InputGate {
        self.gate
    }

    /// Validate, vectorize, score and decide.
    ///
    /// Rejected input never reaches the scorer.
    pub fn predict(&self, input: &RawInput) -> Result<OutputRecord, InputRejected> {
        if let Err(rejected) = self.gate.check(input) {
            info!("Input rejected by {} gate: {}", self.gate, rejected);
            return Err(rejected);
        }

        let text = normalize(&input.combined());
        let vector = self.extractor.extract(&text);
        let nnz = vector.nnz();

        let score = self.scorer.score(&vector);
        let decision = self.policy.decide(score.probabilities.real, nnz);

        // Label ids are checked against the model when artifacts load
        let label = self
            .labels
            .name_of(score.predicted_class)
            .unwrap_or("UNKNOWN");

        debug!(
            "nnz={} p_real={:.4} label={} verdict={:?} low_density={}",
            nnz, score.probabilities.real, label, decision.verdict, decision.low_density
        );

        Ok(present(&decision, &score.probabilities, label, nnz))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ClassProbabilities, Verdict};
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Returns a fixed density regardless of text
    struct FixedExtractor {
        nnz: usize,
    }

    impl FeatureExtractor for FixedExtractor {
        fn extract(&self, _text: &str) -> FeatureVector {
            FeatureVector::from_entries(self.nnz, (0..self.nnz).map(|i| (i, 1.0)).collect())
        }

        fn dimension(&self) -> usize {
            self.nnz
        }
    }

    /// Returns a fixed probability and counts calls
    struct FixedScorer {
        real: f64,
        calls: AtomicUsize,
    }

    impl FixedScorer {
        fn new(real: f64) -> Self {
            Self {
                real,
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl Scorer for FixedScorer {
        fn score(&self, _vector: &FeatureVector) -> Score {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Score {
                predicted_class: if self.real > 0.5 { 1 } else { 0 },
                probabilities: ClassProbabilities::from_real(self.real),
            }
        }
    }

    fn predict_with(nnz: usize, real: f64, policy: VerdictPolicy) -> OutputRecord {
        let extractor = FixedExtractor { nnz };
        let scorer = FixedScorer::new(real);
        let labels = LabelMap::default();
        let predictor = Predictor::with_components(
            &extractor,
            &scorer,
            &labels,
            policy,
            InputGate::RequiredFields,
        );
        predictor
            .predict(&RawInput::new("title", "body"))
            .unwrap()
    }

    #[test]
    fn test_synthetic_verdicts() {
        let policy = VerdictPolicy::default();
        assert_eq!(predict_with(50, 0.9, policy).verdict, Verdict::LikelyReal);
        assert_eq!(predict_with(50, 0.1, policy).verdict, Verdict::LikelyFake);
        assert_eq!(predict_with(50, 0.5, policy).verdict, Verdict::Uncertain);
        assert_eq!(predict_with(3, 0.9, policy).verdict, Verdict::OutOfDomain);
    }

    #[test]
    fn test_record_fields() {
        let record = predict_with(42, 0.87654, VerdictPolicy::default());
        assert_eq!(record.prediction, "REAL");
        assert_eq!(record.non_zero_features, 42);
        assert_eq!(record.confidence.real, 0.877);
        assert_eq!(record.confidence.fake, 0.123);
        assert!(!record.low_density_warning);
    }

    #[test]
    fn test_annotation_variant_keeps_verdict() {
        let policy = VerdictPolicy {
            override_verdict_on_low_density: false,
            ..Default::default()
        };
        let record = predict_with(5, 0.1, policy);
        assert_eq!(record.verdict, Verdict::LikelyFake);
        assert!(record.low_density_warning);
        assert_eq!(record.prediction, "FAKE");
    }

    #[test]
    fn test_rejected_input_skips_scorer() {
        let extractor = FixedExtractor { nnz: 50 };
        let scorer = FixedScorer::new(0.9);
        let labels = LabelMap::default();
        let predictor = Predictor::with_components(
            &extractor,
            &scorer,
            &labels,
            VerdictPolicy::default(),
            InputGate::RequiredFields,
        );

        let err = predictor.predict(&RawInput::new("", "")).unwrap_err();
        assert_eq!(err, InputRejected::EmptyBody);
        assert_eq!(scorer.calls.load(Ordering::SeqCst), 0);

        predictor.predict(&RawInput::new("", "text")).unwrap();
        assert_eq!(scorer.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_with_fitted_artifacts() {
        let artifacts = artifacts::tests::sample_artifacts();
        let policy = VerdictPolicy {
            min_feature_density: 2,
            ..Default::default()
        };
        let predictor = Predictor::new(&artifacts, policy, InputGate::default());

        let real = predictor
            .predict(&RawInput::new(
                "NASA rover",
                "The Mars rover collected samples. https://nasa.gov/mars",
            ))
            .unwrap();
        assert_eq!(real.non_zero_features, 4);
        assert_eq!(real.verdict, Verdict::LikelyReal);
        assert_eq!(real.prediction, "REAL");

        let fake = predictor
            .predict(&RawInput::new("SHOCKING", "The secret they hide!"))
            .unwrap();
        assert_eq!(fake.non_zero_features, 2);
        assert_eq!(fake.verdict, Verdict::LikelyFake);

        let unknown = predictor
            .predict(&RawInput::new("", "completely unrelated cooking recipe words"))
            .unwrap();
        assert_eq!(unknown.non_zero_features, 0);
        assert_eq!(unknown.verdict, Verdict::OutOfDomain);
    }
}
