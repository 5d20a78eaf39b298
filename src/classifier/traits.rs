//! Seams around the fitted model
//!
//! The verdict logic only ever talks to these two traits, so it can be
//! exercised with synthetic vectors and probabilities.

use super::features::FeatureVector;
use crate::models::ClassProbabilities;

/// Maps normalized text to a sparse vector over a fitted vocabulary.
///
/// Implementations must be deterministic and free of side effects.
pub trait FeatureExtractor: Send + Sync {
    /// Vectorize normalized text
    fn extract(&self, text: &str) -> FeatureVector;

    /// Fixed vector dimension (vocabulary size)
    fn dimension(&self) -> usize;
}

/// Output of a `Scorer`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Score {
    /// Class id as used in the label map
    pub predicted_class: i64,
    pub probabilities: ClassProbabilities,
}

/// Applies a fitted classifier to a feature vector.
pub trait Scorer: Send + Sync {
    /// Score a vector whose dimension matches the extractor the model was
    /// fitted with. A mismatched vector is a programming error.
    fn score(&self, vector: &FeatureVector) -> Score;
}
