//! Core data models for Veritas
//!
//! Request input, class probabilities, verdicts and the output record shared
//! by every presentation target.

use serde::{Deserialize, Serialize};

/// Label name of the negative class in the label map
pub const FAKE_LABEL: &str = "FAKE";
/// Label name of the positive class in the label map
pub const REAL_LABEL: &str = "REAL";

/// A news article as submitted by a caller
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawInput {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: String,
}

impl RawInput {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }

    /// Title and body joined the way the model was fitted: `title + " " + body`.
    pub fn combined(&self) -> String {
        format!("{} {}", self.title, self.body)
    }
}

/// Two-way probability distribution over {FAKE, REAL}
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassProbabilities {
    pub fake: f64,
    pub real: f64,
}

impl ClassProbabilities {
    /// Build from P(REAL); P(FAKE) is the complement.
    pub fn from_real(real: f64) -> Self {
        let real = real.clamp(0.0, 1.0);
        Self {
            fake: 1.0 - real,
            real,
        }
    }
}

/// Final categorical output of the verdict policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Verdict {
    LikelyReal,
    LikelyFake,
    Uncertain,
    OutOfDomain,
}

impl Verdict {
    /// Stable machine identifier (matches the JSON form)
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::LikelyReal => "LIKELY_REAL",
            Verdict::LikelyFake => "LIKELY_FAKE",
            Verdict::Uncertain => "UNCERTAIN",
            Verdict::OutOfDomain => "OUT_OF_DOMAIN",
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Verdict::LikelyReal => write!(f, "Likely REAL"),
            Verdict::LikelyFake => write!(f, "Likely FAKE"),
            Verdict::Uncertain => write!(f, "UNCERTAIN"),
            Verdict::OutOfDomain => write!(f, "OUT OF DOMAIN / INSUFFICIENT DATA"),
        }
    }
}

/// Rounded confidences for display
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub struct Confidence {
    pub fake: f64,
    pub real: f64,
}

/// Result of one prediction, consumed by every presentation target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputRecord {
    /// Raw classifier label, resolved through the label map
    pub prediction: String,
    pub verdict: Verdict,
    /// Confidences rounded to `CONFIDENCE_DECIMALS` places
    pub confidence: Confidence,
    /// Count of vocabulary terms present in the input
    pub non_zero_features: usize,
    /// Set when the input shares too little vocabulary with the training data
    pub low_density_warning: bool,
}
