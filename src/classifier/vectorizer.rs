//! Fitted TF-IDF vectorizer
//!
//! Holds only fitted state (vocabulary, IDF weights, stop words). Fitting
//! happens offline; this type is deserialized from `vectorizer.json`.
//!
//! Weighting for column `j`: `tf_j * idf_j`, where `tf_j` is the raw term
//! count (or `1 + ln(count)` with `sublinear_tf`), followed by whole-vector
//! normalization.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::OnceLock;

use super::features::FeatureVector;
use super::traits::FeatureExtractor;

static TOKEN_PATTERN: OnceLock<Regex> = OnceLock::new();

/// Words of at least two word characters
fn token_pattern() -> &'static Regex {
    TOKEN_PATTERN.get_or_init(|| Regex::new(r"\b\w\w+\b").expect("valid regex"))
}

/// Vector normalization applied after weighting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Norm {
    L1,
    #[default]
    L2,
    None,
}

impl std::fmt::Display for Norm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Norm::L1 => write!(f, "l1"),
            Norm::L2 => write!(f, "l2"),
            Norm::None => write!(f, "none"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TfidfVectorizer {
    /// Term -> column index
    vocabulary: HashMap<String, usize>,
    /// Inverse document frequency per column
    idf: Vec<f64>,
    #[serde(default)]
    stop_words: HashSet<String>,
    #[serde(default)]
    sublinear_tf: bool,
    #[serde(default)]
    norm: Norm,
}

impl TfidfVectorizer {
    /// Create from a fitted vocabulary and IDF table
    pub fn new(vocabulary: HashMap<String, usize>, idf: Vec<f64>) -> Self {
        Self {
            vocabulary,
            idf,
            stop_words: HashSet::new(),
            sublinear_tf: false,
            norm: Norm::default(),
        }
    }

    pub fn with_stop_words<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.stop_words = words.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_sublinear_tf(mut self, sublinear: bool) -> Self {
        self.sublinear_tf = sublinear;
        self
    }

    pub fn with_norm(mut self, norm: Norm) -> Self {
        self.norm = norm;
        self
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn stop_word_count(&self) -> usize {
        self.stop_words.len()
    }

    pub fn norm(&self) -> Norm {
        self.norm
    }

    pub fn sublinear_tf(&self) -> bool {
        self.sublinear_tf
    }

    /// Check that the fitted tables agree with each other.
    pub fn validate(&self) -> Result<(), String> {
        let size = self.vocabulary.len();
        if size == 0 {
            return Err("vectorizer vocabulary is empty".into());
        }
        if self.idf.len() != size {
            return Err(format!(
                "vectorizer has {} idf weights for {} vocabulary terms",
                self.idf.len(),
                size
            ));
        }

        let mut seen = vec![false; size];
        for (term, &idx) in &self.vocabulary {
            if idx >= size {
                return Err(format!(
                    "vocabulary term '{term}' maps to column {idx}, outside 0..{size}"
                ));
            }
            if seen[idx] {
                return Err(format!("vocabulary column {idx} is assigned twice"));
            }
            seen[idx] = true;
        }

        if let Some(pos) = self.idf.iter().position(|w| !w.is_finite()) {
            return Err(format!("idf weight at column {pos} is not finite"));
        }
        Ok(())
    }

    /// Tokens that count toward the bag of words
    fn tokens<'a>(&'a self, text: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        token_pattern()
            .find_iter(text)
            .map(|m| m.as_str())
            .filter(move |t| !self.stop_words.contains(*t))
    }
}

impl FeatureExtractor for TfidfVectorizer {
    fn extract(&self, text: &str) -> FeatureVector {
        let dimension = self.vocabulary.len();

        // Column order keeps summation order stable across runs
        let mut counts: BTreeMap<usize, u32> = BTreeMap::new();
        for token in self.tokens(text) {
            if let Some(&idx) = self.vocabulary.get(token) {
                *counts.entry(idx).or_insert(0) += 1;
            }
        }

        if counts.is_empty() {
            return FeatureVector::empty(dimension);
        }

        let entries = counts
            .into_iter()
            .map(|(idx, count)| {
                let tf = if self.sublinear_tf {
                    1.0 + (count as f64).ln()
                } else {
                    count as f64
                };
                (idx, tf * self.idf[idx])
            })
            .collect();

        let mut vector = FeatureVector::from_entries(dimension, entries);
        let norm = match self.norm {
            Norm::L2 => vector.l2_norm(),
            Norm::L1 => vector.entries().iter().map(|&(_, w)| w.abs()).sum(),
            Norm::None => 1.0,
        };
        if norm > 0.0 {
            vector.scale(1.0 / norm);
        }
        vector
    }

    fn dimension(&self) -> usize {
        self.vocabulary.len()
    }
}
