//! Persisted model artifacts
//!
//! Three JSON files written by the offline training stage, loaded together:
//! - `model.json`      - logistic regression weights
//! - `vectorizer.json` - TF-IDF vocabulary and IDF table
//! - `label_map.json`  - `{"FAKE": 0, "REAL": 1}`
//!
//! Loading is all-or-nothing: any missing, unreadable or mutually
//! inconsistent file is a fatal startup error.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use thiserror::Error;
use tracing::{info, warn};

use super::labels::LabelMap;
use super::model::{LogisticModel, LogisticScorer};
use super::traits::FeatureExtractor;
use super::vectorizer::TfidfVectorizer;

pub const MODEL_FILE: &str = "model.json";
pub const VECTORIZER_FILE: &str = "vectorizer.json";
pub const LABEL_MAP_FILE: &str = "label_map.json";

/// Fatal artifact loading errors
#[derive(Error, Debug)]
pub enum ArtifactError {
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Inconsistent artifacts: {0}")]
    Inconsistent(String),

    #[error("Artifacts in {} are unavailable: {reason}", dir.display())]
    Unavailable { dir: PathBuf, reason: String },
}

/// Fitted state shared read-only by every request
#[derive(Debug, Clone)]
pub struct Artifacts {
    vectorizer: TfidfVectorizer,
    scorer: LogisticScorer,
    labels: LabelMap,
}

impl Artifacts {
    /// Assemble from already-deserialized parts, checking they agree.
    pub fn from_parts(
        vectorizer: TfidfVectorizer,
        model: LogisticModel,
        labels: LabelMap,
    ) -> Result<Self, ArtifactError> {
        vectorizer.validate().map_err(ArtifactError::Inconsistent)?;

        if model.input_size() != vectorizer.dimension() {
            return Err(ArtifactError::Inconsistent(format!(
                "model expects {} features but the vectorizer produces {}",
                model.input_size(),
                vectorizer.dimension()
            )));
        }

        let scorer = LogisticScorer::bind(model, &labels).map_err(ArtifactError::Inconsistent)?;

        Ok(Self {
            vectorizer,
            scorer,
            labels,
        })
    }

    /// Load all three artifacts from a directory
    pub fn load(dir: &Path) -> Result<Self, ArtifactError> {
        let vectorizer: TfidfVectorizer = read_json(&dir.join(VECTORIZER_FILE))?;
        let model: LogisticModel = read_json(&dir.join(MODEL_FILE))?;
        let labels: LabelMap = read_json(&dir.join(LABEL_MAP_FILE))?;

        let artifacts = Self::from_parts(vectorizer, model, labels)?;
        info!(
            "Loaded artifacts from {} ({} vocabulary terms)",
            dir.display(),
            artifacts.vectorizer.vocabulary_size()
        );
        Ok(artifacts)
    }

    /// Write all three artifacts to a directory
    pub fn save(&self, dir: &Path) -> std::io::Result<()> {
        std::fs::create_dir_all(dir)?;
        write_json(&dir.join(VECTORIZER_FILE), &self.vectorizer)?;
        write_json(&dir.join(MODEL_FILE), self.scorer.model())?;
        write_json(&dir.join(LABEL_MAP_FILE), &self.labels)?;
        Ok(())
    }

    pub fn vectorizer(&self) -> &TfidfVectorizer {
        &self.vectorizer
    }

    pub fn scorer(&self) -> &LogisticScorer {
        &self.scorer
    }

    pub fn labels(&self) -> &LabelMap {
        &self.labels
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ArtifactError> {
    let content = std::fs::read_to_string(path).map_err(|source| ArtifactError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| ArtifactError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> std::io::Result<()> {
    let content = serde_json::to_string_pretty(value)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
    std::fs::write(path, content)
}

/// Process-wide artifacts, loaded on first use
static SHARED: OnceLock<(PathBuf, Result<Artifacts, String>)> = OnceLock::new();

/// Get or load the process-wide artifacts.
///
/// The load runs exactly once per process, even under concurrent first
/// access. The first caller's directory wins, and a failed load stays
/// failed for the life of the process.
pub fn shared(dir: &Path) -> Result<&'static Artifacts, ArtifactError> {
    let (loaded_from, result) = SHARED.get_or_init(|| {
        let loaded = Artifacts::load(dir).map_err(|e| e.to_string());
        (dir.to_path_buf(), loaded)
    });

    if loaded_from != dir {
        warn!(
            "Artifacts already loaded from {}; ignoring {}",
            loaded_from.display(),
            dir.display()
        );
    }

    result.as_ref().map_err(|reason| ArtifactError::Unavailable {
        dir: loaded_from.clone(),
        reason: reason.clone(),
    })
}
