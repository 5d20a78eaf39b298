//! Veritas - fake news detection
//!
//! Classifies a news article (title + body) as likely real, likely fake,
//! uncertain, or out of domain, using a pre-fitted TF-IDF vectorizer and
//! logistic regression model loaded from disk.
//!
//! ```no_run
//! let record = veritas::predict_news(
//!     "NASA confirms water on Mars",
//!     "Scientists at NASA announced today that the Mars rover found evidence of water.",
//! )?;
//! println!("{} ({:.1}% real)", record.verdict, record.confidence.real * 100.0);
//! # Ok::<(), veritas::PredictError>(())
//! ```

pub mod classifier;
pub mod config;
pub mod models;
pub mod reporters;

pub use classifier::{PredictError, Predictor};
pub use config::VeritasConfig;
pub use models::{OutputRecord, RawInput, Verdict};

/// Classify one article using the process-wide config and artifacts.
///
/// Both come from disk on the first successful call and are reused
/// afterwards, so later calls do no file I/O and only fail on input
/// validation.
pub fn predict_news(title: &str, text: &str) -> Result<OutputRecord, PredictError> {
    let config = VeritasConfig::shared()?;
    predict_with_config(config, title, text)
}

/// Like [`predict_news`], with an explicit configuration.
///
/// The policy and input gate come from `config` on every call. The
/// artifacts do not: they are loaded once per process from the first
/// directory any caller asks for, and a later `config.artifacts.dir`
/// naming another directory still scores with that first model (a
/// warning is logged). Use [`Predictor`] with your own
/// [`classifier::Artifacts`] to score against several models.
pub fn predict_with_config(
    config: &VeritasConfig,
    title: &str,
    text: &str,
) -> Result<OutputRecord, PredictError> {
    let artifacts = classifier::shared(&config.artifacts.dir)?;
    let predictor = Predictor::new(artifacts, config.policy, config.validation);
    Ok(predictor.predict(&RawInput::new(title, text))?)
}
