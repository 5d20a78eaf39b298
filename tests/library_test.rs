//! Library entry point tests
//!
//! The artifacts are a process-wide singleton, so every test here points at
//! the same fixture directory.

mod common;

use std::path::PathBuf;
use std::sync::OnceLock;

use common::*;
use veritas::classifier::InputGate;
use veritas::{predict_news, predict_with_config, PredictError, Verdict, VeritasConfig};

/// Writes the artifacts and points the process environment at a scratch
/// home, so `predict_news` never sees the developer's own config.
fn fixture_dir() -> &'static PathBuf {
    static DIR: OnceLock<(tempfile::TempDir, PathBuf)> = OnceLock::new();
    let (_, path) = DIR.get_or_init(|| {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("models");
        write_artifacts(&path);

        std::env::set_var("HOME", dir.path());
        std::env::set_var("XDG_CONFIG_HOME", dir.path().join(".config"));
        std::env::remove_var("VERITAS_MIN_FEATURE_DENSITY");
        std::env::remove_var("VERITAS_OVERRIDE_LOW_DENSITY");
        // predict_news reads its artifact directory from the environment
        std::env::set_var("VERITAS_ARTIFACTS", &path);
        (dir, path)
    });
    path
}

fn config() -> VeritasConfig {
    let mut config = VeritasConfig::default();
    config.artifacts.dir = fixture_dir().clone();
    config
}

#[test]
fn test_predict_news_scenarios() {
    fixture_dir();

    let record = predict_news(MARS_TITLE, MARS_BODY).unwrap();
    assert_eq!(record.prediction, "REAL");
    assert_eq!(record.non_zero_features as u64, MARS_NNZ);
    assert!((record.confidence.fake + record.confidence.real - 1.0).abs() <= 0.0015);

    let err = predict_news("", "").unwrap_err();
    assert!(matches!(err, PredictError::Rejected(_)));

    let record = predict_news("", "alpha bravo charlie delta echo").unwrap();
    assert_eq!(record.verdict, Verdict::OutOfDomain);
    assert_eq!(record.non_zero_features, 0);

    // Config is resolved once; a file or env var broken afterwards is not reread
    let user_config = veritas::config::user_config_path().unwrap();
    std::fs::create_dir_all(user_config.parent().unwrap()).unwrap();
    std::fs::write(&user_config, "[[[ broken").unwrap();
    std::env::set_var("VERITAS_MIN_FEATURE_DENSITY", "lots");

    let again = predict_news(MARS_TITLE, MARS_BODY).unwrap();
    assert_eq!(again.non_zero_features as u64, MARS_NNZ);
    assert_eq!(again.verdict, Verdict::OutOfDomain);
    let err = predict_news("", "").unwrap_err();
    assert!(matches!(err, PredictError::Rejected(_)));

    // A fresh load does see the broken file
    assert!(VeritasConfig::load().is_err());
}

#[test]
fn test_predict_with_config_variants() {
    let mut config = config();
    config.policy.min_feature_density = 5;

    let real = predict_with_config(&config, MARS_TITLE, MARS_BODY).unwrap();
    assert_eq!(real.verdict, Verdict::LikelyReal);
    assert!(!real.low_density_warning);

    let fake = predict_with_config(&config, "", SENSATIONAL_BODY).unwrap();
    assert_eq!(fake.verdict, Verdict::LikelyFake);

    config.policy.min_feature_density = 30;
    config.policy.override_verdict_on_low_density = false;
    let annotated = predict_with_config(&config, "", SENSATIONAL_BODY).unwrap();
    assert_eq!(annotated.verdict, Verdict::LikelyFake);
    assert!(annotated.low_density_warning);

    config.validation = InputGate::MinChars { min_chars: 100 };
    let err = predict_with_config(&config, "", "short").unwrap_err();
    assert!(err.to_string().contains("longer news article"));
}

#[test]
fn test_concurrent_first_use() {
    let config = config();
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let config = config.clone();
            std::thread::spawn(move || predict_with_config(&config, MARS_TITLE, MARS_BODY).unwrap())
        })
        .collect();

    let records: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert!(records.windows(2).all(|w| w[0] == w[1]));
}

#[test]
fn test_first_artifact_dir_wins() {
    let config = config();
    let first = predict_with_config(&config, MARS_TITLE, MARS_BODY).unwrap();

    let mut elsewhere = config.clone();
    elsewhere.artifacts.dir = PathBuf::from("no-such-models-dir");
    let second = predict_with_config(&elsewhere, MARS_TITLE, MARS_BODY).unwrap();
    assert_eq!(first, second);
}
