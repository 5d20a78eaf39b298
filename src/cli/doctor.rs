//! Doctor command - check model artifacts and settings

use anyhow::{bail, Result};
use console::style;

use veritas::classifier::artifacts::{LABEL_MAP_FILE, MODEL_FILE, VECTORIZER_FILE};
use veritas::classifier::{Artifacts, FeatureExtractor};
use veritas::config::VeritasConfig;

pub fn run(config: &VeritasConfig) -> Result<()> {
    println!("🩺 Veritas Doctor\n");

    let dir = &config.artifacts.dir;
    println!(
        "Artifacts directory: {}",
        style(dir.display()).cyan()
    );

    let mut missing = 0;
    for file in [MODEL_FILE, VECTORIZER_FILE, LABEL_MAP_FILE] {
        if dir.join(file).is_file() {
            println!("{} {}", style("✓").green(), file);
        } else {
            println!("{} {} (not found)", style("✗").red(), file);
            missing += 1;
        }
    }
    if missing > 0 {
        bail!("{} artifact file(s) missing in {}", missing, dir.display());
    }

    // Full load runs every consistency check
    let artifacts = match Artifacts::load(dir) {
        Ok(artifacts) => artifacts,
        Err(e) => {
            println!("{} Load failed: {}", style("✗").red(), e);
            return Err(e.into());
        }
    };

    let vectorizer = artifacts.vectorizer();
    let model = artifacts.scorer().model();
    let labels = artifacts.labels();

    println!(
        "{} Vectorizer: {} terms, {} stop words, norm={}, sublinear_tf={}",
        style("✓").green(),
        vectorizer.dimension(),
        vectorizer.stop_word_count(),
        vectorizer.norm(),
        vectorizer.sublinear_tf()
    );
    println!(
        "{} Model: {} coefficients, intercept {:.4}, classes {:?}",
        style("✓").green(),
        model.input_size(),
        model.intercept,
        model.classes
    );
    println!(
        "{} Labels: FAKE={} REAL={}",
        style("✓").green(),
        labels.fake_id(),
        labels.real_id()
    );

    let policy = &config.policy;
    println!(
        "\nPolicy: REAL >= {:.2}, FAKE <= {:.2}, density floor {} ({})",
        policy.real_threshold,
        policy.fake_threshold,
        policy.min_feature_density,
        if policy.override_verdict_on_low_density {
            "overrides verdict"
        } else {
            "warning only"
        }
    );
    println!("Input gate: {}", config.validation);

    println!("\n✅ All checks passed!");
    Ok(())
}
