//! User-level configuration file
//!
//! Lives at `~/.config/veritas/config.toml` (platform config dir).

use anyhow::Result;
use std::path::PathBuf;

/// Written by `veritas config init`
pub const EXAMPLE_CONFIG: &str = r#"# Veritas User Configuration

[artifacts]
# Directory with model.json, vectorizer.json and label_map.json
# dir = "models"

[policy]
# P(REAL) at or above this is "Likely REAL"
# real_threshold = 0.70
# P(REAL) at or below this is "Likely FAKE"
# fake_threshold = 0.30
# Inputs with fewer known vocabulary terms are flagged as out of domain
# min_feature_density = 30
# true: low density replaces the verdict; false: it is only a warning
# override_verdict_on_low_density = true

[validation]
# "required-fields" (body must not be empty) or "min-chars"
gate = "required-fields"
# min_chars = 100
"#;

/// Get the user config file path
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("veritas").join("config.toml"))
}

/// Initialize user config directory and create example config.
///
/// An existing file is left untouched.
pub fn init_user_config() -> Result<PathBuf> {
    let config_path =
        user_config_path().ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !config_path.exists() {
        std::fs::write(&config_path, EXAMPLE_CONFIG)?;
    }

    Ok(config_path)
}
