//! Configuration module for Veritas
//!
//! Settings are layered, later layers win:
//! 1. Built-in defaults
//! 2. User config (`~/.config/veritas/config.toml`)
//! 3. Project config (`./veritas.toml`)
//! 4. Environment variables
//! 5. CLI flags (applied by the caller)

mod user_config;

pub use user_config::{init_user_config, user_config_path, EXAMPLE_CONFIG};

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use thiserror::Error;

use crate::classifier::{InputGate, VerdictPolicy};

/// Project-level config file, looked up in the working directory
pub const PROJECT_CONFIG_FILE: &str = "veritas.toml";
/// Artifact directory used when nothing else is configured
pub const DEFAULT_ARTIFACTS_DIR: &str = "models";

pub const ENV_ARTIFACTS: &str = "VERITAS_ARTIFACTS";
pub const ENV_MIN_FEATURE_DENSITY: &str = "VERITAS_MIN_FEATURE_DENSITY";
pub const ENV_OVERRIDE_LOW_DENSITY: &str = "VERITAS_OVERRIDE_LOW_DENSITY";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid value for {var}: '{value}'")]
    Env { var: &'static str, value: String },

    #[error("Invalid verdict policy: {0}")]
    Policy(String),
}

/// Effective configuration after all layers are applied
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VeritasConfig {
    pub artifacts: ArtifactsConfig,
    pub policy: VerdictPolicy,
    pub validation: InputGate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtifactsConfig {
    /// Directory holding model.json, vectorizer.json and label_map.json
    pub dir: PathBuf,
}

impl Default for ArtifactsConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(DEFAULT_ARTIFACTS_DIR),
        }
    }
}

impl Default for VeritasConfig {
    fn default() -> Self {
        Self {
            artifacts: ArtifactsConfig::default(),
            policy: VerdictPolicy::default(),
            validation: InputGate::default(),
        }
    }
}

/// One config file as written; every field optional so files can be partial
#[derive(Debug, Default, Deserialize)]
struct ConfigLayer {
    #[serde(default)]
    artifacts: ArtifactsLayer,
    #[serde(default)]
    policy: PolicyLayer,
    validation: Option<InputGate>,
}

#[derive(Debug, Default, Deserialize)]
struct ArtifactsLayer {
    dir: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
struct PolicyLayer {
    real_threshold: Option<f64>,
    fake_threshold: Option<f64>,
    min_feature_density: Option<usize>,
    override_verdict_on_low_density: Option<bool>,
}

impl VeritasConfig {
    /// Load config from the standard locations and the process environment
    pub fn load() -> Result<Self, ConfigError> {
        let user = user_config_path();
        Self::load_from(
            user.as_deref(),
            Some(Path::new(PROJECT_CONFIG_FILE)),
            |var| std::env::var(var).ok(),
        )
    }

    /// Process-wide config, loaded from the standard locations on first use.
    ///
    /// Once a load succeeds the files and environment are not read again.
    /// A failed load is not memoized, so the next call retries.
    pub fn shared() -> Result<&'static Self, ConfigError> {
        static SHARED: OnceLock<VeritasConfig> = OnceLock::new();
        if let Some(config) = SHARED.get() {
            return Ok(config);
        }
        let loaded = Self::load()?;
        Ok(SHARED.get_or_init(|| loaded))
    }

    /// Load config from explicit file paths and an environment lookup.
    ///
    /// Missing files are skipped; unreadable or malformed files are errors.
    pub fn load_from(
        user: Option<&Path>,
        project: Option<&Path>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let mut config = VeritasConfig::default();

        for path in [user, project].into_iter().flatten() {
            if let Some(layer) = read_layer(path)? {
                tracing::debug!("Applying config from {}", path.display());
                config.merge(layer);
            }
        }

        config.apply_env(env)?;
        config.validate()?;
        Ok(config)
    }

    /// Merge a file layer into this config (layer takes priority)
    fn merge(&mut self, other: ConfigLayer) {
        if let Some(dir) = other.artifacts.dir {
            self.artifacts.dir = dir;
        }
        if let Some(v) = other.policy.real_threshold {
            self.policy.real_threshold = v;
        }
        if let Some(v) = other.policy.fake_threshold {
            self.policy.fake_threshold = v;
        }
        if let Some(v) = other.policy.min_feature_density {
            self.policy.min_feature_density = v;
        }
        if let Some(v) = other.policy.override_verdict_on_low_density {
            self.policy.override_verdict_on_low_density = v;
        }
        if let Some(gate) = other.validation {
            self.validation = gate;
        }
    }

    fn apply_env(&mut self, env: impl Fn(&str) -> Option<String>) -> Result<(), ConfigError> {
        if let Some(dir) = env(ENV_ARTIFACTS).filter(|v| !v.is_empty()) {
            self.artifacts.dir = PathBuf::from(dir);
        }
        if let Some(value) = env(ENV_MIN_FEATURE_DENSITY) {
            self.policy.min_feature_density =
                value.trim().parse().map_err(|_| ConfigError::Env {
                    var: ENV_MIN_FEATURE_DENSITY,
                    value: value.clone(),
                })?;
        }
        if let Some(value) = env(ENV_OVERRIDE_LOW_DENSITY) {
            self.policy.override_verdict_on_low_density =
                parse_bool(&value).ok_or(ConfigError::Env {
                    var: ENV_OVERRIDE_LOW_DENSITY,
                    value,
                })?;
        }
        Ok(())
    }

    /// Reject threshold settings the verdict policy cannot honor
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.policy.validate().map_err(ConfigError::Policy)
    }

    /// Effective config as TOML, in the same shape the files use
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

fn read_layer(path: &Path) -> Result<Option<ConfigLayer>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&content)
        .map(Some)
        .map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_defaults_without_files() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        let config = VeritasConfig::load_from(Some(missing.as_path()), None, no_env).unwrap();
        assert_eq!(config, VeritasConfig::default());
        assert_eq!(config.artifacts.dir, PathBuf::from("models"));
        assert_eq!(config.policy.min_feature_density, 30);
        assert!(config.policy.override_verdict_on_low_density);
        assert_eq!(config.validation, InputGate::RequiredFields);
    }

    #[test]
    fn test_toml_parsing_full() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            dir.path(),
            "config.toml",
            r#"
[artifacts]
dir = "/opt/veritas"

[policy]
real_threshold = 0.8
fake_threshold = 0.2
min_feature_density = 40
override_verdict_on_low_density = false

[validation]
gate = "min-chars"
min_chars = 100
"#,
        );
        let config = VeritasConfig::load_from(Some(path.as_path()), None, no_env).unwrap();
        assert_eq!(config.artifacts.dir, PathBuf::from("/opt/veritas"));
        assert_eq!(config.policy.real_threshold, 0.8);
        assert_eq!(config.policy.fake_threshold, 0.2);
        assert_eq!(config.policy.min_feature_density, 40);
        assert!(!config.policy.override_verdict_on_low_density);
        assert_eq!(config.validation, InputGate::MinChars { min_chars: 100 });
    }

    #[test]
    fn test_project_overrides_user() {
        let dir = tempfile::tempdir().unwrap();
        let user = write(
            dir.path(),
            "user.toml",
            "[artifacts]\ndir = \"user-models\"\n[policy]\nmin_feature_density = 10\n",
        );
        let project = write(
            dir.path(),
            "veritas.toml",
            "[artifacts]\ndir = \"project-models\"\n",
        );
        let config = VeritasConfig::load_from(Some(user.as_path()), Some(project.as_path()), no_env).unwrap();
        assert_eq!(config.artifacts.dir, PathBuf::from("project-models"));
        // untouched by the project file
        assert_eq!(config.policy.min_feature_density, 10);
    }

    #[test]
    fn test_env_overrides_files() {
        let dir = tempfile::tempdir().unwrap();
        let project = write(
            dir.path(),
            "veritas.toml",
            "[artifacts]\ndir = \"project-models\"\n[policy]\nmin_feature_density = 10\n",
        );
        let env = HashMap::from([
            (ENV_ARTIFACTS, "/env/models"),
            (ENV_MIN_FEATURE_DENSITY, "40"),
            (ENV_OVERRIDE_LOW_DENSITY, "false"),
        ]);
        let config = VeritasConfig::load_from(None, Some(project.as_path()), |var| {
            env.get(var).map(|v| v.to_string())
        })
        .unwrap();
        assert_eq!(config.artifacts.dir, PathBuf::from("/env/models"));
        assert_eq!(config.policy.min_feature_density, 40);
        assert!(!config.policy.override_verdict_on_low_density);
    }

    #[test]
    fn test_bad_env_value() {
        let err = VeritasConfig::load_from(None, None, |var| {
            (var == ENV_MIN_FEATURE_DENSITY).then(|| "lots".to_string())
        })
        .unwrap_err();
        assert!(matches!(err, ConfigError::Env { .. }));
        assert!(err.to_string().contains(ENV_MIN_FEATURE_DENSITY));
    }

    #[test]
    fn test_invalid_toml_names_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "veritas.toml", "this is [[ not valid toml {{{}}}");
        let err = VeritasConfig::load_from(None, Some(path.as_path()), no_env).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("veritas.toml"));
    }

    #[test]
    fn test_inverted_thresholds_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            dir.path(),
            "veritas.toml",
            "[policy]\nreal_threshold = 0.3\nfake_threshold = 0.7\n",
        );
        let err = VeritasConfig::load_from(None, Some(path.as_path()), no_env).unwrap_err();
        assert!(matches!(err, ConfigError::Policy(_)));
    }

    #[test]
    fn test_to_toml_reparses() {
        let config = VeritasConfig {
            validation: InputGate::MinChars { min_chars: 120 },
            ..Default::default()
        };
        let text = config.to_toml().unwrap();
        let back: VeritasConfig = toml::from_str(&text).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_parse_bool() {
        assert_eq!(parse_bool("TRUE"), Some(true));
        assert_eq!(parse_bool(" off "), Some(false));
        assert_eq!(parse_bool("maybe"), None);
    }
}
