//! Config command - create and inspect configuration

use anyhow::Result;
use console::style;
use std::path::Path;

use veritas::config::{self, VeritasConfig, PROJECT_CONFIG_FILE};

pub fn init() -> Result<()> {
    let path = config::init_user_config()?;
    println!(
        "{} Config initialized at: {}",
        style("✓").green(),
        style(path.display()).cyan()
    );
    println!("\nPoint it at your model directory, or set via environment:");
    println!("  export {}=\"/path/to/models\"", config::ENV_ARTIFACTS);
    Ok(())
}

fn status(found: bool) -> String {
    if found {
        style("✓").green().to_string()
    } else {
        style("(not found)").dim().to_string()
    }
}

pub fn show(config: VeritasConfig) -> Result<()> {
    println!("📁 Config paths:");
    if let Some(user_path) = config::user_config_path() {
        println!("  User:    {} {}", user_path.display(), status(user_path.exists()));
    }
    println!(
        "  Project: ./{} {}",
        PROJECT_CONFIG_FILE,
        status(Path::new(PROJECT_CONFIG_FILE).exists())
    );

    for var in [
        config::ENV_ARTIFACTS,
        config::ENV_MIN_FEATURE_DENSITY,
        config::ENV_OVERRIDE_LOW_DENSITY,
    ] {
        if let Ok(value) = std::env::var(var) {
            println!("  Env:     {}={}", var, value);
        }
    }

    println!("\n{}", style("Effective configuration:").bold());
    println!("{}", config.to_toml()?);
    Ok(())
}
