//! Predict command - classify one article

use anyhow::{Context, Result};
use console::style;
use std::io::Read;
use std::path::Path;

use veritas::classifier::{shared, Predictor};
use veritas::config::VeritasConfig;
use veritas::models::RawInput;
use veritas::reporters::{self, OutputFormat};

/// Exit code for input rejected by the gate
pub const EXIT_REJECTED: i32 = 2;

/// Read the article body from a file, or stdin for "-"
pub fn read_body(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut body = String::new();
        std::io::stdin()
            .read_to_string(&mut body)
            .context("Failed to read article from stdin")?;
        return Ok(body);
    }
    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read article from {}", path.display()))
}

/// Run the predict command
pub fn run(
    config: &VeritasConfig,
    title: &str,
    body: &str,
    format: OutputFormat,
    compact: bool,
) -> Result<()> {
    let artifacts = shared(&config.artifacts.dir).with_context(|| {
        format!(
            "Cannot load model artifacts (run 'veritas doctor --artifacts {}' for details)",
            config.artifacts.dir.display()
        )
    })?;
    let predictor = Predictor::new(artifacts, config.policy, config.validation);

    let record = match predictor.predict(&RawInput::new(title, body)) {
        Ok(record) => record,
        Err(rejected) => {
            eprintln!("{} {}", style("⚠").yellow().bold(), rejected);
            std::process::exit(EXIT_REJECTED);
        }
    };

    let output = match format {
        OutputFormat::Json if compact => reporters::report_compact_json(&record)?,
        _ => reporters::report_with_format(&record, format)?,
    };
    println!("{}", output);
    Ok(())
}
