//! Output reporters for predictions
//!
//! Supports multiple output formats:
//! - `text` - Terminal output with colors and a confidence bar
//! - `json` - Machine-readable JSON
//!
//! The interactive form renders the same `OutputRecord`.

mod json;
pub mod text;

use crate::classifier::Decision;
use crate::models::{ClassProbabilities, Confidence, OutputRecord};
use anyhow::{anyhow, Result};
use std::str::FromStr;

/// Decimal places kept for confidences in an `OutputRecord`
pub const CONFIDENCE_DECIMALS: i32 = 3;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" | "terminal" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(anyhow!("Unknown format '{}'. Valid formats: text, json", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Build the output record for one prediction
pub fn present(
    decision: &Decision,
    probabilities: &ClassProbabilities,
    predicted_label: &str,
    nnz: usize,
) -> OutputRecord {
    OutputRecord {
        prediction: predicted_label.to_string(),
        verdict: decision.verdict,
        confidence: Confidence {
            fake: round_to(probabilities.fake, CONFIDENCE_DECIMALS),
            real: round_to(probabilities.real, CONFIDENCE_DECIMALS),
        },
        non_zero_features: nnz,
        low_density_warning: decision.low_density,
    }
}

/// Render a record in the specified format
pub fn report(record: &OutputRecord, format: &str) -> Result<String> {
    let fmt = OutputFormat::from_str(format)?;
    report_with_format(record, fmt)
}

/// Render a record using an OutputFormat enum
pub fn report_with_format(record: &OutputRecord, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => text::render(record),
        OutputFormat::Json => json::render(record),
    }
}

/// Render a record as single-line JSON
pub fn report_compact_json(record: &OutputRecord) -> Result<String> {
    json::render_compact(record)
}
