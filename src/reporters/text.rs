//! Text (terminal) reporter with colors and formatting

use crate::models::{OutputRecord, Verdict};
use anyhow::Result;

/// Shown whenever the input falls below the feature density floor
pub const OUT_OF_DOMAIN_NOTICE: &str =
    "The text may be outside the training domain. Prediction confidence may be reduced.";

const BAR_WIDTH: usize = 30;

/// Verdict colors (ANSI escape codes)
fn verdict_color(verdict: Verdict) -> &'static str {
    match verdict {
        Verdict::LikelyReal => "\x1b[32m",  // Green
        Verdict::LikelyFake => "\x1b[31m",  // Red
        Verdict::Uncertain => "\x1b[33m",   // Yellow
        Verdict::OutOfDomain => "\x1b[34m", // Blue
    }
}

/// Reset ANSI color
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const YELLOW: &str = "\x1b[33m";

/// Fixed-width bar for a value in [0, 1]
pub(crate) fn progress_bar(value: f64, width: usize) -> String {
    let filled = ((value.clamp(0.0, 1.0) * width as f64).round() as usize).min(width);
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Render record as formatted terminal output
pub fn render(record: &OutputRecord) -> Result<String> {
    let mut out = String::new();
    let color = verdict_color(record.verdict);

    out.push_str(&format!("\n{BOLD}Veritas Prediction{RESET}\n"));
    out.push_str(&format!(
        "{DIM}──────────────────────────────────────{RESET}\n"
    ));
    out.push_str(&format!(
        "Verdict: {color}{BOLD}{}{RESET}\n\n",
        record.verdict
    ));

    let real = record.confidence.real;
    out.push_str(&format!(
        "REAL confidence  {color}{}{RESET} {:.1}%\n",
        progress_bar(real, BAR_WIDTH),
        real * 100.0
    ));
    out.push_str(&format!(
        "{DIM}FAKE: {:.3}  REAL: {:.3}  label: {}{RESET}\n",
        record.confidence.fake, record.confidence.real, record.prediction
    ));
    out.push_str(&format!(
        "Non-zero features: {}\n",
        record.non_zero_features
    ));

    if record.low_density_warning {
        out.push_str(&format!("\n{YELLOW}⚠ {OUT_OF_DOMAIN_NOTICE}{RESET}\n"));
    }

    Ok(out)
}
