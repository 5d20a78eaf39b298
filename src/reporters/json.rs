//! JSON reporter
//!
//! Outputs the OutputRecord as pretty-printed JSON for programmatic callers.

use crate::models::OutputRecord;
use anyhow::Result;

/// Render record as JSON
pub fn render(record: &OutputRecord) -> Result<String> {
    Ok(serde_json::to_string_pretty(record)?)
}

/// Render record as compact JSON (single line)
pub fn render_compact(record: &OutputRecord) -> Result<String> {
    Ok(serde_json::to_string(record)?)
}
