//! Minimum-input gate
//!
//! Rejects inputs before they reach the scorer. Rejection is a user-facing,
//! non-fatal outcome.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::RawInput;

/// Default character floor for the `min-chars` gate
pub const DEFAULT_MIN_CHARS: usize = 100;

/// Why an input was rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputRejected {
    #[error("Please enter the article text. The body is required.")]
    EmptyBody,

    #[error("Please enter a longer news article for better accuracy ({len} of {min} characters).")]
    TooShort { len: usize, min: usize },
}

/// Minimum-input rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "gate", rename_all = "kebab-case")]
pub enum InputGate {
    /// Body must contain non-whitespace text; the title is optional
    #[default]
    RequiredFields,
    /// Trimmed `title + " " + body` must have at least `min_chars` characters
    MinChars {
        #[serde(default = "default_min_chars")]
        min_chars: usize,
    },
}

fn default_min_chars() -> usize {
    DEFAULT_MIN_CHARS
}

impl InputGate {
    pub fn check(&self, input: &RawInput) -> Result<(), InputRejected> {
        match *self {
            InputGate::RequiredFields => {
                if input.body.trim().is_empty() {
                    Err(InputRejected::EmptyBody)
                } else {
                    Ok(())
                }
            }
            InputGate::MinChars { min_chars } => {
                let len = input.combined().trim().chars().count();
                if len < min_chars {
                    Err(InputRejected::TooShort {
                        len,
                        min: min_chars,
                    })
                } else {
                    Ok(())
                }
            }
        }
    }
}

impl std::fmt::Display for InputGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputGate::RequiredFields => write!(f, "required-fields"),
            InputGate::MinChars { min_chars } => write!(f, "min-chars ({min_chars})"),
        }
    }
}
