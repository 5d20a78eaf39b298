//! CLI command definitions and handlers

mod config;
mod doctor;
mod form;
mod predict;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use veritas::config::VeritasConfig;
use veritas::reporters::OutputFormat;

/// Veritas - fake news detection
///
/// Runs entirely offline against a pre-fitted model directory.
#[derive(Parser, Debug)]
#[command(name = "veritas")]
#[command(
    version,
    about = "Fake news detection with TF-IDF + logistic regression and an explicit verdict policy",
    after_help = "\
Examples:
  veritas predict --title \"Headline\" --text \"Article body...\"
  veritas predict --text-file article.txt --format json
  veritas form                          Interactive form
  veritas doctor                        Check the model artifacts
  veritas config show                   Print the effective configuration"
)]
pub struct Cli {
    /// Directory containing model.json, vectorizer.json and label_map.json
    #[arg(long, global = true, env = "VERITAS_ARTIFACTS", value_name = "DIR")]
    pub artifacts: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "warn", value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Classify one article
    #[command(after_help = "\
Exit codes:
  0  a verdict was produced
  2  the input was rejected (e.g. empty body)
  1  fatal error (missing or inconsistent artifacts, bad config)

Examples:
  veritas predict --title \"NASA confirms water on Mars\" --text \"Scientists at NASA...\"
  veritas predict --text-file article.txt --format json --compact
  cat article.txt | veritas predict --text-file -")]
    Predict {
        /// Article headline (optional)
        #[arg(long, short = 't', default_value = "")]
        title: String,

        /// Article body
        #[arg(long, conflicts_with = "text_file")]
        text: Option<String>,

        /// Read the article body from a file ("-" for stdin)
        #[arg(long, value_name = "FILE")]
        text_file: Option<PathBuf>,

        /// Output format: text, json
        #[arg(long, short = 'f', default_value = "text", value_parser = ["text", "json"])]
        format: String,

        /// Single-line JSON (with --format json)
        #[arg(long)]
        compact: bool,
    },

    /// Interactive form: enter a title and body, get a verdict
    Form,

    /// Check that the model artifacts load and report their shape
    Doctor,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Create the user config file with example settings
    Init,
    /// Show the effective config and where it came from
    Show,
}

/// Load layered config and apply CLI overrides
fn load_config(cli_artifacts: Option<PathBuf>) -> Result<VeritasConfig> {
    let mut config = VeritasConfig::load().context("Failed to load configuration")?;
    if let Some(dir) = cli_artifacts {
        config.artifacts.dir = dir;
    }
    Ok(config)
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Predict {
            title,
            text,
            text_file,
            format,
            compact,
        } => {
            let config = load_config(cli.artifacts)?;
            let body = match (text, text_file) {
                (Some(text), _) => text,
                (None, Some(path)) => predict::read_body(&path)?,
                (None, None) => String::new(),
            };
            let format: OutputFormat = format.parse()?;
            predict::run(&config, &title, &body, format, compact)
        }

        Commands::Form => {
            let config = load_config(cli.artifacts)?;
            form::run(&config)
        }

        Commands::Doctor => {
            let config = load_config(cli.artifacts)?;
            doctor::run(&config)
        }

        Commands::Config { action } => match action {
            ConfigAction::Init => config::init(),
            ConfigAction::Show => config::show(load_config(cli.artifacts)?),
        },
    }
}
