// screentl
// SPDX-License-Identifier: BSD-3-Clause

//! # CLI Parser
//!
//! Command-line interface parsing using clap.
//!
//! This module defines the CLI structure and handles argument parsing.
//! Security validation happens in the validator module after parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Main CLI structure
#[derive(Parser, Debug, Clone)]
#[command(name = "screentl")]
#[command(about = concat!("Real-time screen translation engine v", env!("CARGO_PKG_VERSION")))]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Engine configuration file path (capture/OCR/translation/overlay
    /// settings). Defaults if omitted; see `TranslatorConfig`.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override worker thread count for capture/translation stages
    #[arg(long)]
    pub cpu_threads: Option<usize>,
}

/// CLI subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Run the translation engine against a set of capture regions
    Run {
        /// Path to a multi-region capture layout file (JSON)
        #[arg(short, long)]
        regions: PathBuf,

        /// Source language override (BCP-47 tag, e.g. "ja")
        #[arg(long)]
        source_language: Option<String>,

        /// Target language override (BCP-47 tag, e.g. "en")
        #[arg(long)]
        target_language: Option<String>,
    },

    /// Validate an engine configuration file without starting capture
    ValidateConfig {
        /// Engine configuration file to validate
        config: PathBuf,
    },

    /// Validate a multi-region capture layout file without starting capture
    ValidateRegions {
        /// Region layout file to validate
        regions: PathBuf,
    },

    /// Print resolved configuration and exit
    ShowConfig,
}

/// Parse CLI arguments
///
/// This is the entry point for CLI parsing. It uses clap to parse
/// arguments and returns the parsed CLI structure.
///
/// # Panics
///
/// Clap will exit the process with appropriate error message if parsing fails
pub fn parse_cli() -> Cli {
    Cli::parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_run_with_required_regions() {
        let cli = Cli::parse_from(["screentl", "run", "--regions", "regions.json"]);
        match cli.command {
            Commands::Run { regions, .. } => assert_eq!(regions, PathBuf::from("regions.json")),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn parses_validate_config() {
        let cli = Cli::parse_from(["screentl", "validate-config", "config.toml"]);
        match cli.command {
            Commands::ValidateConfig { config } => assert_eq!(config, PathBuf::from("config.toml")),
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
