// screentl
// SPDX-License-Identifier: BSD-3-Clause

//! # Command-Line Interface Module
//!
//! Bootstrap-layer CLI handling with security-first design.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │  1. parser::parse()                 │  Parse CLI with clap
//! └─────────────────┬───────────────────┘
//!                   ↓
//! ┌─────────────────────────────────────┐
//! │  2. validator::validate()           │  Security validation
//! └─────────────────┬───────────────────┘
//!                   ↓
//! ┌─────────────────────────────────────┐
//! │  3. ValidatedCli                    │  Safe, validated config
//! └─────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - `parser` - CLI structure and clap parsing
//! - `validator` - Security validation layer

pub mod parser;
pub mod validator;

pub use parser::{parse_cli, Cli, Commands};
pub use validator::{ParseError, SecureArgParser};

use std::path::PathBuf;

/// Validated CLI configuration
///
/// This structure holds all CLI arguments after security validation.
/// All paths are canonicalized and all values are range-checked.
#[derive(Debug, Clone)]
pub struct ValidatedCli {
    pub command: ValidatedCommand,
    pub verbose: bool,
    pub config: Option<PathBuf>,
    pub cpu_threads: Option<usize>,
}

/// Validated command variants
#[derive(Debug, Clone)]
pub enum ValidatedCommand {
    Run {
        regions: PathBuf,
        source_language: Option<String>,
        target_language: Option<String>,
    },
    ValidateConfig {
        config: PathBuf,
    },
    ValidateRegions {
        regions: PathBuf,
    },
    ShowConfig,
}

/// Parse and validate CLI arguments
///
/// This function combines parsing and validation:
/// 1. Parse CLI with clap
/// 2. Validate all paths with SecureArgParser
/// 3. Validate all numeric values
/// 4. Return ValidatedCli on success
///
/// # Errors
///
/// Returns `ParseError` if any validation fails
pub fn parse_and_validate() -> Result<ValidatedCli, ParseError> {
    let cli = parse_cli();
    validate_cli(cli)
}

/// Validate parsed CLI arguments
///
/// Applies security validation to all CLI arguments:
/// - Path canonicalization and security checks
/// - Numeric range validation
/// - Language tag validation
///
/// # Errors
///
/// Returns `ParseError` if any validation fails
fn validate_cli(cli: Cli) -> Result<ValidatedCli, ParseError> {
    let config = if let Some(ref path) = cli.config {
        Some(SecureArgParser::validate_path(&path.to_string_lossy())?)
    } else {
        None
    };

    if let Some(threads) = cli.cpu_threads {
        if threads == 0 || threads > 128 {
            return Err(ParseError::InvalidValue {
                arg: "cpu-threads".to_string(),
                reason: "must be between 1 and 128".to_string(),
            });
        }
    }

    let command = match cli.command {
        Commands::Run {
            regions,
            source_language,
            target_language,
        } => {
            let validated_regions = SecureArgParser::validate_path(&regions.to_string_lossy())?;

            let validated_source = source_language
                .map(|lang| SecureArgParser::validate_language_tag("source-language", &lang))
                .transpose()?;
            let validated_target = target_language
                .map(|lang| SecureArgParser::validate_language_tag("target-language", &lang))
                .transpose()?;

            ValidatedCommand::Run {
                regions: validated_regions,
                source_language: validated_source,
                target_language: validated_target,
            }
        }
        Commands::ValidateConfig { config } => {
            let validated_config = SecureArgParser::validate_path(&config.to_string_lossy())?;
            ValidatedCommand::ValidateConfig { config: validated_config }
        }
        Commands::ValidateRegions { regions } => {
            let validated_regions = SecureArgParser::validate_path(&regions.to_string_lossy())?;
            ValidatedCommand::ValidateRegions { regions: validated_regions }
        }
        Commands::ShowConfig => ValidatedCommand::ShowConfig,
    };

    Ok(ValidatedCli {
        command,
        verbose: cli.verbose,
        config,
        cpu_threads: cli.cpu_threads,
    })
}
