// screentl
// SPDX-License-Identifier: BSD-3-Clause

//! # Bootstrap Module
//!
//! The bootstrap module sits **outside** the engine's own application /
//! infrastructure layers and provides:
//!
//! - **Entry point** - CLI parsing and application lifecycle management
//! - **Platform abstraction** - OS-specific operations (POSIX vs Windows)
//! - **Signal handling** - Graceful shutdown (SIGTERM, SIGINT, SIGHUP)
//! - **Argument parsing** - Secure CLI argument validation
//! - **Error handling** - Unix exit code mapping
//! - **Async coordination** - Shutdown coordination and cancellation
//!
//! ## Key Design Principles
//!
//! 1. **Separation from the engine layers** - the engine crate cannot
//!    depend back on bootstrap; bootstrap depends on the engine.
//! 2. **Platform abstraction** - OS-specific functionality lives behind a
//!    trait, with POSIX and Windows implementations selected at compile
//!    time.
//! 3. **Graceful shutdown** - signal handlers feed a cancellation token
//!    with a grace period before hard termination.
//! 4. **Security first** - all CLI arguments are validated for path
//!    traversal and injection patterns before use.
//! 5. **Testability** - every component sits behind a trait, with no-op
//!    implementations available for tests.
//!
//! ## Module Structure
//!
//! - `platform` - OS abstraction (Unix/Windows)
//! - `signals` - Signal handling (SIGTERM, SIGINT, SIGHUP)
//! - `cli` - Secure argument parsing
//! - `config` - Bootstrap-phase application configuration
//! - `exit_code` - Unix exit code enumeration
//! - `logger` - Process-wide tracing subscriber plus bootstrap-phase logging
//! - `shutdown` - Shutdown coordination

pub mod cli;
pub mod config;
pub mod exit_code;
pub mod logger;
pub mod platform;
pub mod shutdown;
pub mod signals;

pub use cli::{parse_and_validate, ValidatedCli, ValidatedCommand};
pub use exit_code::{result_to_exit_code, ExitCode};

/// Bootstrap and parse CLI arguments
///
/// This is the main entry point for the bootstrap layer. It handles CLI
/// parsing with clap and security validation, and returns the validated
/// configuration.
///
/// The caller is responsible for:
/// - Running the engine
/// - Mapping the result to an exit code using [`result_to_exit_code`]
///
/// # Errors
///
/// Returns `cli::ParseError` if CLI parsing or validation fails.
/// Clap handles `--help` and `--version` automatically and exits the
/// process.
///
/// # Example
///
/// ```no_run
/// use screentl_bootstrap::{bootstrap_cli, result_to_exit_code};
/// use screentl_domain::error::TranslatorError;
///
/// #[tokio::main]
/// async fn main() -> std::process::ExitCode {
///     let validated_cli = match bootstrap_cli() {
///         Ok(cli) => cli,
///         Err(e) => {
///             eprintln!("CLI error: {e}");
///             return std::process::ExitCode::from(65); // EX_DATAERR
///         }
///     };
///
///     let result = run_engine(validated_cli).await;
///     std::process::ExitCode::from(result_to_exit_code(result).as_i32() as u8)
/// }
///
/// async fn run_engine(_cli: screentl_bootstrap::ValidatedCli) -> Result<(), TranslatorError> {
///     Ok(())
/// }
/// ```
pub fn bootstrap_cli() -> Result<ValidatedCli, cli::ParseError> {
    cli::parse_and_validate()
}
