// screentl
// SPDX-License-Identifier: BSD-3-Clause

//! # Bootstrap Configuration
//!
//! `AppConfig` holds the settings resolved during the bootstrap phase —
//! before the engine's own `TranslatorConfig` is loaded from disk. It is
//! built from CLI flags plus environment defaults and is immutable once
//! constructed, so it can be handed to spawned tasks without synchronization.
//!
//! ## Usage
//!
//! ```rust
//! use screentl_bootstrap::config::{AppConfig, LogLevel};
//!
//! let config = AppConfig::builder()
//!     .app_name("screentl")
//!     .log_level(LogLevel::Info)
//!     .build();
//!
//! println!("Running: {}", config.app_name());
//! ```

use std::path::PathBuf;

/// Log level configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Error messages only
    Error,
    /// Warnings and errors
    Warn,
    /// Info, warnings, and errors (default)
    Info,
    /// All messages including debug
    Debug,
    /// All messages including trace
    Trace,
}

impl Default for LogLevel {
    fn default() -> Self {
        LogLevel::Info
    }
}

impl LogLevel {
    /// Convert to tracing Level
    pub fn to_tracing_level(&self) -> tracing::Level {
        match self {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Trace => tracing::Level::TRACE,
        }
    }
}

/// Bootstrap-phase application configuration.
///
/// Immutable once built; separate from the engine's `TranslatorConfig`
/// (capture/OCR/translation/overlay settings), which is loaded afterward
/// using [`AppConfig::config_path`] as an override.
#[derive(Debug, Clone)]
pub struct AppConfig {
    app_name: String,
    log_level: LogLevel,
    config_path: Option<PathBuf>,
    cpu_threads: Option<usize>,
    verbose: bool,
    dry_run: bool,
}

impl AppConfig {
    /// Create a new configuration builder
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Get application name
    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    /// Get log level
    pub fn log_level(&self) -> LogLevel {
        self.log_level
    }

    /// Path to an engine configuration file, if one was given on the
    /// command line.
    pub fn config_path(&self) -> Option<&PathBuf> {
        self.config_path.as_ref()
    }

    /// Worker thread count override, if one was given on the command line.
    pub fn cpu_threads(&self) -> Option<usize> {
        self.cpu_threads
    }

    /// Check if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Check if dry-run mode is enabled (validate configuration and exit,
    /// without starting capture).
    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }
}

/// Builder for AppConfig
#[derive(Debug, Default)]
pub struct AppConfigBuilder {
    app_name: Option<String>,
    log_level: Option<LogLevel>,
    config_path: Option<PathBuf>,
    cpu_threads: Option<usize>,
    verbose: bool,
    dry_run: bool,
}

impl AppConfigBuilder {
    /// Set application name
    pub fn app_name(mut self, name: impl Into<String>) -> Self {
        self.app_name = Some(name.into());
        self
    }

    /// Set log level
    pub fn log_level(mut self, level: LogLevel) -> Self {
        self.log_level = Some(level);
        self
    }

    /// Set the engine configuration file path
    pub fn config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = Some(path.into());
        self
    }

    /// Set worker thread count override
    pub fn cpu_threads(mut self, count: usize) -> Self {
        self.cpu_threads = Some(count);
        self
    }

    /// Enable verbose mode
    pub fn verbose(mut self, enabled: bool) -> Self {
        self.verbose = enabled;
        self
    }

    /// Enable dry-run mode
    pub fn dry_run(mut self, enabled: bool) -> Self {
        self.dry_run = enabled;
        self
    }

    /// Build the configuration
    ///
    /// # Panics
    ///
    /// Panics if app_name was not set
    pub fn build(self) -> AppConfig {
        AppConfig {
            app_name: self.app_name.expect("app_name is required"),
            log_level: self.log_level.unwrap_or_default(),
            config_path: self.config_path,
            cpu_threads: self.cpu_threads,
            verbose: self.verbose,
            dry_run: self.dry_run,
        }
    }

    /// Try to build the configuration
    ///
    /// Returns Err if required fields are missing
    pub fn try_build(self) -> Result<AppConfig, String> {
        Ok(AppConfig {
            app_name: self.app_name.ok_or("app_name is required")?,
            log_level: self.log_level.unwrap_or_default(),
            config_path: self.config_path,
            cpu_threads: self.cpu_threads,
            verbose: self.verbose,
            dry_run: self.dry_run,
        })
    }
}
