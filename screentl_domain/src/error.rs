// screentl
// SPDX-License-Identifier: BSD-3-Clause

//! Workspace-wide error type.
//!
//! A single `TranslatorError` enum is propagated across `screentl_domain` and
//! `screentl` rather than one error type per module, following the
//! single-workspace-error convention this crate is built on. Each variant
//! carries a human-readable message; component-specific detail belongs in
//! the message, not in extra fields, so callers can match on category
//! instead of variant shape.

use thiserror::Error;

/// Errors that can occur anywhere in the screen translation pipeline.
#[derive(Error, Debug, Clone)]
pub enum TranslatorError {
    #[error("capture error: {0}")]
    Capture(String),

    #[error("text recognition error: {0}")]
    Recognition(String),

    #[error("translation error: {0}")]
    Translation(String),

    #[error("overlay rendering error: {0}")]
    Overlay(String),

    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("unknown language code: {0}")]
    UnknownLanguage(String),

    #[error("dictionary I/O error: {0}")]
    DictionaryIo(String),

    #[error("plugin error: {0}")]
    Plugin(String),

    #[error("circuit breaker open for component: {0}")]
    CircuitOpen(String),

    #[error("operation timed out: {0}")]
    Timeout(String),

    #[error("operation cancelled")]
    Cancelled,

    #[error("resource exhausted: {0}")]
    ResourceExhausted(String),

    #[error("internal error: {0}")]
    InternalError(String),
}

impl TranslatorError {
    pub fn capture(msg: impl Into<String>) -> Self {
        Self::Capture(msg.into())
    }

    pub fn recognition(msg: impl Into<String>) -> Self {
        Self::Recognition(msg.into())
    }

    pub fn translation(msg: impl Into<String>) -> Self {
        Self::Translation(msg.into())
    }

    pub fn overlay(msg: impl Into<String>) -> Self {
        Self::Overlay(msg.into())
    }

    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfiguration(msg.into())
    }

    pub fn unknown_language(code: impl Into<String>) -> Self {
        Self::UnknownLanguage(code.into())
    }

    pub fn dictionary_io(msg: impl Into<String>) -> Self {
        Self::DictionaryIo(msg.into())
    }

    pub fn plugin(msg: impl Into<String>) -> Self {
        Self::Plugin(msg.into())
    }

    pub fn circuit_open(component: impl Into<String>) -> Self {
        Self::CircuitOpen(component.into())
    }

    pub fn timeout(msg: impl Into<String>) -> Self {
        Self::Timeout(msg.into())
    }

    pub fn resource_exhausted(msg: impl Into<String>) -> Self {
        Self::ResourceExhausted(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::InternalError(msg.into())
    }

    /// Whether a retry of the same operation might succeed.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::Timeout(_) | Self::ResourceExhausted(_) | Self::CircuitOpen(_) | Self::DictionaryIo(_)
        )
    }

    /// Whether this error should be surfaced to the security/audit path
    /// rather than treated as a routine processing failure.
    pub fn is_security_error(&self) -> bool {
        false
    }

    /// Stable category tag for metrics labels and log fields.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Capture(_) => "capture",
            Self::Recognition(_) => "recognition",
            Self::Translation(_) => "translation",
            Self::Overlay(_) => "overlay",
            Self::InvalidConfiguration(_) => "configuration",
            Self::UnknownLanguage(_) => "configuration",
            Self::DictionaryIo(_) => "dictionary",
            Self::Plugin(_) => "plugin",
            Self::CircuitOpen(_) => "circuit_breaker",
            Self::Timeout(_) => "timeout",
            Self::Cancelled => "cancelled",
            Self::ResourceExhausted(_) => "resource",
            Self::InternalError(_) => "internal",
        }
    }
}

impl From<std::io::Error> for TranslatorError {
    fn from(err: std::io::Error) -> Self {
        Self::DictionaryIo(err.to_string())
    }
}

impl From<serde_json::Error> for TranslatorError {
    fn from(err: serde_json::Error) -> Self {
        Self::DictionaryIo(format!("serialization failure: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_is_recoverable() {
        assert!(TranslatorError::timeout("slow stage").is_recoverable());
    }

    #[test]
    fn translation_error_is_not_recoverable() {
        assert!(!TranslatorError::translation("bad request").is_recoverable());
    }

    #[test]
    fn category_matches_component() {
        assert_eq!(TranslatorError::capture("x").category(), "capture");
        assert_eq!(TranslatorError::unknown_language("xx").category(), "configuration");
    }

    #[test]
    fn io_error_converts_to_dictionary_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing file");
        let err: TranslatorError = io_err.into();
        assert!(matches!(err, TranslatorError::DictionaryIo(_)));
    }
}
