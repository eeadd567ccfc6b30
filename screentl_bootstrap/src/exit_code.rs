// screentl
// SPDX-License-Identifier: BSD-3-Clause

//! Standardized Unix exit codes following BSD `sysexits.h` conventions.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use screentl_bootstrap::exit_code::ExitCode;
//!
//! fn run_application() -> Result<(), Box<dyn std::error::Error>> {
//!     Ok(())
//! }
//!
//! fn main() {
//!     let result = run_application();
//!     let exit_code = match result {
//!         Ok(_) => ExitCode::Success,
//!         Err(e) => ExitCode::from_error(e.as_ref()),
//!     };
//!     std::process::exit(exit_code.as_i32());
//! }
//! ```

use std::fmt;

use screentl_domain::error::TranslatorError;

/// Exit codes following Unix conventions (BSD sysexits.h)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(i32)]
pub enum ExitCode {
    #[default]
    Success = 0,
    Error = 1,
    UsageError = 64,
    DataError = 65,
    NoInput = 66,
    Unavailable = 69,
    Software = 70,
    OsError = 71,
    CantCreate = 73,
    IoError = 74,
    TempFail = 75,
    Protocol = 76,
    NoPerm = 77,
    Config = 78,
    Interrupted = 130,
    Terminated = 143,
}

impl ExitCode {
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    pub fn from_error(error: &dyn std::error::Error) -> Self {
        let error_string = error.to_string().to_lowercase();
        if error_string.contains("permission") || error_string.contains("access denied") {
            ExitCode::NoPerm
        } else if error_string.contains("not found") || error_string.contains("no such") {
            ExitCode::NoInput
        } else if error_string.contains("invalid") || error_string.contains("argument") {
            ExitCode::UsageError
        } else if error_string.contains("parse") || error_string.contains("format") {
            ExitCode::DataError
        } else if error_string.contains("io") || error_string.contains("read") || error_string.contains("write") {
            ExitCode::IoError
        } else if error_string.contains("config") {
            ExitCode::Config
        } else if error_string.contains("unavailable") || error_string.contains("not available") {
            ExitCode::Unavailable
        } else {
            ExitCode::Error
        }
    }

    /// Maps a `TranslatorError` onto an exit code by its taxonomy category,
    /// rather than sniffing its message text like [`Self::from_error`] does
    /// for opaque error sources.
    pub fn from_translator_error(error: &TranslatorError) -> Self {
        match error.category() {
            "configuration" => ExitCode::Config,
            "dictionary" => ExitCode::IoError,
            "timeout" | "resource" => ExitCode::TempFail,
            "circuit_breaker" => ExitCode::Unavailable,
            "cancelled" => ExitCode::Terminated,
            "capture" | "recognition" | "translation" | "overlay" | "plugin" => ExitCode::Software,
            _ => ExitCode::Error,
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            ExitCode::Success => "Success",
            ExitCode::Error => "General error",
            ExitCode::UsageError => "Command line usage error",
            ExitCode::DataError => "Data format error",
            ExitCode::NoInput => "Cannot open input",
            ExitCode::Unavailable => "Service unavailable",
            ExitCode::Software => "Internal software error",
            ExitCode::OsError => "System error",
            ExitCode::CantCreate => "Cannot create output file",
            ExitCode::IoError => "I/O error",
            ExitCode::TempFail => "Temporary failure, retry",
            ExitCode::Protocol => "Remote error in protocol",
            ExitCode::NoPerm => "Permission denied",
            ExitCode::Config => "Configuration error",
            ExitCode::Interrupted => "Interrupted by signal (SIGINT)",
            ExitCode::Terminated => "Terminated by signal (SIGTERM)",
        }
    }

    pub fn is_success(self) -> bool {
        matches!(self, ExitCode::Success)
    }

    pub fn is_error(self) -> bool {
        !self.is_success()
    }

    pub fn is_signal(self) -> bool {
        matches!(self, ExitCode::Interrupted | ExitCode::Terminated)
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.description(), self.as_i32())
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code.as_i32()
    }
}

/// Maps a `Result<T, TranslatorError>` to a process exit code, logging the
/// error on failure.
pub fn result_to_exit_code<T>(result: Result<T, TranslatorError>) -> ExitCode {
    match result {
        Ok(_) => ExitCode::Success,
        Err(err) => {
            tracing::error!(error = %err, category = err.category(), "run failed");
            ExitCode::from_translator_error(&err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code_values() {
        assert_eq!(ExitCode::Success.as_i32(), 0);
        assert_eq!(ExitCode::Error.as_i32(), 1);
        assert_eq!(ExitCode::UsageError.as_i32(), 64);
        assert_eq!(ExitCode::Config.as_i32(), 78);
        assert_eq!(ExitCode::Interrupted.as_i32(), 130);
        assert_eq!(ExitCode::Terminated.as_i32(), 143);
    }

    #[test]
    fn test_is_success() {
        assert!(ExitCode::Success.is_success());
        assert!(!ExitCode::Error.is_success());
    }

    #[test]
    fn test_is_signal() {
        assert!(ExitCode::Interrupted.is_signal());
        assert!(!ExitCode::Success.is_signal());
    }

    #[test]
    fn test_from_translator_error_configuration() {
        let err = TranslatorError::invalid_config("bad fps");
        assert_eq!(ExitCode::from_translator_error(&err), ExitCode::Config);
    }

    #[test]
    fn test_from_translator_error_timeout_is_retryable() {
        let err = TranslatorError::timeout("ocr stalled");
        assert_eq!(ExitCode::from_translator_error(&err), ExitCode::TempFail);
    }

    #[test]
    fn test_result_to_exit_code() {
        let ok: Result<(), TranslatorError> = Ok(());
        assert_eq!(result_to_exit_code(ok), ExitCode::Success);

        let err: Result<(), TranslatorError> = Err(TranslatorError::circuit_open("ocr"));
        assert_eq!(result_to_exit_code(err), ExitCode::Unavailable);
    }
}
