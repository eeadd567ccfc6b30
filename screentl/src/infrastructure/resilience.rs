// screentl
// SPDX-License-Identifier: BSD-3-Clause

//! Failure isolation: per-component circuit breakers and the error handler
//! that wraps them with history tracking and recovery strategies.

pub mod circuit_breaker;
pub mod error_handler;

pub use circuit_breaker::{CircuitBreaker, CircuitBreakerConfig, CircuitState};
pub use error_handler::{ErrorRecord, ErrorSeverity, RecoveryStrategy, TranslatorErrorHandler};
