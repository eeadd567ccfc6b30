// screentl
// SPDX-License-Identifier: BSD-3-Clause

//! Per-component circuit breaker: `Closed -> Open -> HalfOpen -> Closed|Open`.

use std::sync::atomic::{AtomicU32, Ordering};
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use screentl_domain::error::TranslatorError;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CircuitState {
    Closed,
    Open,
    HalfOpen,
}

#[derive(Debug, Clone)]
pub struct CircuitBreakerConfig {
    pub failure_threshold: u32,
    pub timeout: Duration,
    pub success_threshold: u32,
}

impl Default for CircuitBreakerConfig {
    fn default() -> Self {
        Self {
            failure_threshold: 5,
            timeout: Duration::from_secs(60),
            success_threshold: 2,
        }
    }
}

/// A thread-safe circuit breaker guarding calls into one external
/// component (capture backend, OCR engine, translation engine, overlay
/// renderer).
pub struct CircuitBreaker {
    name: String,
    config: CircuitBreakerConfig,
    state: Mutex<CircuitState>,
    failure_count: AtomicU32,
    success_count: AtomicU32,
    opened_at: Mutex<Option<Instant>>,
}

impl CircuitBreaker {
    pub fn new(name: impl Into<String>, config: CircuitBreakerConfig) -> Self {
        Self {
            name: name.into(),
            config,
            state: Mutex::new(CircuitState::Closed),
            failure_count: AtomicU32::new(0),
            success_count: AtomicU32::new(0),
            opened_at: Mutex::new(None),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn state(&self) -> CircuitState {
        let mut state = self.state.lock();
        if *state == CircuitState::Open && self.should_attempt_reset() {
            *state = CircuitState::HalfOpen;
        }
        *state
    }

    fn should_attempt_reset(&self) -> bool {
        self.opened_at
            .lock()
            .map(|opened_at| opened_at.elapsed() >= self.config.timeout)
            .unwrap_or(true)
    }

    /// Runs `f` through the breaker: rejects immediately if open and the
    /// reset timeout hasn't elapsed, otherwise runs `f` and records the
    /// outcome.
    pub fn call<T>(&self, f: impl FnOnce() -> Result<T, TranslatorError>) -> Result<T, TranslatorError> {
        if self.state() == CircuitState::Open {
            return Err(TranslatorError::circuit_open(self.name.clone()));
        }
        match f() {
            Ok(value) => {
                self.on_success();
                Ok(value)
            }
            Err(err) => {
                self.on_failure();
                Err(err)
            }
        }
    }

    /// Async counterpart to [`call`](Self::call), for the external calls
    /// (OCR, translation, overlay rendering) that dominate this workspace.
    pub async fn call_async<T, F>(&self, f: F) -> Result<T, TranslatorError>
    where
        F: std::future::Future<Output = Result<T, TranslatorError>>,
    {
        if self.state() == CircuitState::Open {
            return Err(TranslatorError::circuit_open(self.name.clone()));
        }
        match f.await {
            Ok(value) => {
                self.on_success();
                Ok(value)
            }
            Err(err) => {
                self.on_failure();
                Err(err)
            }
        }
    }

    pub fn on_success(&self) {
        let mut state = self.state.lock();
        match *state {
            CircuitState::HalfOpen => {
                let successes = self.success_count.fetch_add(1, Ordering::SeqCst) + 1;
                if successes >= self.config.success_threshold {
                    *state = CircuitState::Closed;
                    self.failure_count.store(0, Ordering::SeqCst);
                    self.success_count.store(0, Ordering::SeqCst);
                }
            }
            CircuitState::Closed => {
                self.failure_count.store(0, Ordering::SeqCst);
            }
            CircuitState::Open => {}
        }
    }

    pub fn on_failure(&self) {
        let mut state = self.state.lock();
        match *state {
            CircuitState::HalfOpen => {
                self.trip(&mut state);
            }
            CircuitState::Closed => {
                let failures = self.failure_count.fetch_add(1, Ordering::SeqCst) + 1;
                if failures >= self.config.failure_threshold {
                    self.trip(&mut state);
                }
            }
            CircuitState::Open => {}
        }
    }

    fn trip(&self, state: &mut CircuitState) {
        *state = CircuitState::Open;
        *self.opened_at.lock() = Some(Instant::now());
        self.success_count.store(0, Ordering::SeqCst);
        warn!(component = %self.name, "circuit breaker tripped open");
    }

    pub fn reset(&self) {
        *self.state.lock() = CircuitState::Closed;
        self.failure_count.store(0, Ordering::SeqCst);
        self.success_count.store(0, Ordering::SeqCst);
        *self.opened_at.lock() = None;
    }
}
