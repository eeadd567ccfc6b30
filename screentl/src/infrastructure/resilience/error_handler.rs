// screentl
// SPDX-License-Identifier: BSD-3-Clause

//! Component error handler: bounded error history, per-component circuit
//! breakers, and a pluggable recovery-strategy registry keyed by error
//! category.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use screentl_domain::error::TranslatorError;
use tracing::error;

use super::circuit_breaker::{CircuitBreaker, CircuitBreakerConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

#[derive(Debug, Clone)]
pub struct ErrorRecord {
    pub timestamp: DateTime<Utc>,
    pub component: String,
    pub category: &'static str,
    pub message: String,
    pub severity: ErrorSeverity,
}

const ERROR_HISTORY_CAPACITY: usize = 1000;

/// Recovery strategy run after an error of a given category is handled; may
/// itself fail, in which case the failure is just logged, not retried.
pub type RecoveryStrategy = Arc<dyn Fn() -> Result<(), TranslatorError> + Send + Sync>;

pub struct TranslatorErrorHandler {
    circuit_breakers: Mutex<HashMap<String, Arc<CircuitBreaker>>>,
    error_history: Mutex<VecDeque<ErrorRecord>>,
    error_counts: Mutex<HashMap<String, u64>>,
    recovery_strategies: Mutex<HashMap<&'static str, RecoveryStrategy>>,
}

impl Default for TranslatorErrorHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl TranslatorErrorHandler {
    pub fn new() -> Self {
        Self {
            circuit_breakers: Mutex::new(HashMap::new()),
            error_history: Mutex::new(VecDeque::new()),
            error_counts: Mutex::new(HashMap::new()),
            recovery_strategies: Mutex::new(HashMap::new()),
        }
    }

    pub fn register_circuit_breaker(&self, component: impl Into<String>, config: CircuitBreakerConfig) -> Arc<CircuitBreaker> {
        let component = component.into();
        let breaker = Arc::new(CircuitBreaker::new(component.clone(), config));
        self.circuit_breakers.lock().insert(component, breaker.clone());
        breaker
    }

    pub fn circuit_breaker(&self, component: &str) -> Option<Arc<CircuitBreaker>> {
        self.circuit_breakers.lock().get(component).cloned()
    }

    /// Returns the existing breaker for `component`, or registers one with
    /// `default_config` if none exists yet. Lets a caller wrap an external
    /// call in a breaker without clobbering a config a different caller
    /// already registered for the same component.
    pub fn circuit_breaker_or_register(&self, component: &str, default_config: CircuitBreakerConfig) -> Arc<CircuitBreaker> {
        if let Some(existing) = self.circuit_breaker(component) {
            return existing;
        }
        self.register_circuit_breaker(component, default_config)
    }

    pub fn register_recovery_strategy(&self, category: &'static str, strategy: RecoveryStrategy) {
        self.recovery_strategies.lock().insert(category, strategy);
    }

    /// Records `error` against `component` with the given severity, runs any
    /// registered recovery strategy for its category, and returns whether
    /// recovery was attempted and succeeded.
    pub fn handle_error(&self, component: &str, err: &TranslatorError, severity: ErrorSeverity) -> bool {
        let category = err.category();
        let record = ErrorRecord {
            timestamp: Utc::now(),
            component: component.to_string(),
            category,
            message: err.to_string(),
            severity,
        };

        if severity >= ErrorSeverity::High {
            error!(component, category, message = %err, "pipeline component error");
        }

        {
            let mut history = self.error_history.lock();
            if history.len() >= ERROR_HISTORY_CAPACITY {
                history.pop_front();
            }
            history.push_back(record);
        }
        *self.error_counts.lock().entry(component.to_string()).or_insert(0) += 1;

        let strategy = self.recovery_strategies.lock().get(category).cloned();
        match strategy {
            Some(strategy) => strategy().is_ok(),
            None => false,
        }
    }

    pub fn error_count(&self, component: &str) -> u64 {
        *self.error_counts.lock().get(component).unwrap_or(&0)
    }

    pub fn recent_errors(&self, limit: usize) -> Vec<ErrorRecord> {
        self.error_history.lock().iter().rev().take(limit).cloned().collect()
    }
}
