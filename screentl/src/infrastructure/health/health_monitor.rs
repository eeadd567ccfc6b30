// screentl
// SPDX-License-Identifier: BSD-3-Clause

//! Health checks with graduated severity and per-check recovery cooldown.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;
use screentl_domain::error::TranslatorError;
use tokio::time::Instant;
use tracing::{error, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Unhealthy,
    Critical,
}

/// A single named health check: how often to run it, how long to let it run
/// before treating it as failed, and the thresholds at which its status
/// escalates.
pub struct HealthCheck {
    pub name: String,
    pub interval: Duration,
    pub timeout: Duration,
    pub failure_threshold: u32,
    pub recovery_threshold: u32,
    pub recovery_action: Option<Arc<dyn Fn() -> Result<(), TranslatorError> + Send + Sync>>,
}

impl HealthCheck {
    pub fn new(name: impl Into<String>, interval: Duration, timeout: Duration, failure_threshold: u32) -> Self {
        Self {
            name: name.into(),
            interval,
            timeout,
            failure_threshold,
            recovery_threshold: 1,
            recovery_action: None,
        }
    }

    pub fn with_recovery_action(mut self, action: Arc<dyn Fn() -> Result<(), TranslatorError> + Send + Sync>) -> Self {
        self.recovery_action = Some(action);
        self
    }

    /// Escalates a raw consecutive-failure count into a status, using the
    /// configured failure threshold (Unhealthy) and double that (Critical).
    fn status_for(&self, consecutive_failures: u32) -> HealthStatus {
        if consecutive_failures == 0 {
            HealthStatus::Healthy
        } else if consecutive_failures < self.failure_threshold {
            HealthStatus::Degraded
        } else if consecutive_failures < self.failure_threshold * 2 {
            HealthStatus::Unhealthy
        } else {
            HealthStatus::Critical
        }
    }
}

#[derive(Debug, Clone)]
pub struct HealthReport {
    pub name: String,
    pub status: HealthStatus,
    pub consecutive_failures: u32,
    pub last_error: Option<String>,
}

struct CheckState {
    consecutive_failures: u32,
    last_error: Option<String>,
    last_recovery_at: Option<Instant>,
}

const RECOVERY_COOLDOWN: Duration = Duration::from_secs(60);

/// Runs a set of health checks and tracks their graduated status. Each
/// check's probe future is timed out independently so one stuck probe
/// cannot starve the others.
pub struct HealthMonitor {
    checks: RwLock<HashMap<String, Arc<HealthCheck>>>,
    state: RwLock<HashMap<String, CheckState>>,
}

impl Default for HealthMonitor {
    fn default() -> Self {
        Self::new()
    }
}

impl HealthMonitor {
    pub fn new() -> Self {
        Self {
            checks: RwLock::new(HashMap::new()),
            state: RwLock::new(HashMap::new()),
        }
    }

    pub fn register(&self, check: HealthCheck) {
        let name = check.name.clone();
        self.checks.write().insert(name.clone(), Arc::new(check));
        self.state.write().insert(
            name,
            CheckState {
                consecutive_failures: 0,
                last_error: None,
                last_recovery_at: None,
            },
        );
    }

    /// Runs `probe` for the named check under its configured timeout,
    /// updates its failure streak, logs on escalation, and attempts
    /// recovery (subject to cooldown) once Unhealthy or worse.
    pub async fn run_check<F>(&self, name: &str, probe: F) -> Result<HealthReport, TranslatorError>
    where
        F: std::future::Future<Output = Result<(), TranslatorError>>,
    {
        let check = self
            .checks
            .read()
            .get(name)
            .cloned()
            .ok_or_else(|| TranslatorError::invalid_config(format!("unknown health check: {name}")))?;

        let outcome = tokio::time::timeout(check.timeout, probe)
            .await
            .unwrap_or_else(|_| Err(TranslatorError::timeout(format!("health check '{name}' timed out"))));

        let mut states = self.state.write();
        let state = states
            .get_mut(name)
            .ok_or_else(|| TranslatorError::invalid_config(format!("unknown health check: {name}")))?;

        match &outcome {
            Ok(()) => {
                state.consecutive_failures = 0;
                state.last_error = None;
            }
            Err(err) => {
                state.consecutive_failures += 1;
                state.last_error = Some(err.to_string());
            }
        }

        let status = check.status_for(state.consecutive_failures);
        match status {
            HealthStatus::Degraded => warn!(check = name, "health check degraded"),
            HealthStatus::Unhealthy => warn!(check = name, "health check unhealthy"),
            HealthStatus::Critical => error!(check = name, "health check critical"),
            HealthStatus::Healthy => {}
        }

        if matches!(status, HealthStatus::Unhealthy | HealthStatus::Critical) {
            let can_recover = state
                .last_recovery_at
                .map(|at| at.elapsed() >= RECOVERY_COOLDOWN)
                .unwrap_or(true);
            if can_recover {
                if let Some(action) = &check.recovery_action {
                    state.last_recovery_at = Some(Instant::now());
                    if let Err(err) = action() {
                        warn!(check = name, error = %err, "recovery action failed");
                    }
                }
            }
        }

        Ok(HealthReport {
            name: name.to_string(),
            status,
            consecutive_failures: state.consecutive_failures,
            last_error: state.last_error.clone(),
        })
    }

    pub fn report(&self, name: &str) -> Option<HealthReport> {
        let checks = self.checks.read();
        let states = self.state.read();
        let check = checks.get(name)?;
        let state = states.get(name)?;
        Some(HealthReport {
            name: name.to_string(),
            status: check.status_for(state.consecutive_failures),
            consecutive_failures: state.consecutive_failures,
            last_error: state.last_error.clone(),
        })
    }

    pub fn all_reports(&self) -> Vec<HealthReport> {
        self.checks.read().keys().filter_map(|name| self.report(name)).collect()
    }
}
