// screentl
// SPDX-License-Identifier: BSD-3-Clause

//! Session state reporting: a thin, HTTP-free facade combining the health
//! monitor and metrics service into one snapshot. Exposing it over the wire
//! (an HTTP endpoint, a socket) is an external collaborator's job — this
//! crate only assembles the snapshot and renders metrics as Prometheus text.

use std::sync::Arc;

use serde::Serialize;

use crate::infrastructure::health::{HealthMonitor, HealthReport, HealthStatus};
use crate::infrastructure::metrics::MetricsService;

#[derive(Debug, Clone, Serialize)]
pub struct SessionStatus {
    pub overall: &'static str,
    pub checks: Vec<SessionCheckStatus>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionCheckStatus {
    pub name: String,
    pub status: &'static str,
    pub consecutive_failures: u32,
    pub last_error: Option<String>,
}

/// Assembles a point-in-time view of session health and exposes the
/// Prometheus-format metrics scrape body, without starting any server.
pub struct SessionStatusReporter {
    health: Arc<HealthMonitor>,
    metrics: Arc<MetricsService>,
}

impl SessionStatusReporter {
    pub fn new(health: Arc<HealthMonitor>, metrics: Arc<MetricsService>) -> Self {
        Self { health, metrics }
    }

    pub fn status(&self) -> SessionStatus {
        let checks: Vec<SessionCheckStatus> = self.health.all_reports().iter().map(Self::to_check_status).collect();
        let overall = worst_status(&checks);
        SessionStatus { overall, checks }
    }

    pub fn metrics_text(&self) -> Result<String, screentl_domain::error::TranslatorError> {
        self.metrics.get_metrics()
    }

    fn to_check_status(report: &HealthReport) -> SessionCheckStatus {
        SessionCheckStatus {
            name: report.name.clone(),
            status: status_label(report.status),
            consecutive_failures: report.consecutive_failures,
            last_error: report.last_error.clone(),
        }
    }
}

fn status_label(status: HealthStatus) -> &'static str {
    match status {
        HealthStatus::Healthy => "healthy",
        HealthStatus::Degraded => "degraded",
        HealthStatus::Unhealthy => "unhealthy",
        HealthStatus::Critical => "critical",
    }
}

fn worst_status(checks: &[SessionCheckStatus]) -> &'static str {
    if checks.iter().any(|c| c.status == "critical") {
        "critical"
    } else if checks.iter().any(|c| c.status == "unhealthy") {
        "unhealthy"
    } else if checks.iter().any(|c| c.status == "degraded") {
        "degraded"
    } else {
        "healthy"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::health::HealthCheck;
    use screentl_domain::error::TranslatorError;
    use std::time::Duration;

    #[tokio::test]
    async fn overall_status_reflects_worst_check() {
        let health = Arc::new(HealthMonitor::new());
        health.register(HealthCheck::new("ocr", Duration::from_secs(5), Duration::from_secs(1), 1));
        let _ = health
            .run_check("ocr", async { Err(TranslatorError::timeout("probe timed out")) })
            .await;

        let metrics = Arc::new(MetricsService::default());
        let reporter = SessionStatusReporter::new(health, metrics);

        let status = reporter.status();
        assert_eq!(status.checks.len(), 1);
        assert_ne!(status.overall, "healthy");
    }

    #[test]
    fn metrics_text_renders_prometheus_format() {
        let health = Arc::new(HealthMonitor::new());
        let metrics = Arc::new(MetricsService::default());
        metrics.record_frame_captured();
        let reporter = SessionStatusReporter::new(health, metrics);
        let text = reporter.metrics_text().unwrap();
        assert!(text.contains("screentl_frames_captured_total"));
    }
}
