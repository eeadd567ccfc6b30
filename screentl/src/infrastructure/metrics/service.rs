// screentl
// SPDX-License-Identifier: BSD-3-Clause

//! Prometheus-based metrics collection for the translation engine.
//!
//! Tracks frame capture/processing, OCR, translation, cache, dictionary, and
//! resilience counters; per-stage latency histograms; and gauges for queue
//! depth, worker utilization, and active regions. Exposed via
//! [`MetricsService::get_metrics`] as Prometheus text format for a scraper to
//! pull; this crate does not run its own HTTP endpoint.

use prometheus::{Histogram, HistogramOpts, IntCounter, IntCounterVec, IntGauge, IntGaugeVec, Opts, Registry};
use std::sync::Arc;
use tracing::debug;

use screentl_domain::error::TranslatorError;

#[derive(Clone)]
pub struct MetricsService {
    registry: Arc<Registry>,

    frames_captured_total: IntCounter,
    frames_processed_total: IntCounter,
    frames_skipped_total: IntCounter,
    ocr_blocks_recognized_total: IntCounter,
    translations_completed_total: IntCounter,
    cache_hits_total: IntCounter,
    cache_misses_total: IntCounter,
    dictionary_writes_total: IntCounter,
    circuit_breaker_trips_total: IntCounterVec,
    stage_errors_total: IntCounterVec,

    stage_latency_seconds: Histogram,

    queue_depth: IntGaugeVec,
    worker_utilization: IntGauge,
    active_regions: IntGauge,
    health_status: IntGauge,
}

impl MetricsService {
    pub fn new() -> Result<Self, TranslatorError> {
        let registry = Registry::new();

        let frames_captured_total = IntCounter::with_opts(
            Opts::new("frames_captured_total", "Total frames captured from all regions").namespace("screentl"),
        )
        .map_err(|e| TranslatorError::internal(format!("failed to create frames_captured_total: {e}")))?;

        let frames_processed_total = IntCounter::with_opts(
            Opts::new("frames_processed_total", "Total frames that completed the pipeline").namespace("screentl"),
        )
        .map_err(|e| TranslatorError::internal(format!("failed to create frames_processed_total: {e}")))?;

        let frames_skipped_total = IntCounter::with_opts(
            Opts::new("frames_skipped_total", "Total frames skipped by optimizers before OCR").namespace("screentl"),
        )
        .map_err(|e| TranslatorError::internal(format!("failed to create frames_skipped_total: {e}")))?;

        let ocr_blocks_recognized_total = IntCounter::with_opts(
            Opts::new("ocr_blocks_recognized_total", "Total text blocks recognized by OCR").namespace("screentl"),
        )
        .map_err(|e| TranslatorError::internal(format!("failed to create ocr_blocks_recognized_total: {e}")))?;

        let translations_completed_total = IntCounter::with_opts(
            Opts::new("translations_completed_total", "Total translations completed").namespace("screentl"),
        )
        .map_err(|e| TranslatorError::internal(format!("failed to create translations_completed_total: {e}")))?;

        let cache_hits_total = IntCounter::with_opts(
            Opts::new("cache_hits_total", "Total translation cache hits").namespace("screentl"),
        )
        .map_err(|e| TranslatorError::internal(format!("failed to create cache_hits_total: {e}")))?;

        let cache_misses_total = IntCounter::with_opts(
            Opts::new("cache_misses_total", "Total translation cache misses").namespace("screentl"),
        )
        .map_err(|e| TranslatorError::internal(format!("failed to create cache_misses_total: {e}")))?;

        let dictionary_writes_total = IntCounter::with_opts(
            Opts::new("dictionary_writes_total", "Total learned dictionary persistence writes").namespace("screentl"),
        )
        .map_err(|e| TranslatorError::internal(format!("failed to create dictionary_writes_total: {e}")))?;

        let circuit_breaker_trips_total = IntCounterVec::new(
            Opts::new("circuit_breaker_trips_total", "Total times a circuit breaker opened").namespace("screentl"),
            &["component"],
        )
        .map_err(|e| TranslatorError::internal(format!("failed to create circuit_breaker_trips_total: {e}")))?;

        let stage_errors_total = IntCounterVec::new(
            Opts::new("stage_errors_total", "Total pipeline stage errors").namespace("screentl"),
            &["stage", "category"],
        )
        .map_err(|e| TranslatorError::internal(format!("failed to create stage_errors_total: {e}")))?;

        let stage_latency_seconds = Histogram::with_opts(
            HistogramOpts::new("stage_latency_seconds", "Per-stage processing latency")
                .namespace("screentl")
                .buckets(vec![0.001, 0.005, 0.01, 0.033, 0.05, 0.1, 0.25, 0.5, 1.0]),
        )
        .map_err(|e| TranslatorError::internal(format!("failed to create stage_latency_seconds: {e}")))?;

        let queue_depth = IntGaugeVec::new(
            Opts::new("queue_depth", "Current depth of a managed queue").namespace("screentl"),
            &["queue"],
        )
        .map_err(|e| TranslatorError::internal(format!("failed to create queue_depth: {e}")))?;

        let worker_utilization = IntGauge::with_opts(
            Opts::new("worker_utilization_percent", "Percentage of worker pool capacity in use").namespace("screentl"),
        )
        .map_err(|e| TranslatorError::internal(format!("failed to create worker_utilization: {e}")))?;

        let active_regions = IntGauge::with_opts(
            Opts::new("active_regions", "Number of capture regions currently enabled").namespace("screentl"),
        )
        .map_err(|e| TranslatorError::internal(format!("failed to create active_regions: {e}")))?;

        let health_status = IntGauge::with_opts(
            Opts::new("health_status", "Overall health status (0=Healthy,1=Degraded,2=Unhealthy,3=Critical)")
                .namespace("screentl"),
        )
        .map_err(|e| TranslatorError::internal(format!("failed to create health_status: {e}")))?;

        macro_rules! register {
            ($metric:expr) => {
                registry
                    .register(Box::new($metric.clone()))
                    .map_err(|e| TranslatorError::internal(format!("failed to register metric: {e}")))?
            };
        }
        register!(frames_captured_total);
        register!(frames_processed_total);
        register!(frames_skipped_total);
        register!(ocr_blocks_recognized_total);
        register!(translations_completed_total);
        register!(cache_hits_total);
        register!(cache_misses_total);
        register!(dictionary_writes_total);
        register!(circuit_breaker_trips_total);
        register!(stage_errors_total);
        register!(stage_latency_seconds);
        register!(queue_depth);
        register!(worker_utilization);
        register!(active_regions);
        register!(health_status);

        debug!("metrics service initialized");

        Ok(Self {
            registry: Arc::new(registry),
            frames_captured_total,
            frames_processed_total,
            frames_skipped_total,
            ocr_blocks_recognized_total,
            translations_completed_total,
            cache_hits_total,
            cache_misses_total,
            dictionary_writes_total,
            circuit_breaker_trips_total,
            stage_errors_total,
            stage_latency_seconds,
            queue_depth,
            worker_utilization,
            active_regions,
            health_status,
        })
    }

    pub fn record_frame_captured(&self) {
        self.frames_captured_total.inc();
    }

    pub fn record_frame_processed(&self) {
        self.frames_processed_total.inc();
    }

    pub fn record_frame_skipped(&self) {
        self.frames_skipped_total.inc();
    }

    pub fn record_ocr_blocks(&self, count: u64) {
        self.ocr_blocks_recognized_total.inc_by(count);
    }

    pub fn record_translation_completed(&self) {
        self.translations_completed_total.inc();
    }

    pub fn record_cache_hit(&self) {
        self.cache_hits_total.inc();
    }

    pub fn record_cache_miss(&self) {
        self.cache_misses_total.inc();
    }

    pub fn record_dictionary_write(&self) {
        self.dictionary_writes_total.inc();
    }

    pub fn record_circuit_breaker_trip(&self, component: &str) {
        self.circuit_breaker_trips_total.with_label_values(&[component]).inc();
    }

    pub fn record_stage_error(&self, stage: &str, category: &str) {
        self.stage_errors_total.with_label_values(&[stage, category]).inc();
    }

    pub fn record_stage_latency(&self, seconds: f64) {
        self.stage_latency_seconds.observe(seconds);
    }

    pub fn set_queue_depth(&self, queue: &str, depth: i64) {
        self.queue_depth.with_label_values(&[queue]).set(depth);
    }

    pub fn set_worker_utilization(&self, percent: i64) {
        self.worker_utilization.set(percent);
    }

    pub fn set_active_regions(&self, count: i64) {
        self.active_regions.set(count);
    }

    pub fn set_health_status(&self, status: i64) {
        self.health_status.set(status);
    }

    /// Renders all metrics in Prometheus text exposition format for a
    /// scraper to pull.
    pub fn get_metrics(&self) -> Result<String, TranslatorError> {
        let encoder = prometheus::TextEncoder::new();
        let metric_families = self.registry.gather();
        encoder
            .encode_to_string(&metric_families)
            .map_err(|e| TranslatorError::internal(format!("failed to encode metrics: {e}")))
    }

    pub fn registry(&self) -> Arc<Registry> {
        self.registry.clone()
    }
}

impl Default for MetricsService {
    fn default() -> Self {
        Self::new().expect("default metrics service must register cleanly")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creation_registers_all_metrics() {
        let service = MetricsService::new().unwrap();
        let output = service.get_metrics().unwrap();
        assert!(output.contains("screentl_frames_captured_total"));
        assert!(output.contains("screentl_health_status"));
    }

    #[test]
    fn counters_increment_and_appear_in_output() {
        let service = MetricsService::new().unwrap();
        service.record_frame_captured();
        service.record_cache_hit();
        service.record_circuit_breaker_trip("translation_engine");
        let output = service.get_metrics().unwrap();
        assert!(output.contains("screentl_frames_captured_total 1"));
        assert!(output.contains("translation_engine"));
    }

    #[test]
    fn gauges_reflect_latest_set_value() {
        let service = MetricsService::new().unwrap();
        service.set_active_regions(3);
        service.set_health_status(2);
        let output = service.get_metrics().unwrap();
        assert!(output.contains("screentl_active_regions 3"));
        assert!(output.contains("screentl_health_status 2"));
    }
}
