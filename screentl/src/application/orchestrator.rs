// screentl
// SPDX-License-Identifier: BSD-3-Clause

//! Drives one capture region end to end: pop a frame, let the optimizer
//! chain skip what it can, recognize and translate what's left, persist
//! learned translations, and keep the overlay tracker current.
//!
//! This is the use-case layer's single orchestrator rather than one use case
//! per CLI verb, because a screen-translation session is one long-running
//! workflow, not a sequence of independent file operations.

use std::sync::Arc;
use std::time::Duration;

use screentl_domain::entities::{Frame as DomainFrame, TrackedOverlay};
use screentl_domain::error::TranslatorError;
use screentl_domain::repositories::DictionaryRepository;
use screentl_domain::services::{CaptureBackend, OcrEngine, OverlayRenderer};
use screentl_domain::value_objects::{Confidence, LanguageTag};
use tracing::{debug, error, warn};

use crate::infrastructure::capture::RegionCoordinator;
use crate::infrastructure::metrics::MetricsService;
use crate::infrastructure::optimizers::{OptimizerContext, OptimizerHost};
use crate::infrastructure::overlay::{OverlayTracker, PositioningAdapter};
use crate::infrastructure::resilience::{CircuitBreaker, CircuitBreakerConfig, ErrorSeverity, TranslatorErrorHandler};
use crate::infrastructure::runtime::CancellationToken;
use crate::infrastructure::translation::QualityFilter;
use crate::infrastructure::validation::TextValidator;

/// Component name the orchestrator registers its OCR circuit breaker under.
const OCR_COMPONENT: &str = "ocr";

/// Fixed per-session configuration the orchestrator needs beyond what
/// lives in [`TranslatorConfig`](crate::infrastructure::config::TranslatorConfig).
pub struct OrchestratorLanguages {
    pub source: LanguageTag,
    pub target: LanguageTag,
}

pub struct TranslationOrchestrator<B: CaptureBackend + 'static> {
    coordinator: Arc<RegionCoordinator<B>>,
    ocr_engine: Arc<dyn OcrEngine>,
    overlay_renderer: Arc<dyn OverlayRenderer>,
    dictionary_repository: Arc<dyn DictionaryRepository>,
    optimizer_host: Arc<OptimizerHost>,
    overlay_tracker: Arc<OverlayTracker>,
    text_validator: Arc<TextValidator>,
    quality_filter: Arc<QualityFilter>,
    error_handler: Arc<TranslatorErrorHandler>,
    metrics: Arc<MetricsService>,
    languages: OrchestratorLanguages,
    ocr_breaker: Arc<CircuitBreaker>,
    /// Recorded against every dictionary entry this orchestrator persists,
    /// identifying which translation engine produced it.
    engine_tag: String,
}

impl<B: CaptureBackend + 'static> TranslationOrchestrator<B> {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        coordinator: Arc<RegionCoordinator<B>>,
        ocr_engine: Arc<dyn OcrEngine>,
        overlay_renderer: Arc<dyn OverlayRenderer>,
        dictionary_repository: Arc<dyn DictionaryRepository>,
        optimizer_host: Arc<OptimizerHost>,
        overlay_tracker: Arc<OverlayTracker>,
        text_validator: Arc<TextValidator>,
        quality_filter: Arc<QualityFilter>,
        error_handler: Arc<TranslatorErrorHandler>,
        metrics: Arc<MetricsService>,
        languages: OrchestratorLanguages,
        engine_tag: impl Into<String>,
    ) -> Self {
        let ocr_breaker = error_handler.circuit_breaker_or_register(OCR_COMPONENT, CircuitBreakerConfig::default());
        Self {
            coordinator,
            ocr_engine,
            overlay_renderer,
            dictionary_repository,
            optimizer_host,
            overlay_tracker,
            text_validator,
            quality_filter,
            error_handler,
            metrics,
            languages,
            ocr_breaker,
            engine_tag: engine_tag.into(),
        }
    }

    /// Runs the pop-process-render loop for one region until `cancel` fires.
    /// A stage error is logged and counted, never propagated — one bad
    /// frame must not stop the session.
    pub async fn run_region(&self, region_id: &str, cancel: CancellationToken) {
        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    debug!(region_id, "orchestrator loop stopping on cancellation");
                    return;
                }
                _ = tokio::time::sleep(Duration::from_millis(10)) => {}
            }

            let Some(queue) = self.coordinator.queue(region_id).await else {
                warn!(region_id, "region no longer registered, stopping orchestrator loop");
                return;
            };

            let Some(frame) = queue.try_pop() else {
                continue;
            };

            self.metrics.record_frame_captured();
            if let Err(err) = self.process_frame(region_id, frame.data).await {
                self.metrics.record_stage_error(region_id, err.category());
                self.error_handler.handle_error(region_id, &err, ErrorSeverity::Medium);
                error!(region_id, error = %err, "frame processing failed");
            }
        }
    }

    /// Runs one already-popped frame through the optimizer chain, OCR,
    /// validation, translation, overlay tracking, and dictionary
    /// persistence. Public so a caller driving frames directly (tests, or a
    /// future batch/offline mode) doesn't need the capture loop in
    /// `run_region`.
    pub async fn process_frame(&self, region_id: &str, frame: DomainFrame) -> Result<(), TranslatorError> {
        let mut ctx = OptimizerContext { frame: Some(frame.clone()), ..Default::default() };

        self.optimizer_host.process_all(&mut ctx).await?;
        if ctx.skip_remaining {
            self.metrics.record_frame_skipped();
            return Ok(());
        }

        let blocks = self.ocr_breaker.call_async(self.ocr_engine.recognize(&frame)).await?;
        self.metrics.record_ocr_blocks(blocks.len() as u64);

        let mut validated = Vec::with_capacity(blocks.len());
        for block in blocks {
            match self.text_validator.validate(&block) {
                Ok(_) => validated.push(block),
                Err(err) => debug!(region_id, error = %err, "dropping invalid text block"),
            }
        }
        ctx.text_blocks = validated;

        self.optimizer_host.process_all(&mut ctx).await?;
        self.optimizer_host.post_process_all(&mut ctx).await?;

        let region_bounds = self.coordinator.region_bounds(region_id).await;

        let mut seen_ids = Vec::with_capacity(ctx.translations.len());
        for translation in &ctx.translations {
            if let Err(reason) = self.quality_filter.should_save(&translation.source_text, &translation.translated_text, translation.confidence.value()) {
                debug!(region_id, reason, "translation rejected by quality filter");
                continue;
            }

            self.metrics.record_translation_completed();

            let screen_translation = match region_bounds {
                Some(ref region) => PositioningAdapter::to_screen(translation, region),
                None => translation.clone(),
            };

            let overlay_id = format!("{region_id}:{}", translation.source_text);
            self.overlay_tracker.track(
                overlay_id.clone(),
                screen_translation.translated_text.clone(),
                screen_translation.position,
                region_id,
                screen_translation.confidence.value(),
            );
            seen_ids.push(overlay_id.clone());

            let overlay = TrackedOverlay::new(
                overlay_id,
                screen_translation.translated_text,
                screen_translation.position,
                region_id,
                screen_translation.confidence.value(),
            );
            self.overlay_renderer.show_or_update(&overlay).await?;
        }

        for overlay_id in &seen_ids {
            self.overlay_tracker.mark_seen(overlay_id);
        }
        for disappeared_id in self.overlay_tracker.disappeared() {
            self.overlay_tracker.remove(&disappeared_id);
            self.overlay_renderer.remove(&disappeared_id).await?;
        }
        if let Err(err) = self.coordinator.set_masked_rectangles(self.overlay_tracker.active_positions()).await {
            warn!(region_id, error = %err, "failed to publish masked overlay rectangles to capture backend");
        }

        self.persist_dictionary(&ctx).await;
        self.metrics.record_frame_processed();
        Ok(())
    }

    async fn persist_dictionary(&self, ctx: &OptimizerContext) {
        if ctx.translations.is_empty() {
            return;
        }
        let mut entries = match self.dictionary_repository.load(&self.languages.source, &self.languages.target).await {
            Ok(entries) => entries,
            Err(err) => {
                warn!(error = %err, "failed to load learned dictionary before merge");
                Vec::new()
            }
        };
        for translation in &ctx.translations {
            let observed_confidence = Confidence::new(translation.confidence.value()).unwrap_or(Confidence::ZERO);
            if let Some(existing) = entries.iter_mut().find(|e| e.source_text == translation.source_text) {
                existing.record_hit(observed_confidence);
            } else {
                entries.push(screentl_domain::entities::DictionaryEntry::new(
                    translation.source_text.clone(),
                    translation.translated_text.clone(),
                    self.languages.source.clone(),
                    self.languages.target.clone(),
                    observed_confidence,
                    self.engine_tag.clone(),
                ));
            }
        }
        if let Err(err) = self.dictionary_repository.save(&self.languages.source, &self.languages.target, &entries).await {
            warn!(error = %err, "failed to persist learned dictionary");
        } else {
            self.metrics.record_dictionary_write();
        }
    }
}
