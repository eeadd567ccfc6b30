// screentl
// SPDX-License-Identifier: BSD-3-Clause

//! Stub adapters shared across the end-to-end scenario tests: a scripted
//! capture backend, OCR engine, translation engine, and a recording overlay
//! renderer, each implementing the real port traits instead of mocking the
//! orchestrator itself.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use screentl::application::{OrchestratorLanguages, TranslationOrchestrator};
use screentl::infrastructure::capture::RegionCoordinator;
use screentl::infrastructure::metrics::MetricsService;
use screentl::infrastructure::optimizers::{FrameSkipOptimizer, OptimizerHost, ParallelTranslationOptimizer, TranslationCacheOptimizer};
use screentl::infrastructure::overlay::OverlayTracker;
use screentl::infrastructure::resilience::{CircuitBreakerConfig, TranslatorErrorHandler};
use screentl::infrastructure::translation::{DictionaryFileRepository, QualityFilter, QualityFilterConfig, TranslationCache};
use screentl::infrastructure::validation::TextValidator;
use screentl_domain::entities::{Frame, TextBlock, TrackedOverlay};
use screentl_domain::error::TranslatorError;
use screentl_domain::services::{CaptureBackend, OcrEngine, OverlayRenderer, TranslationEngine, TranslationRequest, TranslationResponse};
use screentl_domain::value_objects::{CaptureRegion, Confidence, LanguageTag, Rectangle};

/// Captures by filling the buffer with a scripted byte per call; once the
/// script is exhausted, repeats the last byte. Masking mirrors
/// `ScreenCaptureBackend::apply_mask` so invariant tests about overlay
/// feedback loops exercise the same logic a real capture backend would run.
pub struct ScriptedBackend {
    fills: Mutex<VecDeque<u8>>,
    last_fill: Mutex<u8>,
    sequence: AtomicU64,
    masked: Mutex<Vec<Rectangle>>,
}

impl ScriptedBackend {
    pub fn new(fills: impl IntoIterator<Item = u8>) -> Self {
        Self {
            fills: Mutex::new(fills.into_iter().collect()),
            last_fill: Mutex::new(0),
            sequence: AtomicU64::new(0),
            masked: Mutex::new(Vec::new()),
        }
    }

    pub fn masked_rectangles(&self) -> Vec<Rectangle> {
        self.masked.lock().unwrap().clone()
    }
}

fn intersect(a: &Rectangle, b: &Rectangle) -> Option<Rectangle> {
    let x1 = a.x.max(b.x);
    let y1 = a.y.max(b.y);
    let x2 = (a.x + a.width as i32).min(b.x + b.width as i32);
    let y2 = (a.y + a.height as i32).min(b.y + b.height as i32);
    if x2 <= x1 || y2 <= y1 {
        return None;
    }
    Some(Rectangle { x: x1, y: y1, width: (x2 - x1) as u32, height: (y2 - y1) as u32 })
}

#[async_trait]
impl CaptureBackend for ScriptedBackend {
    async fn capture(&self, region: &CaptureRegion) -> Result<Frame, TranslatorError> {
        let fill = {
            let mut fills = self.fills.lock().unwrap();
            let fill = fills.pop_front().unwrap_or(*self.last_fill.lock().unwrap());
            *self.last_fill.lock().unwrap() = fill;
            fill
        };
        let bounds = region.bounds;
        let mut pixels = vec![fill; (bounds.width * bounds.height * 4) as usize];

        let masked = self.masked.lock().unwrap().clone();
        for rect in &masked {
            if let Some(clip) = intersect(&bounds, rect) {
                for row in clip.y..(clip.y + clip.height as i32) {
                    let local_row = (row - bounds.y) as usize;
                    if local_row >= bounds.height as usize {
                        continue;
                    }
                    let row_start = local_row * bounds.width as usize * 4;
                    let clip_start = row_start + ((clip.x - bounds.x).max(0) as usize) * 4;
                    let clip_end = clip_start + clip.width as usize * 4;
                    if clip_end <= pixels.len() {
                        pixels[clip_start..clip_end].fill(0);
                    }
                }
            }
        }

        let sequence = self.sequence.fetch_add(1, Ordering::SeqCst);
        Frame::new(region.id.clone(), sequence, bounds.width, bounds.height, pixels)
    }

    async fn set_masked_rectangles(&self, rectangles: Vec<Rectangle>) -> Result<(), TranslatorError> {
        *self.masked.lock().unwrap() = rectangles;
        Ok(())
    }
}

/// One scripted OCR outcome, consumed in order; once exhausted, repeats
/// `Ok(vec![])`.
pub enum OcrOutcome {
    Blocks(Vec<TextBlock>),
    Fail(TranslatorError),
}

pub struct ScriptedOcrEngine {
    outcomes: Mutex<VecDeque<OcrOutcome>>,
    calls: AtomicU64,
}

impl ScriptedOcrEngine {
    pub fn new(outcomes: impl IntoIterator<Item = OcrOutcome>) -> Self {
        Self { outcomes: Mutex::new(outcomes.into_iter().collect()), calls: AtomicU64::new(0) }
    }

    pub fn call_count(&self) -> u64 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl OcrEngine for ScriptedOcrEngine {
    async fn recognize(&self, _frame: &Frame) -> Result<Vec<TextBlock>, TranslatorError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.outcomes.lock().unwrap().pop_front() {
            Some(OcrOutcome::Blocks(blocks)) => Ok(blocks),
            Some(OcrOutcome::Fail(err)) => Err(err),
            None => Ok(Vec::new()),
        }
    }
}

/// Translates by looking up `source_text` in a fixed table, falling back to
/// `"{text}-translated"` at full confidence for anything unlisted.
pub struct ScriptedTranslationEngine {
    table: HashMap<String, TranslationResponse>,
    calls: AtomicU64,
}

impl ScriptedTranslationEngine {
    pub fn new(table: Vec<(&str, TranslationResponse)>) -> Self {
        Self {
            table: table.into_iter().map(|(k, v)| (k.to_string(), v)).collect(),
            calls: AtomicU64::new(0),
        }
    }

    pub fn call_count(&self) -> u64 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TranslationEngine for ScriptedTranslationEngine {
    async fn translate(&self, request: &TranslationRequest) -> Result<TranslationResponse, TranslatorError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.table.get(&request.text) {
            Some(response) => Ok(response.clone()),
            None => Ok(TranslationResponse {
                translated_text: format!("{}-translated", request.text),
                confidence: Confidence::FULL,
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RenderEvent {
    ShowOrUpdate(String),
    Remove(String),
}

#[derive(Default)]
pub struct RecordingOverlayRenderer {
    events: Mutex<Vec<RenderEvent>>,
}

impl RecordingOverlayRenderer {
    pub fn events(&self) -> Vec<RenderEvent> {
        self.events.lock().unwrap().clone()
    }
}

#[async_trait]
impl OverlayRenderer for RecordingOverlayRenderer {
    async fn show_or_update(&self, overlay: &TrackedOverlay) -> Result<(), TranslatorError> {
        self.events.lock().unwrap().push(RenderEvent::ShowOrUpdate(overlay.overlay_id.clone()));
        Ok(())
    }

    async fn remove(&self, overlay_id: &str) -> Result<(), TranslatorError> {
        self.events.lock().unwrap().push(RenderEvent::Remove(overlay_id.to_string()));
        Ok(())
    }

    async fn clear_all(&self) -> Result<(), TranslatorError> {
        self.events.lock().unwrap().clear();
        Ok(())
    }
}

pub fn lang(code: &str) -> LanguageTag {
    LanguageTag::new(code).unwrap()
}

pub fn temp_dict_dir(label: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("screentl-test-{label}-{}-{}", std::process::id(), unique()))
}

/// Cheap per-process-unique suffix for temp directory names, since
/// `Date.now`-style timestamps aren't available and tests may run
/// concurrently.
fn unique() -> u64 {
    static COUNTER: AtomicU64 = AtomicU64::new(0);
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// Knobs a scenario test cares about; mirrors the subset of
/// `TranslatorConfig` that changes which optimizers get registered in
/// `main.rs::run_session`.
pub struct HarnessConfig {
    pub enable_frame_skip: bool,
    pub cache_enabled: bool,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self { enable_frame_skip: false, cache_enabled: true }
    }
}

/// A fully wired orchestrator plus handles to every stub so a test can drive
/// frames and inspect what happened, built the same way `main.rs` wires the
/// real session (same optimizer registration order, same port types).
pub struct Harness {
    pub orchestrator: Arc<TranslationOrchestrator<ScriptedBackend>>,
    pub coordinator: Arc<RegionCoordinator<ScriptedBackend>>,
    pub backend: Arc<ScriptedBackend>,
    pub ocr: Arc<ScriptedOcrEngine>,
    pub engine: Arc<ScriptedTranslationEngine>,
    pub renderer: Arc<RecordingOverlayRenderer>,
    pub cache: Arc<TranslationCache>,
    pub metrics: Arc<MetricsService>,
    pub error_handler: Arc<TranslatorErrorHandler>,
    pub dict_dir: std::path::PathBuf,
    pub source: LanguageTag,
    pub target: LanguageTag,
}

pub fn build_harness(
    backend_fills: impl IntoIterator<Item = u8>,
    ocr_outcomes: impl IntoIterator<Item = OcrOutcome>,
    translation_table: Vec<(&str, TranslationResponse)>,
    config: HarnessConfig,
    dict_label: &str,
) -> Harness {
    build_harness_with_ocr_breaker(backend_fills, ocr_outcomes, translation_table, config, dict_label, None)
}

/// Same as [`build_harness`], but lets a test install a fast-timeout OCR
/// circuit breaker before the orchestrator is constructed, so resilience
/// scenarios don't need to wait out the real default 60-second reset.
pub fn build_harness_with_ocr_breaker(
    backend_fills: impl IntoIterator<Item = u8>,
    ocr_outcomes: impl IntoIterator<Item = OcrOutcome>,
    translation_table: Vec<(&str, TranslationResponse)>,
    config: HarnessConfig,
    dict_label: &str,
    ocr_breaker_config: Option<CircuitBreakerConfig>,
) -> Harness {
    let source = lang("en");
    let target = lang("fr");

    let backend = Arc::new(ScriptedBackend::new(backend_fills));
    let coordinator = Arc::new(RegionCoordinator::new(backend.clone()));

    let ocr = Arc::new(ScriptedOcrEngine::new(ocr_outcomes));
    let renderer = Arc::new(RecordingOverlayRenderer::default());
    let dict_dir = temp_dict_dir(dict_label);
    let dictionary_repository = Arc::new(DictionaryFileRepository::new(&dict_dir));
    let overlay_tracker = Arc::new(OverlayTracker::new(0.2));
    let text_validator = Arc::new(TextValidator::default());
    let quality_filter = Arc::new(QualityFilter::new(QualityFilterConfig::default()));
    let error_handler = Arc::new(TranslatorErrorHandler::new());
    if let Some(breaker_config) = ocr_breaker_config {
        error_handler.register_circuit_breaker("ocr", breaker_config);
    }
    let metrics = Arc::new(MetricsService::new().unwrap());

    let mut optimizer_host = OptimizerHost::new();
    if config.enable_frame_skip {
        optimizer_host.register(Arc::new(FrameSkipOptimizer::new()));
    }
    let cache = Arc::new(TranslationCache::default());
    if config.cache_enabled {
        optimizer_host.register(Arc::new(TranslationCacheOptimizer::new(cache.clone(), metrics.clone(), source.clone(), target.clone())));
    }
    let engine = Arc::new(ScriptedTranslationEngine::new(translation_table));
    let mut parallel_translation = ParallelTranslationOptimizer::new(engine.clone(), 4, source.clone(), target.clone());
    if config.cache_enabled {
        parallel_translation = parallel_translation.with_cache(cache.clone());
    }
    optimizer_host.register(Arc::new(parallel_translation));
    let optimizer_host = Arc::new(optimizer_host);

    let orchestrator = Arc::new(TranslationOrchestrator::new(
        coordinator.clone(),
        ocr.clone(),
        renderer.clone(),
        dictionary_repository,
        optimizer_host,
        overlay_tracker,
        text_validator,
        quality_filter,
        error_handler.clone(),
        metrics.clone(),
        OrchestratorLanguages { source: source.clone(), target: target.clone() },
        "scripted",
    ));

    Harness { orchestrator, coordinator, backend, ocr, engine, renderer, cache, metrics, error_handler, dict_dir, source, target }
}

pub fn region(id: &str, x: i32, y: i32, width: u32, height: u32) -> CaptureRegion {
    CaptureRegion::new(id, Rectangle::new(x, y, width, height).unwrap()).unwrap()
}

pub fn text_block(text: &str, bounds: Rectangle, confidence: f32) -> TextBlock {
    TextBlock::new(text, bounds, Confidence::new(confidence).unwrap()).unwrap()
}
