// screentl
// SPDX-License-Identifier: BSD-3-Clause

//! Configuration surface matching the recognized option list: `capture.*`,
//! `ocr.*`, `translation.*`, `overlay.*`, `performance.*`, `pipeline.*`,
//! `advanced.*`. Loading and persisting a config file from disk is an
//! external collaborator's concern — this module only defines the shape,
//! layers defaults/file/env, and validates the result.

use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;

use screentl_domain::error::TranslatorError;

const DEFAULTS_TOML: &str = r#"
[capture]
fps = 10
mode = "polling"
quality = "high"
adaptive = true
fallback_enabled = true

[ocr]
engine = "default"
language = "en"
confidence_threshold = 0.6

[translation]
source_language = "en"
target_language = "es"
confidence_threshold = 0.7
cache_enabled = true
quality_filter_enabled = true
quality_filter_mode = "balanced"

[overlay]
enabled = true
auto_hide_on_disappear = true
disappear_timeout = 2.0

[performance]
runtime_mode = "auto"
enable_gpu_acceleration = false
enable_multithreading = true
max_worker_threads = 4
enable_frame_skip = true
enable_roi_detection = true
enable_parallel_ocr = false
batch_translation = false

[pipeline]
enable_optimizer_plugins = true

[pipeline.parallel_capture]
enabled = true
workers = 2

[pipeline.parallel_translation]
enabled = true
workers = 4

[advanced]
debug_mode = false
enable_monitoring = true
experimental_features = false
"#;

#[derive(Debug, Clone, Deserialize)]
pub struct CaptureConfig {
    pub fps: u32,
    pub mode: String,
    pub quality: String,
    pub adaptive: bool,
    pub fallback_enabled: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OcrConfig {
    pub engine: String,
    pub language: String,
    pub confidence_threshold: f32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TranslationConfig {
    pub source_language: String,
    pub target_language: String,
    pub confidence_threshold: f32,
    pub cache_enabled: bool,
    pub quality_filter_enabled: bool,
    pub quality_filter_mode: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OverlayConfig {
    pub enabled: bool,
    pub auto_hide_on_disappear: bool,
    pub disappear_timeout: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PerformanceConfig {
    pub runtime_mode: String,
    pub enable_gpu_acceleration: bool,
    pub enable_multithreading: bool,
    pub max_worker_threads: usize,
    pub enable_frame_skip: bool,
    pub enable_roi_detection: bool,
    pub enable_parallel_ocr: bool,
    pub batch_translation: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ParallelStageConfig {
    pub enabled: bool,
    pub workers: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PipelineConfig {
    pub enable_optimizer_plugins: bool,
    pub parallel_capture: ParallelStageConfig,
    pub parallel_translation: ParallelStageConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AdvancedConfig {
    pub debug_mode: bool,
    pub enable_monitoring: bool,
    pub experimental_features: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TranslatorConfig {
    pub capture: CaptureConfig,
    pub ocr: OcrConfig,
    pub translation: TranslationConfig,
    pub overlay: OverlayConfig,
    pub performance: PerformanceConfig,
    pub pipeline: PipelineConfig,
    pub advanced: AdvancedConfig,
}

impl TranslatorConfig {
    /// Loads configuration by layering embedded defaults, an optional config
    /// file, then `SCREENTL_*` environment variables, in that precedence
    /// order, and validates the result.
    pub fn load(file_path: Option<&str>) -> Result<Self, TranslatorError> {
        let mut builder = Config::builder().add_source(File::from_str(DEFAULTS_TOML, FileFormat::Toml));

        if let Some(path) = file_path {
            builder = builder.add_source(File::with_name(path).required(false));
        }

        builder = builder.add_source(Environment::with_prefix("SCREENTL").separator("_").try_parsing(true));

        let config = builder
            .build()
            .map_err(|e| TranslatorError::invalid_config(format!("failed to build configuration: {e}")))?;

        let parsed: Self = config
            .try_deserialize()
            .map_err(|e| TranslatorError::invalid_config(format!("failed to parse configuration: {e}")))?;

        parsed.validate()?;
        Ok(parsed)
    }

    pub fn validate(&self) -> Result<(), TranslatorError> {
        if self.capture.fps == 0 || self.capture.fps > 240 {
            return Err(TranslatorError::invalid_config(format!("capture.fps out of range: {}", self.capture.fps)));
        }
        if !(0.0..=1.0).contains(&self.ocr.confidence_threshold) {
            return Err(TranslatorError::invalid_config("ocr.confidence_threshold must be in [0, 1]"));
        }
        if !(0.0..=1.0).contains(&self.translation.confidence_threshold) {
            return Err(TranslatorError::invalid_config("translation.confidence_threshold must be in [0, 1]"));
        }
        if self.translation.quality_filter_mode != "balanced" && self.translation.quality_filter_mode != "strict" {
            return Err(TranslatorError::invalid_config(format!(
                "translation.quality_filter_mode must be 'balanced' or 'strict', got '{}'",
                self.translation.quality_filter_mode
            )));
        }
        if self.overlay.disappear_timeout < 0.0 {
            return Err(TranslatorError::invalid_config("overlay.disappear_timeout must not be negative"));
        }
        if !["auto", "cpu", "gpu"].contains(&self.performance.runtime_mode.as_str()) {
            return Err(TranslatorError::invalid_config(format!(
                "performance.runtime_mode must be 'auto', 'cpu', or 'gpu', got '{}'",
                self.performance.runtime_mode
            )));
        }
        if self.performance.max_worker_threads == 0 {
            return Err(TranslatorError::invalid_config("performance.max_worker_threads must be at least 1"));
        }
        if self.pipeline.parallel_capture.enabled && self.pipeline.parallel_capture.workers == 0 {
            return Err(TranslatorError::invalid_config("pipeline.parallel_capture.workers must be at least 1 when enabled"));
        }
        if self.pipeline.parallel_translation.enabled && self.pipeline.parallel_translation.workers == 0 {
            return Err(TranslatorError::invalid_config(
                "pipeline.parallel_translation.workers must be at least 1 when enabled",
            ));
        }
        Ok(())
    }
}
