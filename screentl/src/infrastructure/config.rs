// screentl
// SPDX-License-Identifier: BSD-3-Clause

//! Configuration surface: defaults, file, and `SCREENTL_*` environment
//! overrides, layered via the `config` crate.

pub mod translator_config;

pub use translator_config::{
    AdvancedConfig, CaptureConfig, OcrConfig, OverlayConfig, PerformanceConfig, PipelineConfig, TranslationConfig,
    TranslatorConfig,
};
