// screentl
// SPDX-License-Identifier: BSD-3-Clause

//! Service contracts (ports) implemented by infrastructure adapters.
//!
//! Everything in this module is a trait; no concrete engine, capture, or
//! rendering implementation belongs in the domain layer.

pub mod capture_backend;
pub mod ocr_engine;
pub mod overlay_renderer;
pub mod translation_engine;

pub use capture_backend::CaptureBackend;
pub use ocr_engine::OcrEngine;
pub use overlay_renderer::OverlayRenderer;
pub use translation_engine::{TranslationEngine, TranslationRequest, TranslationResponse};
