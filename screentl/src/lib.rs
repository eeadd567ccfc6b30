// screentl
// SPDX-License-Identifier: BSD-3-Clause

//! # screentl
//!
//! A real-time screen-translation engine: capture a region of the screen,
//! recognize on-screen text, translate it, and render the result back as a
//! positioned overlay.
//!
//! ## Architecture
//!
//! The crate follows the same layering as the domain crate it depends on:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  Application Layer                          │
//! │  (TranslationOrchestrator: the pop-process-render loop)     │
//! └─────────────────────────────────────────────────────────────┘
//!                                │
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Domain Layer (screentl_domain)             │
//! │  (Entities, Value Objects, Ports, Errors)                     │
//! └─────────────────────────────────────────────────────────────┘
//!                                │
//! ┌─────────────────────────────────────────────────────────────┐
//! │                Infrastructure Layer                          │
//! │  (Capture coordination, OCR/translation optimizers, queues,  │
//! │   overlay tracking, resilience, metrics, config, logging)    │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Core Concepts
//!
//! ### Capture regions
//! Each monitored screen region runs its own capture loop, feeding a bounded
//! per-region queue consumed by the orchestrator.
//!
//! ### Optimizer chain
//! Before and after OCR, a chain of optimizers can skip frames, merge
//! adjacent text blocks, fill in translations from a cache or dictionary, and
//! fan out concurrent translation-engine calls for what's left.
//!
//! ### Overlay tracking
//! Rendered overlays are tracked by id so translations which disappear from
//! the screen get cleared rather than left stale.
//!
//! ### Resilience
//! Circuit breakers and a central error handler isolate a misbehaving stage
//! (a flaky OCR engine, an unreachable translation backend) from stopping the
//! whole session.

pub mod application;
pub mod infrastructure;
pub mod presentation;

// Tests are organized as:
// - Unit tests: #[cfg(test)] modules within each source file
// - Integration tests: separate files in tests/ directory

pub use screentl_domain::{
    CaptureBackend, CaptureRegion, Confidence, DictionaryEntry, DictionaryRepository, Frame, LanguageTag,
    MultiRegionConfig, OcrEngine, OverlayRenderer, Rectangle, StageResult, TextBlock, TrackedOverlay, Translation,
    TranslationEngine, TranslationRequest, TranslationResponse, TranslatorError,
};

pub use crate::application::{OrchestratorLanguages, TranslationOrchestrator};
