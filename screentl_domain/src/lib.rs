// screentl
// SPDX-License-Identifier: BSD-3-Clause

// Production code safety enforced via CI and `make lint-strict`
// (lib/bins checked separately from tests - tests may use unwrap/expect)

//! # Screen Translation Domain
//!
//! Pure business logic for the real-time screen translation engine: entities,
//! value objects, the single workspace error type, and the service contracts
//! (ports) that infrastructure adapters implement. Nothing in this crate
//! touches a runtime, a logger, or a filesystem.
//!
//! ## Architecture Position
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │            screentl (core) crate            │
//! │  pipeline engine, worker pool, managers      │
//! └───────────────────────┬───────────────────────┘
//!                         │ depends on
//! ┌───────────────────────▼───────────────────────┐
//! │           screentl_domain (this crate)       │
//! │  entities, value objects, error, ports       │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`error`] — `TranslatorError`, the single error type used everywhere.
//! - [`value_objects`] — `Rectangle`, `Confidence`, `LanguageTag`,
//!   `CaptureRegion`, `MultiRegionConfig`, `PipelineState`, overlay id
//!   derivation.
//! - [`entities`] — `Frame`, `TextBlock`, `Translation`, `DictionaryEntry`,
//!   `TrackedOverlay`, `StageResult`.
//! - [`services`] — `CaptureBackend`, `OcrEngine`, `TranslationEngine`,
//!   `OverlayRenderer` port traits.
//! - [`repositories`] — `DictionaryRepository` port.

pub mod entities;
pub mod error;
pub mod repositories;
pub mod services;
pub mod value_objects;

pub use entities::{DictionaryEntry, Frame, StageResult, TextBlock, Translation, TrackedOverlay};
pub use error::TranslatorError;
pub use repositories::DictionaryRepository;
pub use services::{CaptureBackend, OcrEngine, OverlayRenderer, TranslationEngine, TranslationRequest, TranslationResponse};
pub use value_objects::{CaptureRegion, Confidence, LanguageTag, MultiRegionConfig, PipelineState, Rectangle};
