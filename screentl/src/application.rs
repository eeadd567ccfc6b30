// screentl
// SPDX-License-Identifier: BSD-3-Clause

//! Application layer: the orchestrator that drives a capture region's
//! pop-process-render loop, wiring the infrastructure ports together.

pub mod orchestrator;

pub use orchestrator::{OrchestratorLanguages, TranslationOrchestrator};
