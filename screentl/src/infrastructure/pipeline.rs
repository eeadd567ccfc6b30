// screentl
// SPDX-License-Identifier: BSD-3-Clause

//! Stage-graph pipeline engine: registration, topological ordering,
//! execution, and pre/post stage callbacks.

pub mod engine;
pub mod stage;

pub use engine::{PipelineEngine, StageCallback};
pub use stage::Stage;
