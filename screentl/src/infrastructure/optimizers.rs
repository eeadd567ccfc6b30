// screentl
// SPDX-License-Identifier: BSD-3-Clause

//! Pluggable frame/text/translation optimizers and the host that runs them.
//!
//! Each optimizer implements a small, focused responsibility (skip unchanged
//! frames, merge adjacent OCR blocks, front the translation cache, ...) and
//! is composed by [`OptimizerHost`] into one pipeline stage.

pub mod async_pipeline;
pub mod frame_skip;
pub mod host;
pub mod motion_tracker;
pub mod optimizer;
pub mod parallel_translation;
pub mod spell_corrector;
pub mod text_block_merger;
pub mod translation_cache_optimizer;

pub use async_pipeline::AsyncPipelineOptimizer;
pub use frame_skip::FrameSkipOptimizer;
pub use host::OptimizerHost;
pub use motion_tracker::MotionTrackerOptimizer;
pub use optimizer::{Optimizer, OptimizerContext, OptimizerManifest};
pub use parallel_translation::ParallelTranslationOptimizer;
pub use spell_corrector::SpellCorrectorOptimizer;
pub use text_block_merger::TextBlockMergerOptimizer;
pub use translation_cache_optimizer::TranslationCacheOptimizer;
