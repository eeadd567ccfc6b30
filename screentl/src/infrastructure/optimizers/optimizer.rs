// screentl
// SPDX-License-Identifier: BSD-3-Clause

//! Optimizer plugin contract: registered at compile time rather than loaded
//! dynamically, each optimizer hooks `process`/`post_process` around the
//! pipeline's normal stage work and exposes its own stats.

use async_trait::async_trait;
use screentl_domain::entities::{Frame, TextBlock, Translation};
use screentl_domain::error::TranslatorError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Static description of an optimizer, surfaced to configuration and status
/// reporting. `essential` optimizers cannot be disabled at runtime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizerManifest {
    pub name: String,
    pub version: String,
    pub display_name: String,
    pub description: String,
    pub essential: bool,
    pub enabled: bool,
    pub settings: Value,
}

impl OptimizerManifest {
    pub fn new(name: impl Into<String>, display_name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: "1.0.0".to_string(),
            display_name: display_name.into(),
            description: description.into(),
            essential: false,
            enabled: true,
            settings: Value::Null,
        }
    }
}

/// Shared mutable state passed through the optimizer chain for a single
/// frame, so each optimizer can inspect and adjust what the rest of the
/// pipeline does with it.
#[derive(Debug, Default)]
pub struct OptimizerContext {
    pub frame: Option<Frame>,
    pub text_blocks: Vec<TextBlock>,
    pub translations: Vec<Translation>,
    /// Set by an optimizer (frame skip, motion tracker) to short-circuit the
    /// remaining stages for this frame.
    pub skip_remaining: bool,
}

#[async_trait]
pub trait Optimizer: Send + Sync {
    fn manifest(&self) -> OptimizerManifest;

    /// Runs before the stage this optimizer targets; may set
    /// `ctx.skip_remaining` to bypass the rest of the pipeline for this
    /// frame.
    async fn process(&self, ctx: &mut OptimizerContext) -> Result<(), TranslatorError>;

    /// Runs after the targeted stage has produced its output.
    async fn post_process(&self, _ctx: &mut OptimizerContext) -> Result<(), TranslatorError> {
        Ok(())
    }

    fn get_stats(&self) -> Value {
        Value::Null
    }

    fn cleanup(&self) {}
}
