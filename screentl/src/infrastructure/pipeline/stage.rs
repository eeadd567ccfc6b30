// screentl
// SPDX-License-Identifier: BSD-3-Clause

//! The `Stage` trait every pipeline stage implements: capture, preprocess,
//! OCR, validate, translate, overlay.

use async_trait::async_trait;
use screentl_domain::entities::Frame;
use screentl_domain::error::TranslatorError;

/// A single named step in the translation pipeline.
///
/// Stages are registered with the engine by name and a list of the names
/// they depend on; the engine topologically sorts the registered stages and
/// runs `execute` on each in dependency order for every frame.
#[async_trait]
pub trait Stage: Send + Sync {
    /// Stable name used for dependency declarations, enable/disable, and
    /// metrics labels.
    fn name(&self) -> &str;

    /// Runs this stage against the current frame, mutating pipeline state
    /// held by the stage implementation itself (e.g. the OCR stage stashes
    /// recognized blocks somewhere the translate stage can read them).
    async fn execute(&self, frame: &Frame) -> Result<(), TranslatorError>;

    /// Whether this stage is currently able to run (e.g. a circuit breaker
    /// for its backing engine is open).
    fn can_execute(&self) -> bool {
        true
    }

    /// Cheap configuration sanity check run once at registration time.
    fn validate_configuration(&self) -> Result<(), TranslatorError> {
        Ok(())
    }
}
