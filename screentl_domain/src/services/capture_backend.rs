// screentl
// SPDX-License-Identifier: BSD-3-Clause

//! Capture backend port.
//!
//! An adapter implements screen capture for one platform (Windows
//! Desktop Duplication, X11, Wayland portal, ...). The domain only needs the
//! contract: given a region, produce frames; be told when a region's bounds
//! or masked sub-rectangles change.

use async_trait::async_trait;

use crate::entities::Frame;
use crate::error::TranslatorError;
use crate::value_objects::{CaptureRegion, Rectangle};

/// Captures frames from a single screen region.
#[async_trait]
pub trait CaptureBackend: Send + Sync {
    /// Captures the next available frame for `region`.
    async fn capture(&self, region: &CaptureRegion) -> Result<Frame, TranslatorError>;

    /// Informs the backend of screen-absolute rectangles currently occupied
    /// by this engine's own overlays, so a capture implementation that reads
    /// framebuffer memory (rather than a compositor API that already
    /// excludes overlay windows) can mask them out and avoid a feedback loop
    /// where the engine translates its own overlay text.
    async fn set_masked_rectangles(&self, rectangles: Vec<Rectangle>) -> Result<(), TranslatorError>;
}
