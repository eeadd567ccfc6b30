// screentl
// SPDX-License-Identifier: BSD-3-Clause

//! No-op [`OverlayRenderer`]: acknowledges lifecycle calls without drawing
//! anything.
//!
//! Glyph rendering is an external collaborator's concern (a windowing/UI
//! toolkit owning an on-screen surface); this adapter exists so overlay
//! tracking and positioning can be exercised without one configured.

use async_trait::async_trait;

use screentl_domain::entities::TrackedOverlay;
use screentl_domain::error::TranslatorError;
use screentl_domain::services::OverlayRenderer;

pub struct NullOverlayRenderer;

impl NullOverlayRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for NullOverlayRenderer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OverlayRenderer for NullOverlayRenderer {
    async fn show_or_update(&self, _overlay: &TrackedOverlay) -> Result<(), TranslatorError> {
        Ok(())
    }

    async fn remove(&self, _overlay_id: &str) -> Result<(), TranslatorError> {
        Ok(())
    }

    async fn clear_all(&self) -> Result<(), TranslatorError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use screentl_domain::value_objects::Rectangle;

    #[tokio::test]
    async fn accepts_all_lifecycle_calls() {
        let renderer = NullOverlayRenderer::new();
        let overlay = TrackedOverlay::new("o1", "hello", Rectangle::new(0, 0, 10, 10).unwrap(), "main", 0.9);
        renderer.show_or_update(&overlay).await.unwrap();
        renderer.remove("o1").await.unwrap();
        renderer.clear_all().await.unwrap();
    }
}
