// screentl
// SPDX-License-Identifier: BSD-3-Clause

//! Overlay renderer port.
//!
//! Glyph rendering itself is out of scope for this workspace; an adapter
//! owns drawing translated text on screen. This contract only covers
//! lifecycle: show/update an overlay, remove it when it disappears.

use async_trait::async_trait;

use crate::entities::TrackedOverlay;
use crate::error::TranslatorError;

#[async_trait]
pub trait OverlayRenderer: Send + Sync {
    async fn show_or_update(&self, overlay: &TrackedOverlay) -> Result<(), TranslatorError>;

    async fn remove(&self, overlay_id: &str) -> Result<(), TranslatorError>;

    async fn clear_all(&self) -> Result<(), TranslatorError>;
}
