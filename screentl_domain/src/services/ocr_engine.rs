// screentl
// SPDX-License-Identifier: BSD-3-Clause

//! OCR (text recognition) port.

use async_trait::async_trait;

use crate::entities::{Frame, TextBlock};
use crate::error::TranslatorError;

/// Recognizes text blocks within a captured frame.
#[async_trait]
pub trait OcrEngine: Send + Sync {
    async fn recognize(&self, frame: &Frame) -> Result<Vec<TextBlock>, TranslatorError>;

    /// The language this engine is configured to recognize, if it only
    /// supports one at a time (many on-device OCR engines do).
    fn recognition_language(&self) -> Option<&str> {
        None
    }
}
