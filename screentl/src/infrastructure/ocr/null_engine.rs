// screentl
// SPDX-License-Identifier: BSD-3-Clause

//! No-op OCR engine: always reports zero text blocks.
//!
//! Useful as a pipeline structure placeholder, for exercising capture and
//! overlay lifecycle code without a recognizer wired in, and as the default
//! when no real engine has been configured yet.

use async_trait::async_trait;

use screentl_domain::entities::{Frame, TextBlock};
use screentl_domain::error::TranslatorError;
use screentl_domain::services::OcrEngine;

pub struct NullOcrEngine;

impl NullOcrEngine {
    pub fn new() -> Self {
        Self
    }
}

impl Default for NullOcrEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OcrEngine for NullOcrEngine {
    async fn recognize(&self, _frame: &Frame) -> Result<Vec<TextBlock>, TranslatorError> {
        Ok(Vec::new())
    }
}
