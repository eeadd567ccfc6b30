// screentl
// SPDX-License-Identifier: BSD-3-Clause

//! Recognized text block entity, produced by the OCR stage.

use crate::error::TranslatorError;
use crate::value_objects::{Confidence, Rectangle};

/// A block of text recognized within a frame, with its region-local bounding
/// box and the OCR engine's confidence in the recognition.
#[derive(Debug, Clone)]
pub struct TextBlock {
    pub text: String,
    pub bounds: Rectangle,
    pub confidence: Confidence,
}

impl TextBlock {
    pub fn new(text: impl Into<String>, bounds: Rectangle, confidence: Confidence) -> Result<Self, TranslatorError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(TranslatorError::recognition("text block must not be empty"));
        }
        Ok(Self { text, bounds, confidence })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_text() {
        let bounds = Rectangle::new(0, 0, 10, 10).unwrap();
        assert!(TextBlock::new("   ", bounds, Confidence::FULL).is_err());
    }

    #[test]
    fn accepts_valid_block() {
        let bounds = Rectangle::new(10, 10, 60, 20).unwrap();
        let confidence = Confidence::new(0.95).unwrap();
        let block = TextBlock::new("Hello", bounds, confidence).unwrap();
        assert_eq!(block.text, "Hello");
    }
}
