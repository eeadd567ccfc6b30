// screentl
// SPDX-License-Identifier: BSD-3-Clause

//! Pre-translation validation of OCR output: rejects unusable blocks,
//! sanitizes the rest, and flags low-confidence text without discarding it
//! so overlay tracking continuity isn't broken by a single shaky frame.

use screentl_domain::entities::TextBlock;
use screentl_domain::error::TranslatorError;

#[derive(Debug, Clone)]
pub struct TextValidatorConfig {
    pub max_block_length: usize,
    pub low_confidence_threshold: f32,
}

impl Default for TextValidatorConfig {
    fn default() -> Self {
        Self {
            max_block_length: 500,
            low_confidence_threshold: 0.4,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ValidatedText {
    pub text: String,
    pub low_confidence: bool,
}

pub struct TextValidator {
    config: TextValidatorConfig,
}

impl TextValidator {
    pub fn new(config: TextValidatorConfig) -> Self {
        Self { config }
    }

    /// Rejects empty blocks and those exceeding the configured max length,
    /// strips control characters from the rest, and flags (without
    /// rejecting) blocks below the low-confidence threshold.
    pub fn validate(&self, block: &TextBlock) -> Result<ValidatedText, TranslatorError> {
        let sanitized: String = block.text.chars().filter(|c| !c.is_control() || *c == '\n').collect();
        let trimmed = sanitized.trim();

        if trimmed.is_empty() {
            return Err(TranslatorError::recognition("text block is empty after sanitization"));
        }
        if trimmed.chars().count() > self.config.max_block_length {
            return Err(TranslatorError::recognition(format!(
                "text block exceeds max length ({} > {})",
                trimmed.chars().count(),
                self.config.max_block_length
            )));
        }

        Ok(ValidatedText {
            text: trimmed.to_string(),
            low_confidence: block.confidence.value() < self.config.low_confidence_threshold,
        })
    }
}

impl Default for TextValidator {
    fn default() -> Self {
        Self::new(TextValidatorConfig::default())
    }
}
