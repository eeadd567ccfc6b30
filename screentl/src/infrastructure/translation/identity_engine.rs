// screentl
// SPDX-License-Identifier: BSD-3-Clause

//! Reference [`TranslationEngine`] that returns its input unchanged.
//!
//! A real adapter calls into a local model runtime or a remote translation
//! API; that integration is an external collaborator's concern. This engine
//! exists so the pipeline, cache, and dictionary-persistence code can be
//! exercised end to end without one configured.

use async_trait::async_trait;

use screentl_domain::error::TranslatorError;
use screentl_domain::services::{TranslationEngine, TranslationRequest, TranslationResponse};
use screentl_domain::value_objects::Confidence;

pub struct IdentityTranslationEngine;

impl IdentityTranslationEngine {
    pub fn new() -> Self {
        Self
    }
}

impl Default for IdentityTranslationEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TranslationEngine for IdentityTranslationEngine {
    async fn translate(&self, request: &TranslationRequest) -> Result<TranslationResponse, TranslatorError> {
        Ok(TranslationResponse {
            translated_text: request.text.clone(),
            confidence: Confidence::new(0.0)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use screentl_domain::value_objects::LanguageTag;

    #[tokio::test]
    async fn echoes_input_text() {
        let engine = IdentityTranslationEngine::new();
        let request = TranslationRequest {
            text: "hello".to_string(),
            source_lang: LanguageTag::new("en").unwrap(),
            target_lang: LanguageTag::new("de").unwrap(),
        };
        let response = engine.translate(&request).await.unwrap();
        assert_eq!(response.translated_text, "hello");
    }
}
