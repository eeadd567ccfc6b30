// screentl
// SPDX-License-Identifier: BSD-3-Clause

//! Translation engine port.
//!
//! This workspace is built against the direct in-process engine-call variant
//! (an adapter calling into a local model runtime or a remote API client
//! behind this trait) rather than a subprocess-pool variant; the subprocess
//! failure modes that only apply to managing a pool of worker processes are
//! out of scope here, since any such process management would live entirely
//! inside a concrete adapter, not in this contract.

use async_trait::async_trait;

use crate::error::TranslatorError;
use crate::value_objects::{Confidence, LanguageTag};

/// One text span to translate.
#[derive(Debug, Clone)]
pub struct TranslationRequest {
    pub text: String,
    pub source_lang: LanguageTag,
    pub target_lang: LanguageTag,
}

#[derive(Debug, Clone)]
pub struct TranslationResponse {
    pub translated_text: String,
    pub confidence: Confidence,
}

#[async_trait]
pub trait TranslationEngine: Send + Sync {
    async fn translate(&self, request: &TranslationRequest) -> Result<TranslationResponse, TranslatorError>;

    /// Translates a batch in one call when the adapter can do better than N
    /// sequential calls; the default just loops, so adapters with no batch
    /// advantage don't need to override it.
    async fn translate_batch(
        &self,
        requests: &[TranslationRequest],
    ) -> Result<Vec<TranslationResponse>, TranslatorError> {
        let mut responses = Vec::with_capacity(requests.len());
        for request in requests {
            responses.push(self.translate(request).await?);
        }
        Ok(responses)
    }
}
