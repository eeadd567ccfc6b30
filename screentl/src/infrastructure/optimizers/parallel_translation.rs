// screentl
// SPDX-License-Identifier: BSD-3-Clause

//! Fans translation requests for a frame's text blocks out across a bounded
//! worker set, grounded on the same batch-parallel pattern used for
//! multi-region OCR: submit up to N concurrent calls, bound by a semaphore
//! rather than an unbounded spawn per block.

use std::sync::Arc;

use async_trait::async_trait;
use screentl_domain::error::TranslatorError;
use screentl_domain::services::{TranslationEngine, TranslationRequest};
use screentl_domain::value_objects::LanguageTag;
use serde_json::json;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::Semaphore;

use crate::infrastructure::translation::{CachedTranslation, TranslationCache};

use super::optimizer::{Optimizer, OptimizerContext, OptimizerManifest};

pub struct ParallelTranslationOptimizer<E: TranslationEngine + 'static> {
    engine: Arc<E>,
    cache: Option<Arc<TranslationCache>>,
    permits: Arc<Semaphore>,
    source_lang: LanguageTag,
    target_lang: LanguageTag,
    requests_run: AtomicU64,
}

impl<E: TranslationEngine + 'static> ParallelTranslationOptimizer<E> {
    pub fn new(engine: Arc<E>, max_concurrency: usize, source_lang: LanguageTag, target_lang: LanguageTag) -> Self {
        Self {
            engine,
            cache: None,
            permits: Arc::new(Semaphore::new(max_concurrency.max(1))),
            source_lang,
            target_lang,
            requests_run: AtomicU64::new(0),
        }
    }

    /// Writes every successful translation back into `cache` so later frames
    /// that reach the same source text can be served without another engine
    /// call.
    pub fn with_cache(mut self, cache: Arc<TranslationCache>) -> Self {
        self.cache = Some(cache);
        self
    }
}

#[async_trait]
impl<E: TranslationEngine + 'static> Optimizer for ParallelTranslationOptimizer<E> {
    fn manifest(&self) -> OptimizerManifest {
        OptimizerManifest::new("parallel_translation", "Parallel Translation", "Translates a frame's remaining text blocks concurrently, bounded by a worker semaphore")
    }

    async fn process(&self, ctx: &mut OptimizerContext) -> Result<(), TranslatorError> {
        let already_translated: std::collections::HashSet<String> = ctx.translations.iter().map(|t| t.source_text.clone()).collect();
        let pending: Vec<_> = ctx.text_blocks.iter().filter(|b| !already_translated.contains(&b.text)).cloned().collect();
        if pending.is_empty() {
            return Ok(());
        }

        let mut handles = Vec::with_capacity(pending.len());
        for block in pending {
            let engine = self.engine.clone();
            let permits = self.permits.clone();
            let source_lang = self.source_lang.clone();
            let target_lang = self.target_lang.clone();
            handles.push(tokio::spawn(async move {
                let _permit = permits.acquire().await.expect("semaphore never closed");
                let request = TranslationRequest {
                    text: block.text.clone(),
                    source_lang: source_lang.clone(),
                    target_lang: target_lang.clone(),
                };
                let response = engine.translate(&request).await?;
                screentl_domain::entities::Translation::new(block.text, response.translated_text, source_lang, target_lang, response.confidence, block.bounds)
            }));
        }

        for handle in handles {
            match handle.await {
                Ok(Ok(translation)) => {
                    self.requests_run.fetch_add(1, Ordering::Relaxed);
                    if let Some(cache) = &self.cache {
                        cache.put(
                            &translation.source_text,
                            &self.source_lang,
                            &self.target_lang,
                            CachedTranslation { translated_text: translation.translated_text.clone(), confidence: translation.confidence },
                        );
                    }
                    ctx.translations.push(translation);
                }
                Ok(Err(err)) => return Err(err),
                Err(join_err) => return Err(TranslatorError::internal(format!("translation task panicked: {join_err}"))),
            }
        }
        Ok(())
    }

    fn get_stats(&self) -> serde_json::Value {
        json!({ "requests_run": self.requests_run.load(Ordering::Relaxed) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use screentl_domain::entities::TextBlock;
    use screentl_domain::services::TranslationResponse;
    use screentl_domain::value_objects::{Confidence, Rectangle};

    struct StubEngine;

    #[async_trait]
    impl TranslationEngine for StubEngine {
        async fn translate(&self, request: &TranslationRequest) -> Result<TranslationResponse, TranslatorError> {
            Ok(TranslationResponse { translated_text: format!("{}-translated", request.text), confidence: Confidence::FULL })
        }
    }

    fn lang(code: &str) -> LanguageTag {
        LanguageTag::new(code).unwrap()
    }

    #[tokio::test]
    async fn translates_all_pending_blocks_concurrently() {
        let optimizer = ParallelTranslationOptimizer::new(Arc::new(StubEngine), 2, lang("en"), lang("fr"));
        let blocks = vec![
            TextBlock::new("hello", Rectangle::new(0, 0, 10, 10).unwrap(), Confidence::FULL).unwrap(),
            TextBlock::new("world", Rectangle::new(0, 20, 10, 10).unwrap(), Confidence::FULL).unwrap(),
        ];
        let mut ctx = OptimizerContext { text_blocks: blocks, ..Default::default() };
        optimizer.process(&mut ctx).await.unwrap();
        assert_eq!(ctx.translations.len(), 2);
    }

    #[tokio::test]
    async fn skips_blocks_already_translated() {
        let optimizer = ParallelTranslationOptimizer::new(Arc::new(StubEngine), 2, lang("en"), lang("fr"));
        let block = TextBlock::new("hello", Rectangle::new(0, 0, 10, 10).unwrap(), Confidence::FULL).unwrap();
        let existing = screentl_domain::entities::Translation::new("hello", "bonjour", lang("en"), lang("fr"), Confidence::FULL, Rectangle::new(0, 0, 10, 10).unwrap()).unwrap();
        let mut ctx = OptimizerContext { text_blocks: vec![block], translations: vec![existing], ..Default::default() };
        optimizer.process(&mut ctx).await.unwrap();
        assert_eq!(ctx.translations.len(), 1);
    }

    #[tokio::test]
    async fn successful_translation_is_written_back_to_cache() {
        let cache = Arc::new(TranslationCache::new(8));
        let en = lang("en");
        let fr = lang("fr");
        let optimizer = ParallelTranslationOptimizer::new(Arc::new(StubEngine), 2, en.clone(), fr.clone()).with_cache(cache.clone());
        let block = TextBlock::new("hello", Rectangle::new(0, 0, 10, 10).unwrap(), Confidence::FULL).unwrap();
        let mut ctx = OptimizerContext { text_blocks: vec![block], ..Default::default() };
        optimizer.process(&mut ctx).await.unwrap();

        let cached = cache.get("hello", &en, &fr).unwrap();
        assert_eq!(cached.translated_text, "hello-translated");
    }
}
