// screentl
// SPDX-License-Identifier: BSD-3-Clause

//! Fronts the translation engine with the in-memory LRU cache: a hit fills
//! in `ctx.translations` directly and the rest of the chain skips the
//! external engine call for that block.

use async_trait::async_trait;
use screentl_domain::error::TranslatorError;
use screentl_domain::value_objects::LanguageTag;
use serde_json::json;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::infrastructure::metrics::MetricsService;
use crate::infrastructure::translation::TranslationCache;

use super::optimizer::{Optimizer, OptimizerContext, OptimizerManifest};

pub struct TranslationCacheOptimizer {
    cache: Arc<TranslationCache>,
    metrics: Arc<MetricsService>,
    source_lang: LanguageTag,
    target_lang: LanguageTag,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl TranslationCacheOptimizer {
    pub fn new(cache: Arc<TranslationCache>, metrics: Arc<MetricsService>, source_lang: LanguageTag, target_lang: LanguageTag) -> Self {
        Self {
            cache,
            metrics,
            source_lang,
            target_lang,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }
}

#[async_trait]
impl Optimizer for TranslationCacheOptimizer {
    fn manifest(&self) -> OptimizerManifest {
        OptimizerManifest::new("translation_cache", "Translation Cache", "Serves recent translations from memory before calling the engine")
    }

    async fn process(&self, ctx: &mut OptimizerContext) -> Result<(), TranslatorError> {
        for block in &ctx.text_blocks {
            if let Some(cached) = self.cache.get(&block.text, &self.source_lang, &self.target_lang) {
                self.hits.fetch_add(1, Ordering::Relaxed);
                self.metrics.record_cache_hit();
                if let Ok(translation) = screentl_domain::entities::Translation::new(
                    block.text.clone(),
                    cached.translated_text,
                    self.source_lang.clone(),
                    self.target_lang.clone(),
                    cached.confidence,
                    block.bounds,
                ) {
                    ctx.translations.push(translation);
                }
            } else {
                self.misses.fetch_add(1, Ordering::Relaxed);
                self.metrics.record_cache_miss();
            }
        }
        Ok(())
    }

    fn get_stats(&self) -> serde_json::Value {
        json!({
            "cache_hits": self.hits.load(Ordering::Relaxed),
            "cache_misses": self.misses.load(Ordering::Relaxed),
        })
    }
}
