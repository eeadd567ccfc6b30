// screentl
// SPDX-License-Identifier: BSD-3-Clause

//! Applies a small set of conservative, configurable corrections to OCR
//! output before validation: collapsing repeated whitespace and replacing
//! known OCR misreads via an explicit substitution table. Deliberately
//! avoids aggressive "autocorrect" that could change the meaning of text.

use async_trait::async_trait;
use screentl_domain::entities::TextBlock;
use screentl_domain::error::TranslatorError;
use serde_json::json;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use super::optimizer::{Optimizer, OptimizerContext, OptimizerManifest};

pub struct SpellCorrectorOptimizer {
    substitutions: HashMap<String, String>,
    corrections: AtomicU64,
}

impl SpellCorrectorOptimizer {
    pub fn new(substitutions: HashMap<String, String>) -> Self {
        Self { substitutions, corrections: AtomicU64::new(0) }
    }

    fn correct(&self, text: &str) -> String {
        let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
        collapsed
            .split(' ')
            .map(|word| self.substitutions.get(word).cloned().unwrap_or_else(|| word.to_string()))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Default for SpellCorrectorOptimizer {
    fn default() -> Self {
        Self::new(HashMap::new())
    }
}

#[async_trait]
impl Optimizer for SpellCorrectorOptimizer {
    fn manifest(&self) -> OptimizerManifest {
        OptimizerManifest::new("spell_corrector", "Spell Corrector", "Normalizes whitespace and known OCR misreads before validation")
    }

    async fn process(&self, ctx: &mut OptimizerContext) -> Result<(), TranslatorError> {
        let blocks = std::mem::take(&mut ctx.text_blocks);
        let mut corrected = Vec::with_capacity(blocks.len());
        for block in blocks {
            let fixed_text = self.correct(&block.text);
            if fixed_text != block.text {
                self.corrections.fetch_add(1, Ordering::Relaxed);
            }
            corrected.push(TextBlock::new(fixed_text, block.bounds, block.confidence)?);
        }
        ctx.text_blocks = corrected;
        Ok(())
    }

    fn get_stats(&self) -> serde_json::Value {
        json!({ "corrections_applied": self.corrections.load(Ordering::Relaxed) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use screentl_domain::value_objects::{Confidence, Rectangle};

    fn block(text: &str) -> TextBlock {
        TextBlock::new(text, Rectangle::new(0, 0, 10, 10).unwrap(), Confidence::FULL).unwrap()
    }

    #[tokio::test]
    async fn collapses_repeated_whitespace() {
        let optimizer = SpellCorrectorOptimizer::default();
        let mut ctx = OptimizerContext { text_blocks: vec![block("hello   world")], ..Default::default() };
        optimizer.process(&mut ctx).await.unwrap();
        assert_eq!(ctx.text_blocks[0].text, "hello world");
    }

    #[tokio::test]
    async fn applies_known_substitutions() {
        let mut subs = HashMap::new();
        subs.insert("teh".to_string(), "the".to_string());
        let optimizer = SpellCorrectorOptimizer::new(subs);
        let mut ctx = OptimizerContext { text_blocks: vec![block("teh cat")], ..Default::default() };
        optimizer.process(&mut ctx).await.unwrap();
        assert_eq!(ctx.text_blocks[0].text, "the cat");
    }
}
