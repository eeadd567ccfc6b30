// screentl
// SPDX-License-Identifier: BSD-3-Clause

//! Coalesces adjacent OCR blocks into one before translation, so "Hello" and
//! "world" on the same line aren't sent to the translation engine (and
//! rendered) as two disconnected fragments.

use async_trait::async_trait;
use screentl_domain::entities::TextBlock;
use screentl_domain::error::TranslatorError;
use screentl_domain::value_objects::Rectangle;
use serde_json::json;
use std::sync::atomic::{AtomicU64, Ordering};

use super::optimizer::{Optimizer, OptimizerContext, OptimizerManifest};

pub struct TextBlockMergerOptimizer {
    /// Max vertical gap (pixels) between two blocks' bounds to consider them
    /// the same line.
    max_line_gap: i32,
    /// Max horizontal gap (pixels) between two same-line blocks to merge.
    max_horizontal_gap: i32,
    merges: AtomicU64,
}

impl TextBlockMergerOptimizer {
    pub fn new(max_line_gap: i32, max_horizontal_gap: i32) -> Self {
        Self { max_line_gap, max_horizontal_gap, merges: AtomicU64::new(0) }
    }

    fn same_line(&self, a: &Rectangle, b: &Rectangle) -> bool {
        (a.y - b.y).abs() <= self.max_line_gap
    }

    fn horizontally_adjacent(&self, a: &Rectangle, b: &Rectangle) -> bool {
        let gap = if a.right() <= b.x { b.x - a.right() } else { a.x - b.right() };
        gap <= self.max_horizontal_gap
    }

    fn union(a: &Rectangle, b: &Rectangle) -> Rectangle {
        let x = a.x.min(b.x);
        let y = a.y.min(b.y);
        let right = a.right().max(b.right());
        let bottom = a.bottom().max(b.bottom());
        Rectangle::new(x, y, (right - x) as u32, (bottom - y) as u32).expect("union of valid rectangles is valid")
    }
}

impl Default for TextBlockMergerOptimizer {
    fn default() -> Self {
        Self::new(8, 20)
    }
}

#[async_trait]
impl Optimizer for TextBlockMergerOptimizer {
    fn manifest(&self) -> OptimizerManifest {
        OptimizerManifest::new("text_block_merger", "Text Block Merger", "Coalesces adjacent OCR blocks on the same line before translation")
    }

    async fn process(&self, ctx: &mut OptimizerContext) -> Result<(), TranslatorError> {
        if ctx.text_blocks.len() < 2 {
            return Ok(());
        }
        let mut blocks = std::mem::take(&mut ctx.text_blocks);
        blocks.sort_by_key(|b| (b.bounds.y, b.bounds.x));

        let mut merged: Vec<TextBlock> = Vec::with_capacity(blocks.len());
        for block in blocks {
            match merged.last_mut() {
                Some(last) if self.same_line(&last.bounds, &block.bounds) && self.horizontally_adjacent(&last.bounds, &block.bounds) => {
                    let text = format!("{} {}", last.text, block.text);
                    let bounds = Self::union(&last.bounds, &block.bounds);
                    let confidence = if last.confidence.value() < block.confidence.value() { last.confidence } else { block.confidence };
                    *last = TextBlock::new(text, bounds, confidence).expect("merged text is non-empty");
                    self.merges.fetch_add(1, Ordering::Relaxed);
                }
                _ => merged.push(block),
            }
        }
        ctx.text_blocks = merged;
        Ok(())
    }

    fn get_stats(&self) -> serde_json::Value {
        json!({ "blocks_merged": self.merges.load(Ordering::Relaxed) })
    }
}
