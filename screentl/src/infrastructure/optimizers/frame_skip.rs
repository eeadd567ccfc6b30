// screentl
// SPDX-License-Identifier: BSD-3-Clause

//! Skips the rest of the pipeline when a region's captured frame is
//! byte-identical to the last one processed, avoiding wasted OCR/translation
//! work on a static screen.

use async_trait::async_trait;
use parking_lot::Mutex;
use screentl_domain::error::TranslatorError;
use serde_json::json;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use super::optimizer::{Optimizer, OptimizerContext, OptimizerManifest};

pub struct FrameSkipOptimizer {
    last_hash: Mutex<HashMap<String, u64>>,
    skipped: AtomicU64,
    processed: AtomicU64,
}

impl Default for FrameSkipOptimizer {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameSkipOptimizer {
    pub fn new() -> Self {
        Self {
            last_hash: Mutex::new(HashMap::new()),
            skipped: AtomicU64::new(0),
            processed: AtomicU64::new(0),
        }
    }

    fn hash_pixels(pixels: &[u8]) -> u64 {
        use std::hash::{Hash, Hasher};
        let mut hasher = std::collections::hash_map::DefaultHasher::new();
        pixels.hash(&mut hasher);
        hasher.finish()
    }
}

#[async_trait]
impl Optimizer for FrameSkipOptimizer {
    fn manifest(&self) -> OptimizerManifest {
        OptimizerManifest::new("frame_skip", "Frame Skip", "Skips OCR/translation when a region's frame hasn't changed")
    }

    async fn process(&self, ctx: &mut OptimizerContext) -> Result<(), TranslatorError> {
        // The orchestrator runs the optimizer chain twice per frame (once
        // before OCR, once after validation); taking `ctx.frame` here makes
        // the second pass a no-op instead of re-comparing the same frame
        // against a hash this same call already just recorded.
        let Some(frame) = ctx.frame.take() else { return Ok(()) };
        let hash = Self::hash_pixels(&frame.pixels);
        let mut last_hash = self.last_hash.lock();
        let unchanged = last_hash.get(&frame.region_id) == Some(&hash);
        last_hash.insert(frame.region_id.clone(), hash);
        if unchanged {
            self.skipped.fetch_add(1, Ordering::Relaxed);
            ctx.skip_remaining = true;
        } else {
            self.processed.fetch_add(1, Ordering::Relaxed);
        }
        Ok(())
    }

    fn get_stats(&self) -> serde_json::Value {
        json!({
            "frames_skipped": self.skipped.load(Ordering::Relaxed),
            "frames_processed": self.processed.load(Ordering::Relaxed),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use screentl_domain::entities::Frame;

    fn frame(region: &str, byte: u8) -> Frame {
        Frame::new(region, 0, 2, 2, vec![byte; 16]).unwrap()
    }

    #[tokio::test]
    async fn identical_frame_sets_skip_remaining() {
        let optimizer = FrameSkipOptimizer::new();
        let mut ctx = OptimizerContext { frame: Some(frame("r", 1)), ..Default::default() };
        optimizer.process(&mut ctx).await.unwrap();
        assert!(!ctx.skip_remaining);

        let mut ctx2 = OptimizerContext { frame: Some(frame("r", 1)), ..Default::default() };
        optimizer.process(&mut ctx2).await.unwrap();
        assert!(ctx2.skip_remaining);
    }

    #[tokio::test]
    async fn changed_frame_does_not_skip() {
        let optimizer = FrameSkipOptimizer::new();
        let mut ctx = OptimizerContext { frame: Some(frame("r", 1)), ..Default::default() };
        optimizer.process(&mut ctx).await.unwrap();

        let mut ctx2 = OptimizerContext { frame: Some(frame("r", 2)), ..Default::default() };
        optimizer.process(&mut ctx2).await.unwrap();
        assert!(!ctx2.skip_remaining);
    }
}
