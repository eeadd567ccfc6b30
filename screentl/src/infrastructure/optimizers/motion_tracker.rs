// screentl
// SPDX-License-Identifier: BSD-3-Clause

//! Skips OCR on regions of interest that have barely changed since the last
//! frame, rather than requiring byte-for-byte identity like frame skip.

use async_trait::async_trait;
use parking_lot::Mutex;
use screentl_domain::error::TranslatorError;
use serde_json::json;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use super::optimizer::{Optimizer, OptimizerContext, OptimizerManifest};

pub struct MotionTrackerOptimizer {
    last_pixels: Mutex<HashMap<String, Vec<u8>>>,
    /// Fraction of sampled bytes that must differ for a region to count as
    /// "moving".
    motion_threshold: f64,
    skipped: AtomicU64,
}

impl MotionTrackerOptimizer {
    pub fn new(motion_threshold: f64) -> Self {
        Self {
            last_pixels: Mutex::new(HashMap::new()),
            motion_threshold,
            skipped: AtomicU64::new(0),
        }
    }

    /// Samples every 16th byte rather than diffing the whole buffer, which
    /// is enough to detect motion without the cost of a full comparison.
    fn changed_fraction(previous: &[u8], current: &[u8]) -> f64 {
        if previous.len() != current.len() || previous.is_empty() {
            return 1.0;
        }
        let mut sampled = 0usize;
        let mut changed = 0usize;
        for i in (0..previous.len()).step_by(16) {
            sampled += 1;
            if previous[i] != current[i] {
                changed += 1;
            }
        }
        if sampled == 0 {
            0.0
        } else {
            changed as f64 / sampled as f64
        }
    }
}

impl Default for MotionTrackerOptimizer {
    fn default() -> Self {
        Self::new(0.01)
    }
}

#[async_trait]
impl Optimizer for MotionTrackerOptimizer {
    fn manifest(&self) -> OptimizerManifest {
        OptimizerManifest::new("motion_tracker", "Motion Tracker", "Skips OCR on regions with negligible pixel motion")
    }

    async fn process(&self, ctx: &mut OptimizerContext) -> Result<(), TranslatorError> {
        // See `FrameSkipOptimizer::process` for why this takes `ctx.frame`
        // rather than borrowing it: the chain runs twice per frame, and the
        // second pass must not re-judge the same pixels as "unchanged".
        let Some(frame) = ctx.frame.take() else { return Ok(()) };
        let mut last_pixels = self.last_pixels.lock();
        let fraction = last_pixels
            .get(&frame.region_id)
            .map(|previous| Self::changed_fraction(previous, &frame.pixels))
            .unwrap_or(1.0);
        last_pixels.insert(frame.region_id.clone(), frame.pixels.clone());

        if fraction < self.motion_threshold {
            self.skipped.fetch_add(1, Ordering::Relaxed);
            ctx.skip_remaining = true;
        }
        Ok(())
    }

    fn get_stats(&self) -> serde_json::Value {
        json!({ "ocr_passes_skipped": self.skipped.load(Ordering::Relaxed) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use screentl_domain::entities::Frame;

    fn frame(region: &str, pixels: Vec<u8>) -> Frame {
        let side = ((pixels.len() / 4) as f64).sqrt() as u32;
        Frame::new(region, 0, side.max(1), side.max(1), pixels).unwrap()
    }

    #[tokio::test]
    async fn near_static_region_is_skipped() {
        let optimizer = MotionTrackerOptimizer::new(0.5);
        let pixels = vec![0u8; 64];
        let mut ctx = OptimizerContext { frame: Some(frame("r", pixels.clone())), ..Default::default() };
        optimizer.process(&mut ctx).await.unwrap();

        let mut ctx2 = OptimizerContext { frame: Some(frame("r", pixels)), ..Default::default() };
        optimizer.process(&mut ctx2).await.unwrap();
        assert!(ctx2.skip_remaining);
    }

    #[tokio::test]
    async fn fully_changed_region_is_not_skipped() {
        let optimizer = MotionTrackerOptimizer::new(0.5);
        let mut ctx = OptimizerContext { frame: Some(frame("r", vec![0u8; 64])), ..Default::default() };
        optimizer.process(&mut ctx).await.unwrap();

        let mut ctx2 = OptimizerContext { frame: Some(frame("r", vec![255u8; 64])), ..Default::default() };
        optimizer.process(&mut ctx2).await.unwrap();
        assert!(!ctx2.skip_remaining);
    }
}
