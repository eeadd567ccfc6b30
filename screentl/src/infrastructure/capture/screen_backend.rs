// screentl
// SPDX-License-Identifier: BSD-3-Clause

//! Default [`CaptureBackend`] adapter, backed by the `screenshots` crate's
//! per-OS display capture (Windows GDI, macOS CoreGraphics, X11/Wayland on
//! Linux). Masked rectangles are cropped out of the RGBA buffer in software
//! after capture, since none of those backends expose an API to exclude
//! arbitrary sub-rectangles from the grab itself.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use screenshots::Screen;

use screentl_domain::entities::Frame;
use screentl_domain::error::TranslatorError;
use screentl_domain::services::CaptureBackend;
use screentl_domain::value_objects::{CaptureRegion, Rectangle};

/// Captures a region by grabbing the whole screen it falls on and cropping
/// to the region's bounds. One sequence counter per backend instance, shared
/// across whichever regions a `RegionCoordinator` drives through it.
pub struct ScreenCaptureBackend {
    sequence: AtomicU64,
    masked: Mutex<Vec<Rectangle>>,
}

impl ScreenCaptureBackend {
    pub fn new() -> Self {
        Self {
            sequence: AtomicU64::new(0),
            masked: Mutex::new(Vec::new()),
        }
    }

    fn screen_for(bounds: &Rectangle) -> Result<Screen, TranslatorError> {
        Screen::from_point(bounds.x, bounds.y)
            .map_err(|e| TranslatorError::capture(format!("no display contains point ({}, {}): {e}", bounds.x, bounds.y)))
    }

    /// Blanks out masked rectangles (screen-absolute) that fall within the
    /// captured region, so overlay windows never get fed back into OCR.
    fn apply_mask(region: &CaptureRegion, mut pixels: Vec<u8>, masked: &[Rectangle]) -> Vec<u8> {
        let bounds = &region.bounds;
        for rect in masked {
            let Some(clip) = intersect(bounds, rect) else { continue };
            for row in clip.y..(clip.y + clip.height as i32) {
                let local_row = (row - bounds.y) as usize;
                if local_row >= bounds.height as usize {
                    continue;
                }
                let row_start = local_row * bounds.width as usize * 4;
                let clip_start = row_start + ((clip.x - bounds.x).max(0) as usize) * 4;
                let clip_end = clip_start + clip.width as usize * 4;
                if clip_end <= pixels.len() {
                    pixels[clip_start..clip_end].fill(0);
                }
            }
        }
        pixels
    }
}

fn intersect(a: &Rectangle, b: &Rectangle) -> Option<Rectangle> {
    let x1 = a.x.max(b.x);
    let y1 = a.y.max(b.y);
    let x2 = (a.x + a.width as i32).min(b.x + b.width as i32);
    let y2 = (a.y + a.height as i32).min(b.y + b.height as i32);
    if x2 <= x1 || y2 <= y1 {
        return None;
    }
    Some(Rectangle {
        x: x1,
        y: y1,
        width: (x2 - x1) as u32,
        height: (y2 - y1) as u32,
    })
}

impl Default for ScreenCaptureBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CaptureBackend for ScreenCaptureBackend {
    async fn capture(&self, region: &CaptureRegion) -> Result<Frame, TranslatorError> {
        let bounds = region.bounds;
        let screen = Self::screen_for(&bounds)?;
        let image = screen
            .capture_area(bounds.x, bounds.y, bounds.width, bounds.height)
            .map_err(|e| TranslatorError::capture(format!("capture_area failed for region '{}': {e}", region.id)))?;

        let masked = self.masked.lock().expect("masked rectangles mutex poisoned").clone();
        let pixels = Self::apply_mask(region, image.rgba().to_vec(), &masked);

        let sequence = self.sequence.fetch_add(1, Ordering::Relaxed);
        Frame::new(region.id.clone(), sequence, image.width(), image.height(), pixels)
    }

    async fn set_masked_rectangles(&self, rectangles: Vec<Rectangle>) -> Result<(), TranslatorError> {
        *self.masked.lock().expect("masked rectangles mutex poisoned") = rectangles;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intersect_overlapping_rectangles() {
        let a = Rectangle::new(0, 0, 100, 100).unwrap();
        let b = Rectangle::new(50, 50, 100, 100).unwrap();
        let overlap = intersect(&a, &b).unwrap();
        assert_eq!((overlap.x, overlap.y, overlap.width, overlap.height), (50, 50, 50, 50));
    }

    #[test]
    fn intersect_disjoint_rectangles_is_none() {
        let a = Rectangle::new(0, 0, 10, 10).unwrap();
        let b = Rectangle::new(100, 100, 10, 10).unwrap();
        assert!(intersect(&a, &b).is_none());
    }

    #[tokio::test]
    async fn set_masked_rectangles_replaces_previous_set() {
        let backend = ScreenCaptureBackend::new();
        let rect = Rectangle::new(0, 0, 10, 10).unwrap();
        backend.set_masked_rectangles(vec![rect.clone()]).await.unwrap();
        assert_eq!(backend.masked.lock().unwrap().len(), 1);
        backend.set_masked_rectangles(vec![]).await.unwrap();
        assert!(backend.masked.lock().unwrap().is_empty());
    }
}
