// screentl
// SPDX-License-Identifier: BSD-3-Clause

//! Once an overlay is rendered, the next capture of its region must carry
//! zeroed pixels everywhere that overlay occupies, so the engine's own
//! rendered text never gets fed back into OCR as if it were new screen
//! content.

mod support;

use screentl_domain::entities::Frame;
use screentl_domain::services::CaptureBackend;
use screentl_domain::value_objects::Rectangle;
use support::{build_harness, region, text_block, HarnessConfig, OcrOutcome};

fn pixel_at(pixels: &[u8], width: u32, x: u32, y: u32) -> &[u8] {
    let start = ((y * width + x) * 4) as usize;
    &pixels[start..start + 4]
}

#[tokio::test]
async fn next_captured_frame_masks_the_active_overlays_rectangle() {
    const FILL: u8 = 9;
    let harness = build_harness(
        [FILL; 16],
        [OcrOutcome::Blocks(vec![text_block("hello", Rectangle::new(0, 0, 2, 2).unwrap(), 0.95)])],
        vec![],
        HarnessConfig::default(),
        "overlay-masking",
    );

    harness.orchestrator.process_frame("main", Frame::new("main", 0, 4, 4, vec![FILL; 4 * 4 * 4]).unwrap()).await.unwrap();
    assert_eq!(harness.backend.masked_rectangles(), vec![Rectangle::new(0, 0, 2, 2).unwrap()]);

    let next = harness.backend.capture(&region("main", 0, 0, 4, 4)).await.unwrap();

    for y in 0..2u32 {
        for x in 0..2u32 {
            assert_eq!(pixel_at(&next.pixels, 4, x, y), [0, 0, 0, 0], "overlay rectangle must be zeroed in the next captured frame");
        }
    }
    for y in 2..4u32 {
        for x in 2..4u32 {
            assert_eq!(pixel_at(&next.pixels, 4, x, y), [FILL; 4], "pixels outside the overlay rectangle must be untouched");
        }
    }

    std::fs::remove_dir_all(&harness.dict_dir).ok();
}

#[tokio::test]
async fn masking_clears_once_the_overlay_is_removed() {
    const FILL: u8 = 9;
    let harness = build_harness(
        [FILL; 16],
        [
            OcrOutcome::Blocks(vec![text_block("hello", Rectangle::new(0, 0, 2, 2).unwrap(), 0.95)]),
            OcrOutcome::Blocks(vec![]),
        ],
        vec![],
        HarnessConfig::default(),
        "overlay-masking-clears",
    );

    harness.orchestrator.process_frame("main", Frame::new("main", 0, 4, 4, vec![FILL; 4 * 4 * 4]).unwrap()).await.unwrap();
    assert!(!harness.backend.masked_rectangles().is_empty());

    tokio::time::sleep(std::time::Duration::from_millis(250)).await;
    harness.orchestrator.process_frame("main", Frame::new("main", 1, 4, 4, vec![FILL; 4 * 4 * 4]).unwrap()).await.unwrap();
    assert!(harness.backend.masked_rectangles().is_empty(), "a disappeared overlay must stop being masked");

    let next = harness.backend.capture(&region("main", 0, 0, 4, 4)).await.unwrap();
    for y in 0..2u32 {
        for x in 0..2u32 {
            assert_eq!(pixel_at(&next.pixels, 4, x, y), [FILL; 4], "once unmasked, the previously-overlaid area reads real pixels again");
        }
    }

    std::fs::remove_dir_all(&harness.dict_dir).ok();
}
