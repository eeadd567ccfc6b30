// screentl
// SPDX-License-Identifier: BSD-3-Clause

//! A byte-identical frame must be skipped before OCR runs at all, and a
//! skipped frame must leave previously tracked overlays untouched rather
//! than re-rendering or clearing them.

mod support;

use screentl_domain::entities::Frame;
use screentl_domain::value_objects::Rectangle;
use support::{build_harness, text_block, HarnessConfig, OcrOutcome};

#[tokio::test]
async fn identical_frame_is_skipped_and_retains_overlay() {
    let harness = build_harness(
        [0u8; 4],
        [OcrOutcome::Blocks(vec![text_block("hello", Rectangle::new(10, 10, 50, 20).unwrap(), 0.95)])],
        vec![],
        HarnessConfig { enable_frame_skip: true, ..Default::default() },
        "frame-skip",
    );

    let frame = Frame::new("main", 0, 2, 2, vec![7u8; 16]).unwrap();
    harness.orchestrator.process_frame("main", frame).await.unwrap();
    assert_eq!(harness.ocr.call_count(), 1);
    assert_eq!(harness.renderer.events().len(), 1);

    // Byte-identical second frame (similarity 1.0): the frame skip
    // optimizer must short-circuit before OCR runs, and the already
    // rendered overlay must be neither re-rendered nor removed.
    let identical = Frame::new("main", 1, 2, 2, vec![7u8; 16]).unwrap();
    harness.orchestrator.process_frame("main", identical).await.unwrap();
    assert_eq!(harness.ocr.call_count(), 1, "a skipped frame must never reach OCR");
    assert_eq!(harness.renderer.events().len(), 1, "a skipped frame must not touch overlay rendering at all");

    std::fs::remove_dir_all(&harness.dict_dir).ok();
}

#[tokio::test]
async fn changed_frame_after_skip_resumes_normal_processing() {
    let harness = build_harness(
        [0u8; 4],
        [
            OcrOutcome::Blocks(vec![text_block("hello", Rectangle::new(10, 10, 50, 20).unwrap(), 0.95)]),
            OcrOutcome::Blocks(vec![text_block("world", Rectangle::new(10, 40, 50, 20).unwrap(), 0.95)]),
        ],
        vec![],
        HarnessConfig { enable_frame_skip: true, ..Default::default() },
        "frame-skip-resume",
    );

    harness.orchestrator.process_frame("main", Frame::new("main", 0, 2, 2, vec![7u8; 16]).unwrap()).await.unwrap();
    harness.orchestrator.process_frame("main", Frame::new("main", 1, 2, 2, vec![7u8; 16]).unwrap()).await.unwrap();
    assert_eq!(harness.ocr.call_count(), 1, "repeated identical frame must still be skipped");

    harness.orchestrator.process_frame("main", Frame::new("main", 2, 2, 2, vec![9u8; 16]).unwrap()).await.unwrap();
    assert_eq!(harness.ocr.call_count(), 2, "a changed frame must resume OCR");

    std::fs::remove_dir_all(&harness.dict_dir).ok();
}
