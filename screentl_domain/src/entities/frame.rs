// screentl
// SPDX-License-Identifier: BSD-3-Clause

//! Captured frame entity.

use chrono::{DateTime, Utc};

use crate::error::TranslatorError;

/// A single captured image from one capture region.
///
/// `pixels` holds raw RGBA8 bytes; the pixel format and layout are owned by
/// the capture backend adapter, this entity only carries enough to hand the
/// buffer downstream and validate it isn't empty.
#[derive(Debug, Clone)]
pub struct Frame {
    pub region_id: String,
    pub sequence: u64,
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
    pub captured_at: DateTime<Utc>,
}

impl Frame {
    pub fn new(
        region_id: impl Into<String>,
        sequence: u64,
        width: u32,
        height: u32,
        pixels: Vec<u8>,
    ) -> Result<Self, TranslatorError> {
        if width == 0 || height == 0 {
            return Err(TranslatorError::capture("frame has zero width or height"));
        }
        let expected_len = width as usize * height as usize * 4;
        if pixels.len() != expected_len {
            return Err(TranslatorError::capture(format!(
                "frame buffer length {} does not match {}x{} RGBA8 ({} expected)",
                pixels.len(),
                width,
                height,
                expected_len
            )));
        }
        Ok(Self {
            region_id: region_id.into(),
            sequence,
            width,
            height,
            pixels,
            captured_at: Utc::now(),
        })
    }
}
