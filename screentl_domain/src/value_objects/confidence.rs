// screentl
// SPDX-License-Identifier: BSD-3-Clause

//! Confidence score shared by OCR blocks and translations.

use serde::{Deserialize, Serialize};

use crate::error::TranslatorError;

/// A confidence score in the closed interval `[0.0, 1.0]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Confidence(f32);

impl Confidence {
    pub fn new(value: f32) -> Result<Self, TranslatorError> {
        if !(0.0..=1.0).contains(&value) {
            return Err(TranslatorError::invalid_config(format!(
                "confidence must be within [0.0, 1.0], got {value}"
            )));
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> f32 {
        self.0
    }

    pub const ZERO: Confidence = Confidence(0.0);
    pub const FULL: Confidence = Confidence(1.0);
}
