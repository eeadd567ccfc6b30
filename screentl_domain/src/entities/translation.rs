// screentl
// SPDX-License-Identifier: BSD-3-Clause

//! Translation result entity.

use crate::error::TranslatorError;
use crate::value_objects::{Confidence, LanguageTag, Rectangle};

/// A translated text block, still carrying its source text and bounding box
/// so the overlay tracker can key continuity off either.
#[derive(Debug, Clone)]
pub struct Translation {
    pub source_text: String,
    pub translated_text: String,
    pub source_lang: LanguageTag,
    pub target_lang: LanguageTag,
    pub confidence: Confidence,
    /// Position of the overlay, in whatever coordinate frame the caller put
    /// it in (region-local until the positioning adapter translates it to
    /// screen-absolute).
    pub position: Rectangle,
}

impl Translation {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        source_text: impl Into<String>,
        translated_text: impl Into<String>,
        source_lang: LanguageTag,
        target_lang: LanguageTag,
        confidence: Confidence,
        position: Rectangle,
    ) -> Result<Self, TranslatorError> {
        let source_text = source_text.into();
        let translated_text = translated_text.into();
        if translated_text.trim().is_empty() {
            return Err(TranslatorError::translation("translated text must not be empty"));
        }
        Ok(Self {
            source_text,
            translated_text,
            source_lang,
            target_lang,
            confidence,
            position,
        })
    }

    /// Returns a copy of this translation with `position` offset by a
    /// region's screen origin, converting region-local to screen-absolute
    /// coordinates.
    pub fn translated_to_screen(&self, region_offset_x: i32, region_offset_y: i32) -> Self {
        Self {
            position: self.position.translated(region_offset_x, region_offset_y),
            ..self.clone()
        }
    }
}
