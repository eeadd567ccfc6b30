// screentl
// SPDX-License-Identifier: BSD-3-Clause

//! Persisted bilingual dictionary entry.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::{Confidence, LanguageTag};

/// One learned `(source_text -> translated_text)` mapping within a single
/// language pair's dictionary file. Uniqueness key:
/// `(normalized_source_text, source_lang, target_lang)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DictionaryEntry {
    pub source_text: String,
    pub translated_text: String,
    pub source_lang: LanguageTag,
    pub target_lang: LanguageTag,
    pub usage_count: u64,
    pub confidence: Confidence,
    pub last_used_at: DateTime<Utc>,
    pub engine: String,
}

impl DictionaryEntry {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        source_text: impl Into<String>,
        translated_text: impl Into<String>,
        source_lang: LanguageTag,
        target_lang: LanguageTag,
        confidence: Confidence,
        engine: impl Into<String>,
    ) -> Self {
        Self {
            source_text: source_text.into(),
            translated_text: translated_text.into(),
            source_lang,
            target_lang,
            usage_count: 1,
            confidence,
            last_used_at: Utc::now(),
            engine: engine.into(),
        }
    }

    /// Records a cache/dictionary hit: bumps the usage counter, refreshes
    /// recency, and retains the better of the two observed confidences
    /// rather than overwriting it with whatever this observation happened
    /// to produce.
    pub fn record_hit(&mut self, observed_confidence: Confidence) {
        self.usage_count += 1;
        self.last_used_at = Utc::now();
        if observed_confidence.value() > self.confidence.value() {
            self.confidence = observed_confidence;
        }
    }

    /// The key entries are looked up and deduplicated by: the lowercased,
    /// trimmed source text. Matches the quality filter's notion of identity.
    pub fn key(&self) -> String {
        self.source_text.trim().to_lowercase()
    }
}
