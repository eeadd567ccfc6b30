// screentl
// SPDX-License-Identifier: BSD-3-Clause

//! Persistent dictionary repository port.

use async_trait::async_trait;

use crate::entities::DictionaryEntry;
use crate::error::TranslatorError;
use crate::value_objects::LanguageTag;

/// Loads and saves the learned bilingual dictionary for one language pair.
///
/// A concrete adapter owns the on-disk gzip+JSON format and file naming
/// (`learned_dictionary_{src}_{tgt}.json.gz`); this port only talks in
/// entries.
#[async_trait]
pub trait DictionaryRepository: Send + Sync {
    async fn load(&self, source_lang: &LanguageTag, target_lang: &LanguageTag) -> Result<Vec<DictionaryEntry>, TranslatorError>;

    async fn save(
        &self,
        source_lang: &LanguageTag,
        target_lang: &LanguageTag,
        entries: &[DictionaryEntry],
    ) -> Result<(), TranslatorError>;
}
