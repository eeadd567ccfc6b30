// screentl
// SPDX-License-Identifier: BSD-3-Clause

//! File-backed `DictionaryRepository`: one gzip-compressed, schema-versioned
//! JSON file per language pair, named `learned_dictionary_{src}_{tgt}.json.gz`,
//! in the bit-exact on-disk format external tooling already depends on.
//! Reads and writes run on the blocking task pool since gzip/JSON coding is
//! CPU-bound and file I/O would otherwise stall the async runtime.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use screentl_domain::entities::DictionaryEntry;
use screentl_domain::error::TranslatorError;
use screentl_domain::repositories::DictionaryRepository;
use screentl_domain::value_objects::{Confidence, LanguageTag};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

const SCHEMA_VERSION: &str = "1.0";

/// One entry of the `translations` map, named and shaped exactly as the
/// persisted format dictates rather than after the domain entity's own
/// field names.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct WireEntry {
    original: String,
    translation: String,
    usage_count: u64,
    confidence: Confidence,
    last_used: DateTime<Utc>,
    engine: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct DictionaryFile {
    version: String,
    last_updated: DateTime<Utc>,
    total_entries: usize,
    compressed: bool,
    source_language: String,
    target_language: String,
    #[serde(default)]
    translations: HashMap<String, WireEntry>,
    /// Top-level fields this workspace doesn't know about, carried through
    /// unchanged on every subsequent save.
    #[serde(flatten)]
    unknown_fields: Map<String, Value>,
}

pub struct DictionaryFileRepository {
    base_dir: PathBuf,
}

impl DictionaryFileRepository {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self { base_dir: base_dir.into() }
    }

    fn path_for(&self, source_lang: &LanguageTag, target_lang: &LanguageTag) -> PathBuf {
        self.base_dir.join(format!("learned_dictionary_{}_{}.json.gz", source_lang.as_str(), target_lang.as_str()))
    }

    fn read_file(path: &Path) -> Result<Option<DictionaryFile>, TranslatorError> {
        if !path.exists() {
            return Ok(None);
        }
        let file = std::fs::File::open(path)?;
        let mut decoder = GzDecoder::new(file);
        let mut contents = String::new();
        decoder.read_to_string(&mut contents)?;
        Ok(Some(serde_json::from_str(&contents)?))
    }

    fn read_sync(path: &Path, source_lang: &LanguageTag, target_lang: &LanguageTag) -> Result<Vec<DictionaryEntry>, TranslatorError> {
        let Some(parsed) = Self::read_file(path)? else {
            return Ok(Vec::new());
        };
        let entries = parsed
            .translations
            .into_values()
            .map(|wire| DictionaryEntry {
                source_text: wire.original,
                translated_text: wire.translation,
                source_lang: source_lang.clone(),
                target_lang: target_lang.clone(),
                usage_count: wire.usage_count,
                confidence: wire.confidence,
                last_used_at: wire.last_used,
                engine: wire.engine,
            })
            .collect();
        Ok(entries)
    }

    fn write_sync(path: &Path, source_lang: &LanguageTag, target_lang: &LanguageTag, entries: &[DictionaryEntry]) -> Result<(), TranslatorError> {
        let unknown_fields = Self::read_file(path)?.map(|existing| existing.unknown_fields).unwrap_or_default();

        let translations: HashMap<String, WireEntry> = entries
            .iter()
            .map(|entry| {
                (
                    entry.key(),
                    WireEntry {
                        original: entry.source_text.clone(),
                        translation: entry.translated_text.clone(),
                        usage_count: entry.usage_count,
                        confidence: entry.confidence,
                        last_used: entry.last_used_at,
                        engine: entry.engine.clone(),
                    },
                )
            })
            .collect();

        let payload = DictionaryFile {
            version: SCHEMA_VERSION.to_string(),
            last_updated: Utc::now(),
            total_entries: translations.len(),
            compressed: true,
            source_language: source_lang.as_str().to_string(),
            target_language: target_lang.as_str().to_string(),
            translations,
            unknown_fields,
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string(&payload)?;
        let file = std::fs::File::create(path)?;
        let mut encoder = GzEncoder::new(file, Compression::default());
        encoder.write_all(json.as_bytes())?;
        encoder.finish()?;
        Ok(())
    }
}

#[async_trait]
impl DictionaryRepository for DictionaryFileRepository {
    async fn load(&self, source_lang: &LanguageTag, target_lang: &LanguageTag) -> Result<Vec<DictionaryEntry>, TranslatorError> {
        let path = self.path_for(source_lang, target_lang);
        let source_lang = source_lang.clone();
        let target_lang = target_lang.clone();
        tokio::task::spawn_blocking(move || Self::read_sync(&path, &source_lang, &target_lang))
            .await
            .map_err(|e| TranslatorError::internal(format!("dictionary load task panicked: {e}")))?
    }

    async fn save(&self, source_lang: &LanguageTag, target_lang: &LanguageTag, entries: &[DictionaryEntry]) -> Result<(), TranslatorError> {
        let path = self.path_for(source_lang, target_lang);
        let source_lang = source_lang.clone();
        let target_lang = target_lang.clone();
        let entries = entries.to_vec();
        tokio::task::spawn_blocking(move || Self::write_sync(&path, &source_lang, &target_lang, &entries))
            .await
            .map_err(|e| TranslatorError::internal(format!("dictionary save task panicked: {e}")))?
    }
}
