// screentl
// SPDX-License-Identifier: BSD-3-Clause

//! In-memory LRU cache of recent translations, keyed by source text and
//! language pair, sitting in front of the translation engine and the
//! persistent dictionary.

use std::num::NonZeroUsize;

use lru::LruCache;
use parking_lot::Mutex;
use screentl_domain::value_objects::{Confidence, LanguageTag};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    text: String,
    source_lang: String,
    target_lang: String,
}

#[derive(Debug, Clone)]
pub struct CachedTranslation {
    pub translated_text: String,
    pub confidence: Confidence,
}

pub struct TranslationCache {
    inner: Mutex<LruCache<CacheKey, CachedTranslation>>,
}

const DEFAULT_CAPACITY: usize = 10_000;

impl Default for TranslationCache {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl TranslationCache {
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::new(1).unwrap());
        Self {
            inner: Mutex::new(LruCache::new(capacity)),
        }
    }

    pub fn get(&self, text: &str, source_lang: &LanguageTag, target_lang: &LanguageTag) -> Option<CachedTranslation> {
        let key = CacheKey {
            text: text.to_string(),
            source_lang: source_lang.as_str().to_string(),
            target_lang: target_lang.as_str().to_string(),
        };
        self.inner.lock().get(&key).cloned()
    }

    pub fn put(&self, text: &str, source_lang: &LanguageTag, target_lang: &LanguageTag, translation: CachedTranslation) {
        let key = CacheKey {
            text: text.to_string(),
            source_lang: source_lang.as_str().to_string(),
            target_lang: target_lang.as_str().to_string(),
        };
        self.inner.lock().put(key, translation);
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.inner.lock().clear();
    }
}
