// screentl
// SPDX-License-Identifier: BSD-3-Clause

//! Translation caching, the persisted learned dictionary, and the quality
//! filter that gates what gets written to it.

pub mod dictionary_file_repository;
pub mod identity_engine;
pub mod quality_filter;
pub mod translation_cache;

pub use dictionary_file_repository::DictionaryFileRepository;
pub use identity_engine::IdentityTranslationEngine;
pub use quality_filter::{QualityFilter, QualityFilterConfig};
pub use translation_cache::{CachedTranslation, TranslationCache};
