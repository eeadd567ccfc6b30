// screentl
// SPDX-License-Identifier: BSD-3-Clause

//! Language identifiers used across OCR, translation, and the persistent
//! dictionary.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TranslatorError;

/// A lowercase ISO-639-1-ish language code, e.g. `"en"`, `"de"`, `"ja"`.
///
/// This type only validates shape (2-8 lowercase ascii letters, optionally
/// with a single hyphenated region subtag like `"zh-cn"`); mapping between an
/// OCR engine's language codes and a translation engine's language codes is
/// an infrastructure concern, not this type's job.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LanguageTag(String);

impl LanguageTag {
    pub fn new(code: impl Into<String>) -> Result<Self, TranslatorError> {
        let code = code.into().to_lowercase();
        let valid = code
            .split('-')
            .all(|part| !part.is_empty() && part.len() <= 8 && part.chars().all(|c| c.is_ascii_alphabetic()));
        if code.is_empty() || !valid {
            return Err(TranslatorError::unknown_language(code));
        }
        Ok(Self(code))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LanguageTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
