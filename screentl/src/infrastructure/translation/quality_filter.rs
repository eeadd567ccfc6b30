// screentl
// SPDX-License-Identifier: BSD-3-Clause

//! Gatekeeper deciding whether a translation is good enough to persist to
//! the learned dictionary. Garbage in the dictionary poisons every future
//! lookup for that source text, so this runs before every `save`.

use once_cell::sync::Lazy;
use regex::Regex;

#[derive(Debug, Clone)]
pub struct QualityFilterConfig {
    pub enabled: bool,
    pub min_confidence: f32,
    pub min_length: usize,
    pub max_special_char_ratio: f32,
    pub min_word_count: usize,
    pub min_distinct_chars: usize,
}

impl Default for QualityFilterConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            min_confidence: 0.7,
            min_length: 2,
            max_special_char_ratio: 0.5,
            min_word_count: 1,
            min_distinct_chars: 3,
        }
    }
}

impl QualityFilterConfig {
    /// The `strict` quality profile: a higher confidence floor plus tighter
    /// length and word-count predicates than the `balanced` default.
    pub fn strict() -> Self {
        Self {
            enabled: true,
            min_confidence: 0.85,
            min_length: 4,
            max_special_char_ratio: 0.3,
            min_word_count: 2,
            min_distinct_chars: 3,
        }
    }
}

static BAD_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"^[^a-zA-Z0-9\s]{3,}$").unwrap(),
        Regex::new(r"^[\d\s\-_.]{5,}$").unwrap(),
        Regex::new(r"^[A-Z\s]{10,}$").unwrap(),
        Regex::new(r"(.)\1{4,}").unwrap(),
    ]
});

pub struct QualityFilter {
    config: QualityFilterConfig,
}

impl QualityFilter {
    pub fn new(config: QualityFilterConfig) -> Self {
        Self { config }
    }

    /// Returns `Ok(())` if `translation` should be persisted, or the reason
    /// it was rejected. Always accepts when the filter is disabled.
    pub fn should_save(&self, original: &str, translation: &str, confidence: f32) -> Result<(), String> {
        if !self.config.enabled {
            return Ok(());
        }

        if confidence < self.config.min_confidence {
            return Err(format!("confidence too low ({confidence:.2} < {})", self.config.min_confidence));
        }

        let trimmed = translation.trim();
        if trimmed.is_empty() {
            return Err("translation is empty".into());
        }

        if trimmed.eq_ignore_ascii_case(original.trim()) {
            return Err("translation identical to original".into());
        }

        if trimmed.chars().count() < self.config.min_length {
            return Err(format!("translation too short ({} < {})", trimmed.chars().count(), self.config.min_length));
        }

        let total_chars = translation.chars().count();
        if total_chars > 0 {
            let special_chars = translation.chars().filter(|c| !c.is_alphanumeric() && !c.is_whitespace()).count();
            let ratio = special_chars as f32 / total_chars as f32;
            if ratio > self.config.max_special_char_ratio {
                return Err(format!("too many special characters ({:.0}% > {:.0}%)", ratio * 100.0, self.config.max_special_char_ratio * 100.0));
            }
        }

        let word_count = translation.split_whitespace().count();
        if word_count < self.config.min_word_count {
            return Err(format!("not enough words ({word_count} < {})", self.config.min_word_count));
        }

        for pattern in BAD_PATTERNS.iter() {
            if pattern.is_match(translation) {
                return Err(format!("matches rejected pattern: {}", pattern.as_str()));
            }
        }

        let distinct_chars: std::collections::HashSet<char> = translation.chars().filter(|c| !c.is_whitespace()).collect();
        if distinct_chars.len() < self.config.min_distinct_chars && translation.len() > 5 {
            return Err("translation has too few unique characters".into());
        }

        Ok(())
    }
}
