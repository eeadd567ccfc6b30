// screentl
// SPDX-License-Identifier: BSD-3-Clause

//! Language code translation between OCR-engine-specific formats.
//!
//! OCR engines disagree on language code conventions: EasyOCR, PaddleOCR,
//! and ONNX runtimes use ISO 639-1 (`en`, `de`, `ja`), Tesseract uses its
//! own 3-letter codes (`eng`, `deu`, `jpn`), and engines limited to one
//! language (Manga OCR) ignore the requested code entirely. This module
//! normalizes a caller-supplied code to whatever format a given engine
//! expects, so `screentl_domain::value_objects::LanguageTag` can stay a
//! plain ISO 639-1 wrapper regardless of which engine is configured.

use std::collections::HashMap;

use once_cell::sync::Lazy;

pub const DEFAULT_ISO: &str = "en";
pub const DEFAULT_TESSERACT: &str = "eng";

static ISO_TO_TESSERACT: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    [
        ("en", "eng"),
        ("de", "deu"),
        ("es", "spa"),
        ("fr", "fra"),
        ("ja", "jpn"),
        ("zh", "chi_sim"),
        ("ko", "kor"),
        ("ru", "rus"),
        ("it", "ita"),
        ("pt", "por"),
        ("nl", "nld"),
        ("pl", "pol"),
        ("tr", "tur"),
        ("ar", "ara"),
        ("hi", "hin"),
        ("th", "tha"),
        ("vi", "vie"),
        ("id", "ind"),
        ("uk", "ukr"),
        ("cs", "ces"),
        ("sv", "swe"),
        ("da", "dan"),
        ("fi", "fin"),
        ("no", "nor"),
        ("hu", "hun"),
        ("ro", "ron"),
        ("bg", "bul"),
        ("el", "ell"),
        ("he", "heb"),
        ("fa", "fas"),
    ]
    .into_iter()
    .collect()
});

static TESSERACT_TO_ISO: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| ISO_TO_TESSERACT.iter().map(|(&iso, &tess)| (tess, iso)).collect());

/// Tesseract codes with a common alternate spelling.
static TESSERACT_ALTERNATIVES: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| [("ger", "deu"), ("fre", "fra"), ("dut", "nld")].into_iter().collect());

/// OCR engines with distinct language-code conventions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OcrEngineKind {
    EasyOcr,
    PaddleOcr,
    Onnx,
    Tesseract,
    MangaOcr,
}

impl OcrEngineKind {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().trim() {
            "easyocr" => Some(Self::EasyOcr),
            "paddleocr" => Some(Self::PaddleOcr),
            "onnx" => Some(Self::Onnx),
            "tesseract" => Some(Self::Tesseract),
            "manga_ocr" => Some(Self::MangaOcr),
            _ => None,
        }
    }
}

/// Converts any recognized code to ISO 639-1, defaulting to `en`.
pub fn to_iso639_1(code: &str) -> String {
    let code = code.to_lowercase();
    let code = code.trim();
    if code.is_empty() {
        return DEFAULT_ISO.to_string();
    }
    if code.len() == 2 && ISO_TO_TESSERACT.contains_key(code) {
        return code.to_string();
    }
    if code == "ch_sim" || code == "ch_tra" {
        return code.to_string();
    }
    if let Some(&iso) = TESSERACT_TO_ISO.get(code) {
        return iso.to_string();
    }
    if let Some(&tess) = TESSERACT_ALTERNATIVES.get(code) {
        if let Some(&iso) = TESSERACT_TO_ISO.get(tess) {
            return iso.to_string();
        }
    }
    if code.len() > 2 {
        let head = &code[..2];
        if ISO_TO_TESSERACT.contains_key(head) {
            return head.to_string();
        }
    }
    DEFAULT_ISO.to_string()
}

/// Converts any recognized code to Tesseract's 3-letter format, defaulting
/// to `eng`.
pub fn to_tesseract(code: &str) -> String {
    let code = code.to_lowercase();
    let code = code.trim();
    if code.is_empty() {
        return DEFAULT_TESSERACT.to_string();
    }
    if TESSERACT_TO_ISO.contains_key(code) || TESSERACT_ALTERNATIVES.contains_key(code) {
        return code.to_string();
    }
    if let Some(&tess) = ISO_TO_TESSERACT.get(code) {
        return tess.to_string();
    }
    if code == "zh" || code == "chi_sim" || code == "ch_sim" {
        return "chi_sim".to_string();
    }
    if code == "chi_tra" || code == "ch_tra" {
        return "chi_tra".to_string();
    }
    DEFAULT_TESSERACT.to_string()
}

/// Normalizes `code` for whichever language-code convention `engine` expects.
pub fn normalize(code: &str, engine: &str) -> String {
    match OcrEngineKind::from_name(engine) {
        Some(OcrEngineKind::MangaOcr) => "ja".to_string(),
        Some(OcrEngineKind::Tesseract) => to_tesseract(code),
        Some(OcrEngineKind::EasyOcr | OcrEngineKind::PaddleOcr | OcrEngineKind::Onnx) => to_iso639_1(code),
        None => to_iso639_1(code),
    }
}

/// Reports whether `code` is a recognized ISO 639-1 or Tesseract code.
pub fn is_valid_code(code: &str) -> bool {
    let code = code.to_lowercase();
    let code = code.trim();
    !code.is_empty()
        && (ISO_TO_TESSERACT.contains_key(code)
            || TESSERACT_TO_ISO.contains_key(code)
            || TESSERACT_ALTERNATIVES.contains_key(code)
            || code == "ch_sim"
            || code == "ch_tra")
}
