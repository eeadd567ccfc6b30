// screentl
// SPDX-License-Identifier: BSD-3-Clause

//! OCR engine adapters.
//!
//! Real text recognition (Tesseract, a platform OCR API, a cloud vision
//! service) is an external collaborator's concern; this module only carries
//! the reference no-op adapter used when no recognizer is configured.

pub mod null_engine;

pub use null_engine::NullOcrEngine;
