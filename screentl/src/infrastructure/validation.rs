// screentl
// SPDX-License-Identifier: BSD-3-Clause

//! Pre-translation text validation.

pub mod text_validator;

pub use text_validator::{TextValidator, TextValidatorConfig, ValidatedText};
