// screentl
// SPDX-License-Identifier: BSD-3-Clause

//! Repository interfaces: contracts for persistence, kept technology-agnostic
//! so infrastructure can swap implementations without touching domain logic.

pub mod dictionary_repository;

pub use dictionary_repository::DictionaryRepository;
