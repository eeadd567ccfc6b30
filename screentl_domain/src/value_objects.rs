// screentl
// SPDX-License-Identifier: BSD-3-Clause

//! Value objects: immutable types identified by their attributes rather than
//! a persistent identity.

pub mod capture_region;
pub mod confidence;
pub mod language_tag;
pub mod overlay_id;
pub mod pipeline_state;
pub mod rectangle;

pub use capture_region::{CaptureRegion, MultiRegionConfig};
pub use confidence::Confidence;
pub use language_tag::LanguageTag;
pub use overlay_id::derive_overlay_id;
pub use pipeline_state::PipelineState;
pub use rectangle::Rectangle;
