// screentl
// SPDX-License-Identifier: BSD-3-Clause

//! Overlay lifecycle tracking and coordinate positioning.

pub mod null_renderer;
pub mod overlay_tracker;
pub mod positioning_adapter;

pub use null_renderer::NullOverlayRenderer;
pub use overlay_tracker::OverlayTracker;
pub use positioning_adapter::PositioningAdapter;
