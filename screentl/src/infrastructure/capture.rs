// screentl
// SPDX-License-Identifier: BSD-3-Clause

//! Multi-region screen capture orchestration.

pub mod region_coordinator;
pub mod screen_backend;

pub use region_coordinator::{Frame, RegionCoordinator};
pub use screen_backend::ScreenCaptureBackend;
