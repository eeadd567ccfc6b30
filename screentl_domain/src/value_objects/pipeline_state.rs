// screentl
// SPDX-License-Identifier: BSD-3-Clause

//! Normalized pipeline lifecycle states.
//!
//! A live screen-translation pipeline runs until stopped; it never
//! "completes" the way a batch file job does, so this set is deliberately
//! smaller than a batch-oriented execution-state enum would be.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PipelineState {
    Idle,
    Starting,
    Running,
    Paused,
    Stopping,
    Error,
}

impl PipelineState {
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Starting | Self::Running | Self::Paused)
    }
}
