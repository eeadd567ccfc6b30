// screentl
// SPDX-License-Identifier: BSD-3-Clause

//! Outcome of a single pipeline stage execution, threaded through the
//! engine's pre/post callbacks and into the metrics service.

use std::time::Duration;

#[derive(Debug, Clone)]
pub struct StageResult {
    pub stage_name: String,
    pub succeeded: bool,
    pub duration: Duration,
    pub error_message: Option<String>,
}

impl StageResult {
    pub fn success(stage_name: impl Into<String>, duration: Duration) -> Self {
        Self {
            stage_name: stage_name.into(),
            succeeded: true,
            duration,
            error_message: None,
        }
    }

    pub fn failure(stage_name: impl Into<String>, duration: Duration, error_message: impl Into<String>) -> Self {
        Self {
            stage_name: stage_name.into(),
            succeeded: false,
            duration,
            error_message: Some(error_message.into()),
        }
    }
}
