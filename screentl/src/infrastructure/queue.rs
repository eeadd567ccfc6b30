// screentl
// SPDX-License-Identifier: BSD-3-Clause

//! Bounded, stats-tracked queues used between pipeline stages.

pub mod managed_queue;
pub mod queue_manager;

pub use managed_queue::{DropPolicy, ManagedQueue, QueueStats, BACKPRESSURE_THRESHOLD};
pub use queue_manager::QueueManager;
