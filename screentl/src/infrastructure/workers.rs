// screentl
// SPDX-License-Identifier: BSD-3-Clause

//! Auto-scaling worker pool tracking.

pub mod worker_pool;

pub use worker_pool::{WorkerPool, WorkerPoolConfig, WorkerState};
