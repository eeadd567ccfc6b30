// screentl
// SPDX-License-Identifier: BSD-3-Clause

//! Auto-scaling worker pool.
//!
//! The pool tracks how many of its workers are currently busy and resizes
//! itself between a configured min/max bound using a utilization threshold
//! with hysteresis, so a single noisy spike doesn't thrash the worker count.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerState {
    Idle,
    Working,
    Paused,
    Stopping,
    Stopped,
    Error,
}

#[derive(Debug, Clone)]
pub struct WorkerPoolConfig {
    pub min_workers: usize,
    pub max_workers: usize,
    /// Utilization above this fraction triggers growth.
    pub scale_up_threshold: f64,
    /// Utilization below this fraction triggers shrink.
    pub scale_down_threshold: f64,
    pub cooldown: Duration,
}

impl Default for WorkerPoolConfig {
    fn default() -> Self {
        Self {
            min_workers: 1,
            max_workers: 8,
            scale_up_threshold: 0.8,
            scale_down_threshold: 0.3,
            cooldown: Duration::from_secs(10),
        }
    }
}

/// Tracks desired worker count and busy/idle counts; does not itself spawn
/// OS threads or tasks — callers use `worker_count()` to decide how many
/// concurrent tasks to run, e.g. as the bound passed to a semaphore.
pub struct WorkerPool {
    config: WorkerPoolConfig,
    worker_count: AtomicUsize,
    busy_workers: AtomicUsize,
    last_resize: Mutex<Instant>,
}

impl WorkerPool {
    pub fn new(config: WorkerPoolConfig) -> Self {
        let initial = config.min_workers.max(1);
        Self {
            config,
            worker_count: AtomicUsize::new(initial),
            busy_workers: AtomicUsize::new(0),
            last_resize: Mutex::new(Instant::now()),
        }
    }

    pub fn worker_count(&self) -> usize {
        self.worker_count.load(Ordering::Relaxed)
    }

    pub fn mark_busy(&self) {
        self.busy_workers.fetch_add(1, Ordering::Relaxed);
    }

    pub fn mark_idle(&self) {
        self.busy_workers.fetch_sub(1, Ordering::Relaxed);
    }

    pub fn utilization(&self) -> f64 {
        let workers = self.worker_count() as f64;
        if workers == 0.0 {
            return 0.0;
        }
        self.busy_workers.load(Ordering::Relaxed) as f64 / workers
    }

    /// Re-evaluates utilization and grows/shrinks the worker count if the
    /// cooldown window has elapsed since the last resize. Returns the new
    /// worker count.
    pub fn maybe_resize(&self) -> usize {
        let mut last_resize = self.last_resize.lock();
        if last_resize.elapsed() < self.config.cooldown {
            return self.worker_count();
        }

        let utilization = self.utilization();
        let current = self.worker_count();
        let new_count = if utilization >= self.config.scale_up_threshold && current < self.config.max_workers {
            current + 1
        } else if utilization <= self.config.scale_down_threshold && current > self.config.min_workers {
            current - 1
        } else {
            current
        };

        if new_count != current {
            self.worker_count.store(new_count, Ordering::Relaxed);
            *last_resize = Instant::now();
            info!(from = current, to = new_count, utilization, "worker pool resized");
        }
        new_count
    }
}

pub fn shared(config: WorkerPoolConfig) -> Arc<WorkerPool> {
    Arc::new(WorkerPool::new(config))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_min_workers() {
        let pool = WorkerPool::new(WorkerPoolConfig { min_workers: 2, ..Default::default() });
        assert_eq!(pool.worker_count(), 2);
    }

    #[test]
    fn scales_up_under_high_utilization_after_cooldown() {
        let pool = WorkerPool::new(WorkerPoolConfig {
            min_workers: 1,
            max_workers: 4,
            scale_up_threshold: 0.5,
            scale_down_threshold: 0.1,
            cooldown: Duration::from_secs(0),
        });
        pool.mark_busy();
        assert_eq!(pool.maybe_resize(), 2);
    }

    #[test]
    fn does_not_shrink_below_min_workers() {
        let pool = WorkerPool::new(WorkerPoolConfig {
            min_workers: 1,
            max_workers: 4,
            scale_up_threshold: 0.99,
            scale_down_threshold: 0.5,
            cooldown: Duration::from_secs(0),
        });
        assert_eq!(pool.maybe_resize(), 1);
    }
}
