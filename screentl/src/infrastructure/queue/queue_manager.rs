// screentl
// SPDX-License-Identifier: BSD-3-Clause

//! Registry of named [`ManagedQueue`]s, one per pipeline stage boundary.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use super::managed_queue::QueueStats;

/// Tracks every queue the pipeline has created, purely for aggregated
/// stats reporting — queues are otherwise owned directly by whoever created
/// them (a `ManagedQueue<T>` is generic over its item type, so this registry
/// only needs to be able to ask each queue for its stats).
pub struct QueueManager {
    stats_providers: RwLock<HashMap<String, Arc<dyn Fn() -> QueueStats + Send + Sync>>>,
}

impl Default for QueueManager {
    fn default() -> Self {
        Self::new()
    }
}

impl QueueManager {
    pub fn new() -> Self {
        Self {
            stats_providers: RwLock::new(HashMap::new()),
        }
    }

    /// Registers a queue's stats provider under `name` so its depth and
    /// drop counters show up in `all_stats`.
    pub fn register(&self, name: impl Into<String>, stats_provider: Arc<dyn Fn() -> QueueStats + Send + Sync>) {
        self.stats_providers.write().insert(name.into(), stats_provider);
    }

    pub fn all_stats(&self) -> Vec<QueueStats> {
        self.stats_providers.read().values().map(|f| f()).collect()
    }

    /// Names of queues currently over the backpressure threshold.
    pub fn backpressured_queues(&self) -> Vec<String> {
        self.all_stats()
            .into_iter()
            .filter(|s| s.utilization_percent() >= super::managed_queue::BACKPRESSURE_THRESHOLD * 100.0)
            .map(|s| s.name)
            .collect()
    }
}
