// screentl
// SPDX-License-Identifier: BSD-3-Clause

//! Bounded FIFO queue with a configurable overflow policy, grounded on the
//! same semantics as a classic producer/consumer pipeline queue: "oldest",
//! "newest", and "block" drop policies, plus rolling wait-time stats.

use std::collections::VecDeque;
use std::time::Instant;

use parking_lot::Mutex;
use tokio::sync::Notify;

/// What happens when `push` is called on a queue already at `capacity`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropPolicy {
    /// Evict the oldest queued item to make room for the new one.
    DropOldest,
    /// Reject the new item, keeping the queue as-is.
    DropNewest,
    /// Wait (via `push`'s async variant) until room is available.
    Block,
}

#[derive(Debug, Clone, Default)]
pub struct QueueStats {
    pub name: String,
    pub current_size: usize,
    pub capacity: usize,
    pub total_enqueued: u64,
    pub total_dequeued: u64,
    pub total_dropped: u64,
    pub peak_size: usize,
    pub average_wait_ms: f64,
}

impl QueueStats {
    pub fn utilization_percent(&self) -> f64 {
        if self.capacity == 0 {
            0.0
        } else {
            (self.current_size as f64 / self.capacity as f64) * 100.0
        }
    }
}

struct Inner<T> {
    items: VecDeque<(T, Instant)>,
    capacity: usize,
    policy: DropPolicy,
    total_enqueued: u64,
    total_dequeued: u64,
    total_dropped: u64,
    peak_size: usize,
    recent_waits_ms: VecDeque<f64>,
}

/// Bounded queue used at every pipeline stage boundary to decouple producer
/// and consumer rates without unbounded memory growth.
pub struct ManagedQueue<T> {
    name: String,
    inner: Mutex<Inner<T>>,
    notify: Notify,
}

const RECENT_WAITS_WINDOW: usize = 100;
/// Utilization above this fraction signals backpressure to callers that
/// check `is_under_backpressure`.
pub const BACKPRESSURE_THRESHOLD: f64 = 0.8;

impl<T> ManagedQueue<T> {
    pub fn new(name: impl Into<String>, capacity: usize, policy: DropPolicy) -> Self {
        Self {
            name: name.into(),
            inner: Mutex::new(Inner {
                items: VecDeque::new(),
                capacity,
                policy,
                total_enqueued: 0,
                total_dequeued: 0,
                total_dropped: 0,
                peak_size: 0,
                recent_waits_ms: VecDeque::new(),
            }),
            notify: Notify::new(),
        }
    }

    /// Attempts to enqueue `item` without blocking. Returns `false` if the
    /// item was dropped (only possible under `DropNewest`, or `DropOldest`
    /// racing to evict — which always succeeds in making room, so
    /// `DropOldest` never returns `false`).
    pub fn try_push(&self, item: T) -> bool {
        let mut inner = self.inner.lock();
        if inner.items.len() >= inner.capacity {
            match inner.policy {
                DropPolicy::DropNewest => {
                    inner.total_dropped += 1;
                    return false;
                }
                DropPolicy::DropOldest => {
                    inner.items.pop_front();
                    inner.total_dropped += 1;
                }
                DropPolicy::Block => {
                    // try_push never blocks; treat a full blocking queue as
                    // a drop-newest for this non-blocking call.
                    inner.total_dropped += 1;
                    return false;
                }
            }
        }
        inner.items.push_back((item, Instant::now()));
        inner.total_enqueued += 1;
        inner.peak_size = inner.peak_size.max(inner.items.len());
        drop(inner);
        self.notify.notify_one();
        true
    }

    /// Enqueues `item`, waiting for room if the policy is `Block` and the
    /// queue is full.
    pub async fn push(&self, item: T) {
        loop {
            {
                let mut inner = self.inner.lock();
                if inner.items.len() < inner.capacity || inner.policy != DropPolicy::Block {
                    if inner.items.len() >= inner.capacity {
                        match inner.policy {
                            DropPolicy::DropNewest => {
                                inner.total_dropped += 1;
                                return;
                            }
                            DropPolicy::DropOldest => {
                                inner.items.pop_front();
                                inner.total_dropped += 1;
                            }
                            DropPolicy::Block => unreachable!(),
                        }
                    }
                    inner.items.push_back((item, Instant::now()));
                    inner.total_enqueued += 1;
                    inner.peak_size = inner.peak_size.max(inner.items.len());
                    drop(inner);
                    self.notify.notify_one();
                    return;
                }
            }
            self.notify.notified().await;
        }
    }

    pub fn try_pop(&self) -> Option<T> {
        let mut inner = self.inner.lock();
        let (item, enqueued_at) = inner.items.pop_front()?;
        inner.total_dequeued += 1;
        let wait_ms = enqueued_at.elapsed().as_secs_f64() * 1000.0;
        if inner.recent_waits_ms.len() >= RECENT_WAITS_WINDOW {
            inner.recent_waits_ms.pop_front();
        }
        inner.recent_waits_ms.push_back(wait_ms);
        drop(inner);
        self.notify.notify_one();
        Some(item)
    }

    pub fn len(&self) -> usize {
        self.inner.lock().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.inner.lock().items.clear();
    }

    pub fn is_under_backpressure(&self) -> bool {
        self.stats().utilization_percent() / 100.0 >= BACKPRESSURE_THRESHOLD
    }

    pub fn stats(&self) -> QueueStats {
        let inner = self.inner.lock();
        let average_wait_ms = if inner.recent_waits_ms.is_empty() {
            0.0
        } else {
            inner.recent_waits_ms.iter().sum::<f64>() / inner.recent_waits_ms.len() as f64
        };
        QueueStats {
            name: self.name.clone(),
            current_size: inner.items.len(),
            capacity: inner.capacity,
            total_enqueued: inner.total_enqueued,
            total_dequeued: inner.total_dequeued,
            total_dropped: inner.total_dropped,
            peak_size: inner.peak_size,
            average_wait_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drop_newest_rejects_when_full() {
        let queue = ManagedQueue::new("q", 2, DropPolicy::DropNewest);
        assert!(queue.try_push(1));
        assert!(queue.try_push(2));
        assert!(!queue.try_push(3));
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.stats().total_dropped, 1);
    }

    #[test]
    fn drop_oldest_evicts_front() {
        let queue = ManagedQueue::new("q", 2, DropPolicy::DropOldest);
        queue.try_push(1);
        queue.try_push(2);
        queue.try_push(3);
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.try_pop(), Some(2));
        assert_eq!(queue.try_pop(), Some(3));
    }

    #[test]
    fn fifo_order_preserved() {
        let queue = ManagedQueue::new("q", 10, DropPolicy::DropNewest);
        queue.try_push("a");
        queue.try_push("b");
        assert_eq!(queue.try_pop(), Some("a"));
        assert_eq!(queue.try_pop(), Some("b"));
        assert_eq!(queue.try_pop(), None);
    }

    #[test]
    fn backpressure_trips_at_eighty_percent() {
        let queue = ManagedQueue::new("q", 10, DropPolicy::DropNewest);
        for i in 0..7 {
            queue.try_push(i);
        }
        assert!(!queue.is_under_backpressure());
        queue.try_push(7);
        queue.try_push(8);
        assert!(queue.is_under_backpressure());
    }

    #[tokio::test]
    async fn blocking_push_waits_for_room() {
        let queue = std::sync::Arc::new(ManagedQueue::new("q", 1, DropPolicy::Block));
        queue.try_push(1);
        let q2 = queue.clone();
        let handle = tokio::spawn(async move {
            q2.push(2).await;
        });
        tokio::task::yield_now().await;
        assert_eq!(queue.try_pop(), Some(1));
        handle.await.unwrap();
        assert_eq!(queue.try_pop(), Some(2));
    }
}
