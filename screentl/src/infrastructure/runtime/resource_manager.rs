// screentl
// SPDX-License-Identifier: BSD-3-Clause

//! Global resource governance.
//!
//! Without a system-wide cap, each capture region's pipeline would compete
//! for CPU and I/O independently — N regions times M workers per region can
//! oversubscribe an 8-core machine badly. This manager hands out two pools
//! of tokens (CPU-bound work, I/O-bound work) that every region's stages
//! acquire before doing real work, on top of each region's own local
//! concurrency bound.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::OnceLock;

use screentl_domain::error::TranslatorError;
use tokio::sync::{Semaphore, SemaphorePermit};

#[derive(Debug, Clone)]
pub struct ResourceConfig {
    /// CPU worker tokens; defaults to `available_parallelism() - 1`.
    pub cpu_tokens: Option<usize>,
    /// I/O tokens; defaults to 12 (reasonable for dictionary/cache file I/O).
    pub io_tokens: Option<usize>,
    /// Soft memory gauge capacity in bytes, for reporting only.
    pub memory_limit: Option<usize>,
}

impl Default for ResourceConfig {
    fn default() -> Self {
        Self {
            cpu_tokens: None,
            io_tokens: None,
            memory_limit: None,
        }
    }
}

pub struct GlobalResourceManager {
    cpu_tokens: Semaphore,
    io_tokens: Semaphore,
    memory_used: AtomicUsize,
    memory_capacity: usize,
    cpu_token_count: usize,
    io_token_count: usize,
}

impl GlobalResourceManager {
    pub fn new(config: ResourceConfig) -> Self {
        let available_cores = std::thread::available_parallelism().map(|n| n.get()).unwrap_or(4);
        let cpu_token_count = config.cpu_tokens.unwrap_or_else(|| (available_cores - 1).max(1));
        let io_token_count = config.io_tokens.unwrap_or(12);
        let memory_capacity = config.memory_limit.unwrap_or(4 * 1024 * 1024 * 1024);

        Self {
            cpu_tokens: Semaphore::new(cpu_token_count),
            io_tokens: Semaphore::new(io_token_count),
            memory_used: AtomicUsize::new(0),
            memory_capacity,
            cpu_token_count,
            io_token_count,
        }
    }

    /// Waits for a CPU-bound work token (OCR, translation, rendering).
    pub async fn acquire_cpu(&self) -> Result<SemaphorePermit<'_>, TranslatorError> {
        self.cpu_tokens
            .acquire()
            .await
            .map_err(|_| TranslatorError::internal("CPU semaphore closed"))
    }

    /// Waits for an I/O-bound work token (dictionary persistence, capture).
    pub async fn acquire_io(&self) -> Result<SemaphorePermit<'_>, TranslatorError> {
        self.io_tokens
            .acquire()
            .await
            .map_err(|_| TranslatorError::internal("I/O semaphore closed"))
    }

    pub fn allocate_memory(&self, bytes: usize) {
        self.memory_used.fetch_add(bytes, Ordering::Relaxed);
    }

    pub fn deallocate_memory(&self, bytes: usize) {
        self.memory_used.fetch_sub(bytes, Ordering::Relaxed);
    }

    pub fn memory_used(&self) -> usize {
        self.memory_used.load(Ordering::Relaxed)
    }

    pub fn memory_capacity(&self) -> usize {
        self.memory_capacity
    }

    pub fn cpu_tokens_available(&self) -> usize {
        self.cpu_tokens.available_permits()
    }

    pub fn cpu_tokens_total(&self) -> usize {
        self.cpu_token_count
    }

    pub fn io_tokens_available(&self) -> usize {
        self.io_tokens.available_permits()
    }

    pub fn io_tokens_total(&self) -> usize {
        self.io_token_count
    }
}

static RESOURCE_MANAGER_CELL: OnceLock<GlobalResourceManager> = OnceLock::new();

/// Must be called exactly once, early in `main()`, before any region
/// pipeline starts.
pub fn init_resource_manager(config: ResourceConfig) -> Result<(), String> {
    RESOURCE_MANAGER_CELL
        .set(GlobalResourceManager::new(config))
        .map_err(|_| "resource manager already initialized".to_string())
}

/// Panics if called before `init_resource_manager()`.
pub fn resource_manager() -> &'static GlobalResourceManager {
    RESOURCE_MANAGER_CELL
        .get()
        .expect("resource manager not initialized; call init_resource_manager() in main()")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creation_picks_at_least_one_cpu_token() {
        let manager = GlobalResourceManager::new(ResourceConfig::default());
        assert!(manager.cpu_tokens_total() >= 1);
        assert!(manager.io_tokens_total() > 0);
        assert_eq!(manager.cpu_tokens_available(), manager.cpu_tokens_total());
    }

    #[tokio::test]
    async fn cpu_token_acquisition_is_bounded() {
        let manager = GlobalResourceManager::new(ResourceConfig {
            cpu_tokens: Some(2),
            ..Default::default()
        });
        assert_eq!(manager.cpu_tokens_available(), 2);
        let permit1 = manager.acquire_cpu().await.unwrap();
        assert_eq!(manager.cpu_tokens_available(), 1);
        let _permit2 = manager.acquire_cpu().await.unwrap();
        assert_eq!(manager.cpu_tokens_available(), 0);
        drop(permit1);
        assert_eq!(manager.cpu_tokens_available(), 1);
    }

    #[test]
    fn memory_gauge_tracks_allocations() {
        let manager = GlobalResourceManager::new(ResourceConfig::default());
        manager.allocate_memory(1000);
        manager.allocate_memory(500);
        manager.deallocate_memory(700);
        assert_eq!(manager.memory_used(), 800);
    }
}
