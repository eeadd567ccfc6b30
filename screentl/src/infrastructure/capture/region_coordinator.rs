// screentl
// SPDX-License-Identifier: BSD-3-Clause

//! Multi-region capture coordination: one independent capture loop per
//! enabled region, fed into bounded per-region result queues.

use std::collections::HashMap;
use std::sync::Arc;

use screentl_domain::error::TranslatorError;
use screentl_domain::services::CaptureBackend;
use screentl_domain::value_objects::{CaptureRegion, Rectangle};
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::infrastructure::queue::{DropPolicy, ManagedQueue};
use crate::infrastructure::runtime::CancellationToken;

struct RunningRegion {
    region: CaptureRegion,
    queue: Arc<ManagedQueue<Frame>>,
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

/// A captured frame tagged with the screen offset its owning region applies,
/// so downstream coordinate translation doesn't need to look the region up
/// again.
#[derive(Debug, Clone)]
pub struct Frame {
    pub region_id: String,
    pub screen_offset: (i32, i32),
    pub data: screentl_domain::entities::Frame,
}

const DEFAULT_REGION_QUEUE_CAPACITY: usize = 32;

/// Owns one capture loop per enabled region and exposes each region's
/// captured frames through its own bounded queue. Regions can be added,
/// removed, enabled, disabled, or reconfigured at runtime; `update_region`
/// stops and restarts the affected loop.
pub struct RegionCoordinator<B: CaptureBackend + 'static> {
    backend: Arc<B>,
    regions: RwLock<HashMap<String, RunningRegion>>,
}

impl<B: CaptureBackend + 'static> RegionCoordinator<B> {
    pub fn new(backend: Arc<B>) -> Self {
        Self {
            backend,
            regions: RwLock::new(HashMap::new()),
        }
    }

    pub async fn load_config(&self, config: &screentl_domain::value_objects::MultiRegionConfig) -> Result<(), TranslatorError> {
        for region in config.enabled_regions() {
            self.add_region(region.clone()).await?;
        }
        Ok(())
    }

    pub async fn add_region(&self, region: CaptureRegion) -> Result<(), TranslatorError> {
        if !region.enabled {
            return Ok(());
        }
        let mut regions = self.regions.write().await;
        if regions.contains_key(&region.id) {
            return Err(TranslatorError::invalid_config(format!("region '{}' already registered", region.id)));
        }
        let running = self.spawn_region(region.clone());
        regions.insert(region.id.clone(), running);
        info!(region = %region.id, "capture region started");
        Ok(())
    }

    pub async fn remove_region(&self, region_id: &str) -> Result<(), TranslatorError> {
        let running = self.regions.write().await.remove(region_id);
        match running {
            Some(running) => {
                running.cancel.cancel();
                let _ = running.handle.await;
                info!(region = region_id, "capture region stopped");
                Ok(())
            }
            None => Err(TranslatorError::invalid_config(format!("unknown region '{region_id}'"))),
        }
    }

    pub async fn disable_region(&self, region_id: &str) -> Result<(), TranslatorError> {
        self.remove_region(region_id).await
    }

    pub async fn enable_region(&self, region: CaptureRegion) -> Result<(), TranslatorError> {
        self.add_region(CaptureRegion { enabled: true, ..region }).await
    }

    /// Stops the existing loop for this region (if running) and restarts it
    /// with the new bounds/offset.
    pub async fn update_region(&self, region: CaptureRegion) -> Result<(), TranslatorError> {
        let _ = self.remove_region(&region.id).await;
        self.add_region(region).await
    }

    pub async fn queue(&self, region_id: &str) -> Option<Arc<ManagedQueue<Frame>>> {
        self.regions.read().await.get(region_id).map(|r| r.queue.clone())
    }

    pub async fn region_ids(&self) -> Vec<String> {
        self.regions.read().await.keys().cloned().collect()
    }

    pub async fn region_bounds(&self, region_id: &str) -> Option<CaptureRegion> {
        self.regions.read().await.get(region_id).map(|r| r.region.clone())
    }

    /// Publishes the screen-absolute rectangles currently occupied by
    /// rendered overlays to the capture backend, so the next frame masks
    /// them out instead of feeding the engine's own text back into OCR.
    pub async fn set_masked_rectangles(&self, rectangles: Vec<Rectangle>) -> Result<(), TranslatorError> {
        self.backend.set_masked_rectangles(rectangles).await
    }

    pub async fn shutdown(&self) {
        let mut regions = self.regions.write().await;
        for (_, running) in regions.drain() {
            running.cancel.cancel();
            let _ = running.handle.await;
        }
    }

    fn spawn_region(&self, region: CaptureRegion) -> RunningRegion {
        let queue = Arc::new(ManagedQueue::new(
            region.id.clone(),
            DEFAULT_REGION_QUEUE_CAPACITY,
            DropPolicy::DropNewest,
        ));
        let cancel = CancellationToken::new();
        let backend = self.backend.clone();
        let bounds = region.bounds;
        let region_id = region.id.clone();
        let screen_offset = (bounds.x, bounds.y);
        let loop_queue = queue.clone();
        let loop_cancel = cancel.clone();

        let handle = tokio::spawn(async move {
            capture_loop(backend, region_id, bounds, screen_offset, loop_queue, loop_cancel).await;
        });

        RunningRegion { region, queue, cancel, handle }
    }
}

async fn capture_loop<B: CaptureBackend + 'static>(
    backend: Arc<B>,
    region_id: String,
    bounds: Rectangle,
    screen_offset: (i32, i32),
    queue: Arc<ManagedQueue<Frame>>,
    cancel: CancellationToken,
) {
    let region = CaptureRegion::new(region_id.clone(), bounds).expect("bounds already validated");
    loop {
        if cancel.is_cancelled() {
            break;
        }
        match backend.capture(&region).await {
            Ok(data) => {
                let frame = Frame { region_id: region_id.clone(), screen_offset, data };
                queue.try_push(frame);
            }
            Err(err) => warn!(region = %region_id, error = %err, "capture failed"),
        }
        tokio::select! {
            _ = cancel.cancelled() => break,
            _ = tokio::time::sleep(std::time::Duration::from_millis(33)) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use screentl_domain::entities::Frame as DomainFrame;
    use std::sync::atomic::{AtomicU64, Ordering};

    struct StubBackend {
        sequence: AtomicU64,
    }

    #[async_trait]
    impl CaptureBackend for StubBackend {
        async fn capture(&self, region: &CaptureRegion) -> Result<DomainFrame, TranslatorError> {
            let seq = self.sequence.fetch_add(1, Ordering::SeqCst);
            let pixels = vec![0u8; (region.bounds.width * region.bounds.height * 4) as usize];
            Ok(DomainFrame::new(region.id.clone(), seq, region.bounds.width, region.bounds.height, pixels).unwrap())
        }

        async fn set_masked_rectangles(&self, _rects: Vec<Rectangle>) -> Result<(), TranslatorError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn add_and_remove_region_starts_and_stops_loop() {
        let coordinator = RegionCoordinator::new(Arc::new(StubBackend { sequence: AtomicU64::new(0) }));
        let region = CaptureRegion::new("main", Rectangle::new(0, 0, 10, 10).unwrap()).unwrap();
        coordinator.add_region(region).await.unwrap();
        assert_eq!(coordinator.region_ids().await, vec!["main".to_string()]);

        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
        let queue = coordinator.queue("main").await.unwrap();
        assert!(queue.len() > 0);

        coordinator.remove_region("main").await.unwrap();
        assert!(coordinator.region_ids().await.is_empty());
    }

    #[tokio::test]
    async fn duplicate_region_id_is_rejected() {
        let coordinator = RegionCoordinator::new(Arc::new(StubBackend { sequence: AtomicU64::new(0) }));
        let region = CaptureRegion::new("main", Rectangle::new(0, 0, 10, 10).unwrap()).unwrap();
        coordinator.add_region(region.clone()).await.unwrap();
        assert!(coordinator.add_region(region).await.is_err());
        coordinator.shutdown().await;
    }
}
