// screentl
// SPDX-License-Identifier: BSD-3-Clause

//! Tracks active overlays so their source text disappearing from screen can
//! auto-hide them, instead of leaving a stale translation rendered forever.

use std::collections::HashMap;

use chrono::Utc;
use parking_lot::Mutex;
use screentl_domain::entities::TrackedOverlay;
use screentl_domain::value_objects::Rectangle;
use tracing::debug;

const DEFAULT_DISAPPEAR_THRESHOLD_SECS: f64 = 2.0;

pub struct OverlayTracker {
    tracked: Mutex<HashMap<String, TrackedOverlay>>,
    disappear_threshold_secs: f64,
    enabled: Mutex<bool>,
}

impl Default for OverlayTracker {
    fn default() -> Self {
        Self::new(DEFAULT_DISAPPEAR_THRESHOLD_SECS)
    }
}

impl OverlayTracker {
    pub fn new(disappear_threshold_secs: f64) -> Self {
        Self {
            tracked: Mutex::new(HashMap::new()),
            disappear_threshold_secs,
            enabled: Mutex::new(true),
        }
    }

    /// Starts tracking an overlay, or refreshes it if already tracked under
    /// this id.
    pub fn track(&self, overlay_id: impl Into<String>, text: impl Into<String>, position: Rectangle, source_region: impl Into<String>, confidence: f32) {
        if !*self.enabled.lock() {
            return;
        }
        let overlay_id = overlay_id.into();
        let mut tracked = self.tracked.lock();
        match tracked.get_mut(&overlay_id) {
            Some(existing) => {
                existing.position = position;
                existing.text = text.into();
                existing.confidence = confidence;
                existing.refresh();
            }
            None => {
                tracked.insert(overlay_id.clone(), TrackedOverlay::new(overlay_id, text, position, source_region, confidence));
            }
        }
    }

    /// Marks an already-tracked overlay as still visible, refreshing its
    /// `last_seen` timestamp.
    pub fn mark_seen(&self, overlay_id: &str) {
        if let Some(overlay) = self.tracked.lock().get_mut(overlay_id) {
            overlay.refresh();
        }
    }

    /// Returns the ids of overlays whose source text hasn't been seen within
    /// the disappearance threshold. Does not remove them; callers should
    /// `remove` after hiding.
    pub fn disappeared(&self) -> Vec<String> {
        if !*self.enabled.lock() {
            return Vec::new();
        }
        let now = Utc::now();
        self.tracked
            .lock()
            .values()
            .filter(|overlay| overlay.has_disappeared(now, self.disappear_threshold_secs))
            .map(|overlay| overlay.overlay_id.clone())
            .collect()
    }

    pub fn remove(&self, overlay_id: &str) {
        self.tracked.lock().remove(overlay_id);
    }

    pub fn clear_all(&self) {
        self.tracked.lock().clear();
    }

    pub fn tracked_count(&self) -> usize {
        self.tracked.lock().len()
    }

    /// Screen-absolute rectangles of every currently tracked overlay, fed
    /// back to the capture backend so it can mask them out of the next
    /// frame and avoid re-recognizing the engine's own rendered text.
    pub fn active_positions(&self) -> Vec<Rectangle> {
        self.tracked.lock().values().map(|overlay| overlay.position).collect()
    }

    /// Disabling clears all tracked overlays immediately, so a later
    /// re-enable starts from a clean slate rather than resurrecting stale
    /// entries.
    pub fn set_enabled(&self, enabled: bool) {
        *self.enabled.lock() = enabled;
        if !enabled {
            debug!("overlay tracker disabled, clearing tracked overlays");
            self.clear_all();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect() -> Rectangle {
        Rectangle::new(0, 0, 10, 10).unwrap()
    }

    #[test]
    fn tracking_twice_refreshes_instead_of_duplicating() {
        let tracker = OverlayTracker::new(2.0);
        tracker.track("a", "hello", rect(), "main", 0.9);
        tracker.track("a", "hello updated", rect(), "main", 0.95);
        assert_eq!(tracker.tracked_count(), 1);
    }

    #[test]
    fn disabling_clears_tracked_overlays() {
        let tracker = OverlayTracker::new(2.0);
        tracker.track("a", "hello", rect(), "main", 0.9);
        tracker.set_enabled(false);
        assert_eq!(tracker.tracked_count(), 0);
        assert!(tracker.disappeared().is_empty());
    }

    #[test]
    fn remove_stops_tracking() {
        let tracker = OverlayTracker::new(2.0);
        tracker.track("a", "hello", rect(), "main", 0.9);
        tracker.remove("a");
        assert_eq!(tracker.tracked_count(), 0);
    }

    #[test]
    fn active_positions_reflects_tracked_overlays() {
        let tracker = OverlayTracker::new(2.0);
        tracker.track("a", "hello", rect(), "main", 0.9);
        assert_eq!(tracker.active_positions(), vec![rect()]);
        tracker.remove("a");
        assert!(tracker.active_positions().is_empty());
    }
}
