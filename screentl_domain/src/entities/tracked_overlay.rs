// screentl
// SPDX-License-Identifier: BSD-3-Clause

//! Tracked overlay entity: a stable id, a `last_seen` timestamp refreshed on
//! every sighting, and disappearance detected by elapsed time rather than an
//! explicit "gone" signal.

use chrono::{DateTime, Utc};

use crate::value_objects::Rectangle;

#[derive(Debug, Clone)]
pub struct TrackedOverlay {
    pub overlay_id: String,
    pub text: String,
    pub position: Rectangle,
    pub source_region: String,
    pub confidence: f32,
    pub last_seen: DateTime<Utc>,
}

impl TrackedOverlay {
    pub fn new(overlay_id: impl Into<String>, text: impl Into<String>, position: Rectangle, source_region: impl Into<String>, confidence: f32) -> Self {
        Self {
            overlay_id: overlay_id.into(),
            text: text.into(),
            position,
            source_region: source_region.into(),
            confidence,
            last_seen: Utc::now(),
        }
    }

    pub fn refresh(&mut self) {
        self.last_seen = Utc::now();
    }

    pub fn has_disappeared(&self, now: DateTime<Utc>, disappear_threshold_secs: f64) -> bool {
        let elapsed_secs = (now - self.last_seen).num_milliseconds() as f64 / 1000.0;
        elapsed_secs > disappear_threshold_secs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn rect() -> Rectangle {
        Rectangle::new(0, 0, 10, 10).unwrap()
    }

    #[test]
    fn has_not_disappeared_within_threshold() {
        let overlay = TrackedOverlay::new("id1", "Hello", rect(), "main", 0.9);
        let now = overlay.last_seen + Duration::milliseconds(500);
        assert!(!overlay.has_disappeared(now, 2.0));
    }

    #[test]
    fn has_disappeared_past_threshold() {
        let overlay = TrackedOverlay::new("id1", "Hello", rect(), "main", 0.9);
        let now = overlay.last_seen + Duration::milliseconds(2100);
        assert!(overlay.has_disappeared(now, 2.0));
    }

    #[test]
    fn refresh_resets_last_seen() {
        let mut overlay = TrackedOverlay::new("id1", "Hello", rect(), "main", 0.9);
        let stale = overlay.last_seen - Duration::seconds(10);
        overlay.last_seen = stale;
        overlay.refresh();
        assert!(overlay.last_seen > stale);
    }
}
