// screentl
// SPDX-License-Identifier: BSD-3-Clause

//! Capture region and multi-region configuration.

use serde::{Deserialize, Serialize};

use crate::error::TranslatorError;
use crate::value_objects::rectangle::Rectangle;

/// A single monitor-local screen area to capture and translate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureRegion {
    pub id: String,
    pub bounds: Rectangle,
    pub enabled: bool,
}

impl CaptureRegion {
    pub fn new(id: impl Into<String>, bounds: Rectangle) -> Result<Self, TranslatorError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(TranslatorError::invalid_config("capture region id must not be empty"));
        }
        Ok(Self { id, bounds, enabled: true })
    }
}

/// The set of regions a multi-region capture coordinator manages.
///
/// Per the concurrency model, regions are independent: one region stopping
/// or erroring must never affect another's capture loop.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MultiRegionConfig {
    pub regions: Vec<CaptureRegion>,
}

impl MultiRegionConfig {
    pub fn new(regions: Vec<CaptureRegion>) -> Result<Self, TranslatorError> {
        let mut seen = std::collections::HashSet::new();
        for region in &regions {
            if !seen.insert(&region.id) {
                return Err(TranslatorError::invalid_config(format!(
                    "duplicate capture region id: {}",
                    region.id
                )));
            }
        }
        Ok(Self { regions })
    }

    pub fn enabled_regions(&self) -> impl Iterator<Item = &CaptureRegion> {
        self.regions.iter().filter(|r| r.enabled)
    }

    pub fn region(&self, id: &str) -> Option<&CaptureRegion> {
        self.regions.iter().find(|r| r.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect() -> Rectangle {
        Rectangle::new(0, 0, 100, 100).unwrap()
    }

    #[test]
    fn rejects_empty_id() {
        assert!(CaptureRegion::new("", rect()).is_err());
    }

    #[test]
    fn rejects_duplicate_region_ids() {
        let a = CaptureRegion::new("main", rect()).unwrap();
        let b = CaptureRegion::new("main", rect()).unwrap();
        assert!(MultiRegionConfig::new(vec![a, b]).is_err());
    }

    #[test]
    fn enabled_regions_filters_disabled() {
        let mut a = CaptureRegion::new("a", rect()).unwrap();
        a.enabled = false;
        let b = CaptureRegion::new("b", rect()).unwrap();
        let config = MultiRegionConfig::new(vec![a, b]).unwrap();
        let ids: Vec<_> = config.enabled_regions().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["b"]);
    }
}
