// screentl
// SPDX-License-Identifier: BSD-3-Clause

//! Converts a region-local `Translation.position` into screen-absolute
//! coordinates before it reaches the overlay tracker or renderer.

use screentl_domain::entities::Translation;
use screentl_domain::value_objects::CaptureRegion;

pub struct PositioningAdapter;

impl PositioningAdapter {
    /// Offsets `translation.position` by `region`'s screen-absolute origin.
    pub fn to_screen(translation: &Translation, region: &CaptureRegion) -> Translation {
        translation.translated_to_screen(region.bounds.x, region.bounds.y)
    }
}
