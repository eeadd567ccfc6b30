// screentl
// SPDX-License-Identifier: BSD-3-Clause

//! Stable overlay identity derivation.

use sha2::{Digest, Sha256};

/// Derives a stable overlay id from recognized text: a truncated SHA-256
/// digest of the text, disambiguated by an ordinal when the same text
/// appears more than once in a frame (e.g. a repeated menu label).
///
/// Truncating to 8 hex characters keeps ids short for logging while leaving
/// the collision space large enough that two distinct on-screen strings
/// colliding is not a practical concern for this workspace's scale.
pub fn derive_overlay_id(text: &str, ordinal: usize) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    let digest = hasher.finalize();
    let short = hex::encode(&digest[..4]);
    if ordinal == 0 {
        short
    } else {
        format!("{short}-{ordinal}")
    }
}
