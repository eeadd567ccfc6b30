// screentl
// SPDX-License-Identifier: BSD-3-Clause

//! Process-wide tracing subscriber setup, `RUST_LOG`-driven.
//!
//! The subscriber itself is owned by `screentl_bootstrap::logger`, which is
//! initialized before the engine's own startup sequence runs; this thin
//! wrapper exists so engine code can depend on `init_tracing` without reaching
//! into the bootstrap crate directly.

/// Installs the global tracing subscriber. Idempotent: a second call (e.g.
/// from a test harness that already installed one) is a no-op rather than a
/// panic.
pub fn init_tracing() {
    screentl_bootstrap::logger::init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_is_idempotent() {
        init_tracing();
        init_tracing();
    }
}
