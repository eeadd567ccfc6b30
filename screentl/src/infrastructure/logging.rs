// screentl
// SPDX-License-Identifier: BSD-3-Clause

//! Process-wide logging setup.

pub mod tracing_init;

pub use tracing_init::init_tracing;
