// screentl
// SPDX-License-Identifier: BSD-3-Clause

//! Prometheus-backed metrics collection for the translation pipeline.

pub mod service;

pub use service::MetricsService;
