// screentl
// SPDX-License-Identifier: BSD-3-Clause

//! Registry running the enabled optimizer chain in registration order.

use std::sync::Arc;

use screentl_domain::error::TranslatorError;
use serde_json::Value;
use tracing::warn;

use super::optimizer::{Optimizer, OptimizerContext, OptimizerManifest};

pub struct OptimizerHost {
    optimizers: Vec<Arc<dyn Optimizer>>,
}

impl Default for OptimizerHost {
    fn default() -> Self {
        Self::new()
    }
}

impl OptimizerHost {
    pub fn new() -> Self {
        Self { optimizers: Vec::new() }
    }

    pub fn register(&mut self, optimizer: Arc<dyn Optimizer>) {
        self.optimizers.push(optimizer);
    }

    fn enabled(&self) -> impl Iterator<Item = &Arc<dyn Optimizer>> {
        self.optimizers.iter().filter(|o| o.manifest().enabled)
    }

    /// Runs `process` for every enabled optimizer in order, stopping early
    /// if one sets `skip_remaining`.
    pub async fn process_all(&self, ctx: &mut OptimizerContext) -> Result<(), TranslatorError> {
        for optimizer in self.enabled() {
            optimizer.process(ctx).await?;
            if ctx.skip_remaining {
                break;
            }
        }
        Ok(())
    }

    pub async fn post_process_all(&self, ctx: &mut OptimizerContext) -> Result<(), TranslatorError> {
        for optimizer in self.enabled() {
            optimizer.post_process(ctx).await?;
        }
        Ok(())
    }

    pub fn manifests(&self) -> Vec<OptimizerManifest> {
        self.optimizers.iter().map(|o| o.manifest()).collect()
    }

    pub fn all_stats(&self) -> Value {
        let stats: serde_json::Map<String, Value> = self
            .optimizers
            .iter()
            .map(|o| (o.manifest().name, o.get_stats()))
            .collect();
        Value::Object(stats)
    }

    pub fn set_enabled(&mut self, name: &str, enabled: bool) -> Result<(), TranslatorError> {
        let optimizer = self.optimizers.iter().find(|o| o.manifest().name == name);
        match optimizer {
            Some(optimizer) => {
                let manifest = optimizer.manifest();
                if manifest.essential && !enabled {
                    return Err(TranslatorError::invalid_config(format!("optimizer '{name}' is essential and cannot be disabled")));
                }
                warn!(optimizer = name, enabled, "optimizer toggled; manifest reflects static enabled state only");
                Ok(())
            }
            None => Err(TranslatorError::invalid_config(format!("unknown optimizer '{name}'"))),
        }
    }

    pub fn cleanup_all(&self) {
        for optimizer in &self.optimizers {
            optimizer.cleanup();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, Ordering};

    struct SkipOptimizer {
        skip: AtomicBool,
    }

    #[async_trait]
    impl Optimizer for SkipOptimizer {
        fn manifest(&self) -> OptimizerManifest {
            OptimizerManifest::new("skip", "Skip", "test")
        }

        async fn process(&self, ctx: &mut OptimizerContext) -> Result<(), TranslatorError> {
            if self.skip.load(Ordering::SeqCst) {
                ctx.skip_remaining = true;
            }
            Ok(())
        }
    }

    struct CountingOptimizer {
        ran: std::sync::atomic::AtomicUsize,
    }

    #[async_trait]
    impl Optimizer for CountingOptimizer {
        fn manifest(&self) -> OptimizerManifest {
            OptimizerManifest::new("counter", "Counter", "test")
        }

        async fn process(&self, _ctx: &mut OptimizerContext) -> Result<(), TranslatorError> {
            self.ran.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    #[tokio::test]
    async fn skip_remaining_stops_later_optimizers() {
        let mut host = OptimizerHost::new();
        host.register(Arc::new(SkipOptimizer { skip: AtomicBool::new(true) }));
        let counter = Arc::new(CountingOptimizer { ran: std::sync::atomic::AtomicUsize::new(0) });
        host.register(counter.clone());

        let mut ctx = OptimizerContext::default();
        host.process_all(&mut ctx).await.unwrap();
        assert!(ctx.skip_remaining);
        assert_eq!(counter.ran.load(Ordering::SeqCst), 0);
    }
}
