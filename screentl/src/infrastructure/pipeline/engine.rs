// screentl
// SPDX-License-Identifier: BSD-3-Clause

//! # Pipeline Engine
//!
//! The engine owns the registered stage graph (capture, preprocess, OCR,
//! validate, translate, overlay by default, though callers may register
//! additional stages) and executes it in dependency order for every
//! captured frame.
//!
//! ## Registration and ordering
//!
//! Stages are registered with a list of the stage names they depend on.
//! The engine recomputes a topological order on every registration rather
//! than requiring registration in dependency order, so stages can be wired
//! up in whatever order is convenient for the caller. A cycle in the
//! dependency graph is rejected at registration time.
//!
//! ## Execution
//!
//! `execute` walks the stage order, skipping disabled stages and stages
//! whose `can_execute` reports false (e.g. an open circuit breaker), and
//! invokes any registered pre/post callbacks around each stage run.

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use screentl_domain::entities::{Frame, StageResult};
use screentl_domain::error::TranslatorError;
use screentl_domain::value_objects::PipelineState;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use super::stage::Stage;

/// Hook invoked immediately before and after each stage runs.
#[async_trait]
pub trait StageCallback: Send + Sync {
    async fn before_stage(&self, _stage_name: &str, _frame: &Frame) {}
    async fn after_stage(&self, _result: &StageResult) {}
}

struct StageNode {
    stage: Arc<dyn Stage>,
    depends_on: Vec<String>,
    enabled: bool,
}

/// Coordinates execution of the registered stage graph against each
/// incoming frame.
pub struct PipelineEngine {
    stages: RwLock<HashMap<String, StageNode>>,
    order: RwLock<Vec<String>>,
    state: RwLock<PipelineState>,
    pre_callbacks: RwLock<Vec<Arc<dyn StageCallback>>>,
    post_callbacks: RwLock<Vec<Arc<dyn StageCallback>>>,
}

impl Default for PipelineEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineEngine {
    pub fn new() -> Self {
        Self {
            stages: RwLock::new(HashMap::new()),
            order: RwLock::new(Vec::new()),
            state: RwLock::new(PipelineState::Idle),
            pre_callbacks: RwLock::new(Vec::new()),
            post_callbacks: RwLock::new(Vec::new()),
        }
    }

    /// Registers a stage and the names of the stages it depends on.
    /// Recomputes and validates the full topological order immediately,
    /// returning an error (and leaving the previous registration in place)
    /// if the new graph contains a cycle or an unknown dependency.
    pub async fn register_stage(&self, stage: Arc<dyn Stage>, depends_on: &[&str]) -> Result<(), TranslatorError> {
        stage.validate_configuration()?;
        let name = stage.name().to_string();
        let depends_on: Vec<String> = depends_on.iter().map(|s| s.to_string()).collect();

        let mut stages = self.stages.write().await;
        stages.insert(
            name,
            StageNode {
                stage,
                depends_on,
                enabled: true,
            },
        );
        let order = Self::topological_order(&stages)?;
        drop(stages);
        *self.order.write().await = order;
        Ok(())
    }

    fn topological_order(stages: &HashMap<String, StageNode>) -> Result<Vec<String>, TranslatorError> {
        let mut in_degree: HashMap<&str, usize> = HashMap::new();
        let mut dependents: HashMap<&str, Vec<&str>> = HashMap::new();

        for name in stages.keys() {
            in_degree.entry(name).or_insert(0);
        }
        for (name, node) in stages {
            for dep in &node.depends_on {
                if !stages.contains_key(dep) {
                    return Err(TranslatorError::invalid_config(format!(
                        "stage '{name}' depends on unregistered stage '{dep}'"
                    )));
                }
                *in_degree.get_mut(name.as_str()).unwrap() += 1;
                dependents.entry(dep.as_str()).or_default().push(name.as_str());
            }
        }

        let mut queue: VecDeque<&str> = in_degree
            .iter()
            .filter(|(_, &deg)| deg == 0)
            .map(|(&name, _)| name)
            .collect();
        let mut sorted_names: Vec<&str> = Vec::with_capacity(stages.len());
        let mut remaining = in_degree.clone();

        while let Some(name) = queue.pop_front() {
            sorted_names.push(name);
            if let Some(children) = dependents.get(name) {
                for &child in children {
                    let deg = remaining.get_mut(child).unwrap();
                    *deg -= 1;
                    if *deg == 0 {
                        queue.push_back(child);
                    }
                }
            }
        }

        if sorted_names.len() != stages.len() {
            return Err(TranslatorError::invalid_config(
                "stage dependency graph contains a cycle",
            ));
        }

        Ok(sorted_names.into_iter().map(|s| s.to_string()).collect())
    }

    pub async fn enable(&self, name: &str) {
        if let Some(node) = self.stages.write().await.get_mut(name) {
            node.enabled = true;
            info!(stage = name, "stage enabled");
        }
    }

    pub async fn disable(&self, name: &str) {
        if let Some(node) = self.stages.write().await.get_mut(name) {
            node.enabled = false;
            info!(stage = name, "stage disabled");
        }
    }

    pub async fn register_pre_callback(&self, callback: Arc<dyn StageCallback>) {
        self.pre_callbacks.write().await.push(callback);
    }

    pub async fn register_post_callback(&self, callback: Arc<dyn StageCallback>) {
        self.post_callbacks.write().await.push(callback);
    }

    pub async fn state(&self) -> PipelineState {
        *self.state.read().await
    }

    pub async fn set_state(&self, state: PipelineState) {
        *self.state.write().await = state;
    }

    /// Runs every enabled, runnable stage in dependency order against
    /// `frame`, returning one `StageResult` per stage actually attempted.
    /// A stage failure is recorded in its `StageResult` but does not stop
    /// later independent stages in the same pass — the caller (application
    /// orchestrator) decides whether a given stage's failure should abort
    /// the frame.
    pub async fn execute(&self, frame: &Frame) -> Result<Vec<StageResult>, TranslatorError> {
        let order = self.order.read().await.clone();
        let stages = self.stages.read().await;
        let mut results = Vec::with_capacity(order.len());

        for name in &order {
            let Some(node) = stages.get(name) else { continue };
            if !node.enabled || !node.stage.can_execute() {
                debug!(stage = %name, "skipping disabled or unavailable stage");
                continue;
            }

            for cb in self.pre_callbacks.read().await.iter() {
                cb.before_stage(name, frame).await;
            }

            let started = Instant::now();
            let outcome = node.stage.execute(frame).await;
            let result = match outcome {
                Ok(()) => StageResult::success(name.clone(), started.elapsed()),
                Err(err) => {
                    warn!(stage = %name, error = %err, "stage execution failed");
                    StageResult::failure(name.clone(), started.elapsed(), err.to_string())
                }
            };

            for cb in self.post_callbacks.read().await.iter() {
                cb.after_stage(&result).await;
            }

            results.push(result);
        }

        Ok(results)
    }

    pub async fn registered_stage_names(&self) -> Vec<String> {
        self.order.read().await.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct RecordingStage {
        name: &'static str,
        calls: Arc<AtomicUsize>,
        fail: bool,
    }

    #[async_trait]
    impl Stage for RecordingStage {
        fn name(&self) -> &str {
            self.name
        }

        async fn execute(&self, _frame: &Frame) -> Result<(), TranslatorError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(TranslatorError::internal("boom"));
            }
            Ok(())
        }
    }

    fn frame() -> Frame {
        Frame::new("region-a", 0, 1, 1, vec![0u8; 4]).unwrap()
    }

    #[tokio::test]
    async fn executes_stages_in_dependency_order() {
        let engine = PipelineEngine::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let order_log: Arc<RwLock<Vec<&'static str>>> = Arc::new(RwLock::new(Vec::new()));

        for name in ["capture", "ocr", "translate"] {
            let order_log = order_log.clone();
            struct Logged {
                name: &'static str,
                log: Arc<RwLock<Vec<&'static str>>>,
            }
            #[async_trait]
            impl Stage for Logged {
                fn name(&self) -> &str {
                    self.name
                }
                async fn execute(&self, _frame: &Frame) -> Result<(), TranslatorError> {
                    self.log.write().await.push(self.name);
                    Ok(())
                }
            }
            let deps: &[&str] = match name {
                "ocr" => &["capture"],
                "translate" => &["ocr"],
                _ => &[],
            };
            engine
                .register_stage(Arc::new(Logged { name, log: order_log }), deps)
                .await
                .unwrap();
        }

        engine.execute(&frame()).await.unwrap();
        assert_eq!(*order_log.read().await, vec!["capture", "ocr", "translate"]);
        let _ = calls;
    }

    #[tokio::test]
    async fn rejects_cyclic_dependencies() {
        let engine = PipelineEngine::new();
        let calls = Arc::new(AtomicUsize::new(0));
        engine
            .register_stage(
                Arc::new(RecordingStage { name: "a", calls: calls.clone(), fail: false }),
                &["b"],
            )
            .await
            .unwrap();
        let result = engine
            .register_stage(
                Arc::new(RecordingStage { name: "b", calls, fail: false }),
                &["a"],
            )
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn disabled_stage_is_skipped() {
        let engine = PipelineEngine::new();
        let calls = Arc::new(AtomicUsize::new(0));
        engine
            .register_stage(Arc::new(RecordingStage { name: "capture", calls: calls.clone(), fail: false }), &[])
            .await
            .unwrap();
        engine.disable("capture").await;
        let results = engine.execute(&frame()).await.unwrap();
        assert!(results.is_empty());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn failed_stage_result_does_not_abort_remaining_stages() {
        let engine = PipelineEngine::new();
        let calls = Arc::new(AtomicUsize::new(0));
        engine
            .register_stage(Arc::new(RecordingStage { name: "ocr", calls: calls.clone(), fail: true }), &[])
            .await
            .unwrap();
        engine
            .register_stage(Arc::new(RecordingStage { name: "translate", calls: calls.clone(), fail: false }), &[])
            .await
            .unwrap();
        let results = engine.execute(&frame()).await.unwrap();
        assert_eq!(results.len(), 2);
        assert!(!results[0].succeeded);
        assert!(results[1].succeeded);
    }
}
