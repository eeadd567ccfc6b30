// screentl
// SPDX-License-Identifier: BSD-3-Clause

//! Supervised task spawning: wraps `tokio::spawn` so that background task
//! outcomes are always logged and joined, never silently dropped.

use screentl_domain::error::TranslatorError;
use tokio::task::JoinHandle;
use tracing::{debug, error};

pub type AppResult<T> = Result<T, TranslatorError>;

pub fn spawn_supervised<F, T>(name: &'static str, fut: F) -> JoinHandle<AppResult<T>>
where
    F: std::future::Future<Output = AppResult<T>> + Send + 'static,
    T: Send + 'static,
{
    debug!(task = name, "task starting");

    tokio::spawn(async move {
        let result = fut.await;
        match &result {
            Ok(_) => debug!(task = name, "task completed"),
            Err(e) => error!(task = name, error = ?e, "task failed"),
        }
        result
    })
}

pub async fn join_supervised<T>(handle: JoinHandle<AppResult<T>>) -> AppResult<T> {
    match handle.await {
        Ok(task_result) => task_result,
        Err(e) if e.is_panic() => Err(TranslatorError::internal(format!("task panicked: {e}"))),
        Err(e) if e.is_cancelled() => Err(TranslatorError::Cancelled),
        Err(e) => Err(TranslatorError::internal(format!("task join failed: {e}"))),
    }
}
