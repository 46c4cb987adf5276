// ABOUTME: Health probe capability injected into the update workflow.
// ABOUTME: Production readiness means the engine task reports running.

use crate::runtime::{TaskError, TaskOps, TaskStatus};
use crate::types::ContainerId;
use async_trait::async_trait;
use std::time::Duration;

/// Probe failure.
#[derive(Debug, thiserror::Error)]
#[error("engine is not ready: {0}")]
pub struct HealthCheckError(pub String);

/// Readiness check run against the freshly swapped engine instance.
///
/// Injected per call: production uses [`TaskAliveProbe`], tests substitute
/// their own semantics.
#[async_trait]
pub trait HealthProbe: Send + Sync {
    async fn check(&self, container: &ContainerId) -> Result<(), HealthCheckError>;
}

/// Probe that polls the task lookup until the task reports running.
pub struct TaskAliveProbe<'a, R: TaskOps> {
    runtime: &'a R,
    interval: Duration,
    retries: u32,
    start_period: Duration,
}

impl<'a, R: TaskOps> TaskAliveProbe<'a, R> {
    pub fn new(runtime: &'a R, interval: Duration, retries: u32, start_period: Duration) -> Self {
        Self {
            runtime,
            interval,
            retries,
            start_period,
        }
    }
}

#[async_trait]
impl<R: TaskOps> HealthProbe for TaskAliveProbe<'_, R> {
    async fn check(&self, container: &ContainerId) -> Result<(), HealthCheckError> {
        if self.start_period > Duration::ZERO {
            tokio::time::sleep(self.start_period).await;
        }

        let mut retries_remaining = self.retries;
        loop {
            let failure = match self.runtime.lookup_task(container).await {
                Ok(task) if task.status == TaskStatus::Running => return Ok(()),
                Ok(task) => format!("task is {:?}", task.status),
                Err(TaskError::NotFound(msg)) => msg,
                Err(TaskError::Runtime(msg)) => msg,
            };

            if retries_remaining == 0 {
                tracing::debug!(container = %container, "engine readiness probe gave up: {failure}");
                return Err(HealthCheckError(failure));
            }
            retries_remaining -= 1;
            tokio::time::sleep(self.interval).await;
        }
    }
}
