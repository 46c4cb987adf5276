// ABOUTME: Task operations trait for the engine runtime facade.
// ABOUTME: Lookup, stop, and start of a container's running task.

use super::sealed::Sealed;
use crate::types::{ContainerId, EngineRef, TaskId};
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

/// Task lifecycle operations.
///
/// A task is the running instance of a container's image, distinct from the
/// container's static definition. Swapping an engine replaces the task while
/// the container identity (name, labels) survives.
///
/// `lookup_task` must report the absence of a task as [`TaskError::NotFound`]:
/// a container without a running task is a recognized state during a swap,
/// not a failure.
#[async_trait]
pub trait TaskOps: Sealed + Send + Sync {
    /// Fetch the running task of a container.
    async fn lookup_task(&self, container: &ContainerId) -> Result<TaskInfo, TaskError>;

    /// Stop a container's task, waiting up to `timeout` before the runtime
    /// kills it.
    async fn stop_task(&self, container: &ContainerId, timeout: Duration)
    -> Result<(), TaskError>;

    /// Start a new task from the given spec. Replaces the task of an
    /// existing container of the same name, or brings up a fresh one.
    async fn start_task(&self, spec: &TaskSpec) -> Result<TaskInfo, TaskError>;
}

/// Specification for starting a task.
#[derive(Debug, Clone)]
pub struct TaskSpec {
    /// Container name the task runs under.
    pub container_name: String,
    /// Image the task is bound to.
    pub image: EngineRef,
    /// Labels carried by the container. Preserved unchanged across swaps.
    pub labels: HashMap<String, String>,
    /// Engine daemon configuration file, bind-mounted read-only into the
    /// task when set.
    pub config_file: Option<PathBuf>,
}

/// Observed task state.
#[derive(Debug, Clone)]
pub struct TaskInfo {
    /// Task ID.
    pub id: TaskId,
    /// Owning container.
    pub container: ContainerId,
    /// Current status.
    pub status: TaskStatus,
}

/// Status of a task as reported by the runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    Running,
    Paused,
    Stopped,
    Unknown,
}

/// Errors from task operations.
#[derive(Debug, thiserror::Error)]
pub enum TaskError {
    #[error("no task found: {0}")]
    NotFound(String),

    #[error("runtime error: {0}")]
    Runtime(String),
}
