// ABOUTME: Container observation trait for the engine runtime facade.
// ABOUTME: List managed containers and fetch their image reference and labels.

use super::sealed::Sealed;
use crate::types::ContainerId;
use async_trait::async_trait;
use std::collections::HashMap;

/// Label stamped on every container this tool manages; the locate filter
/// keys on it.
pub const MANAGED_LABEL: &str = "ananeo.managed";
pub const MANAGED_LABEL_VALUE: &str = "engine";

/// Read-only container observation.
///
/// The update core never mutates a container through this trait; all mutation
/// goes through task operations.
#[async_trait]
pub trait ContainerOps: Sealed + Send + Sync {
    /// List containers matching the given filters.
    async fn list_containers(
        &self,
        filters: &ContainerFilters,
    ) -> Result<Vec<EngineContainer>, ContainerError>;

    /// The image reference the container is currently bound to.
    async fn container_image(&self, id: &ContainerId) -> Result<String, ContainerError>;

    /// The container's labels. Implementations return `NotFound` when the
    /// container has disappeared, never for a container that merely has no
    /// labels.
    async fn container_labels(
        &self,
        id: &ContainerId,
    ) -> Result<HashMap<String, String>, ContainerError>;
}

/// Filters for listing containers.
#[derive(Debug, Clone, Default)]
pub struct ContainerFilters {
    /// Filter by label (key=value).
    pub labels: HashMap<String, String>,
    /// Filter by name (supports partial match).
    pub name: Option<String>,
    /// Include stopped containers.
    pub all: bool,
}

impl ContainerFilters {
    /// Filter selecting the managed engine container, including stopped ones
    /// (a stopped engine still needs its task replaced, not a fresh container).
    pub fn for_engine() -> Self {
        let mut labels = HashMap::new();
        labels.insert(MANAGED_LABEL.to_string(), MANAGED_LABEL_VALUE.to_string());
        Self {
            labels,
            name: None,
            all: true,
        }
    }
}

/// Handle to an observed container. Image, labels, and task state are
/// fetched per-call through the facade; nothing here is cached.
#[derive(Debug, Clone)]
pub struct EngineContainer {
    /// Container ID.
    pub id: ContainerId,
    /// Container name.
    pub name: String,
}

/// Errors from container observation.
#[derive(Debug, thiserror::Error)]
pub enum ContainerError {
    #[error("container not found: {0}")]
    NotFound(String),

    #[error("runtime error: {0}")]
    Runtime(String),
}
