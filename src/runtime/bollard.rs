// ABOUTME: Bollard-based engine runtime implementation.
// ABOUTME: Supports both Docker and Podman via Docker-compatible API.

use crate::runtime::traits::sealed::Sealed;
use crate::runtime::traits::{
    ContainerError, ContainerFilters, ContainerOps, EngineContainer, ImageError, ImageHandle,
    ImageOps, RegistryAuth, TaskError, TaskInfo, TaskOps, TaskSpec, TaskStatus,
};
use crate::runtime::types::RuntimeType;
use crate::types::{ContainerId, EngineRef, ImageId, TaskId};
use async_trait::async_trait;
use bollard::Docker;
use bollard::models::{
    ContainerCreateBody, ContainerStateStatusEnum, HostConfig, Mount, MountTypeEnum,
    RestartPolicy, RestartPolicyNameEnum,
};
use bollard::query_parameters::{
    CreateContainerOptions, CreateImageOptions, InspectContainerOptions, ListContainersOptions,
    RemoveContainerOptions, StartContainerOptions, StopContainerOptions,
};
use futures::StreamExt;
use std::collections::HashMap;
use std::time::Duration;

/// Failure to reach the runtime socket.
#[derive(Debug, thiserror::Error)]
#[error("failed to connect to {socket}: {message}")]
pub struct ConnectionError {
    pub socket: String,
    pub message: String,
}

// =============================================================================
// Error Mapping Helpers
// =============================================================================

fn map_container_inspect_error(e: bollard::errors::Error) -> ContainerError {
    match &e {
        bollard::errors::Error::DockerResponseServerError {
            status_code,
            message,
        } if *status_code == 404 => ContainerError::NotFound(message.clone()),
        _ => ContainerError::Runtime(e.to_string()),
    }
}

fn map_task_stop_error(e: bollard::errors::Error) -> Option<TaskError> {
    match &e {
        bollard::errors::Error::DockerResponseServerError {
            status_code,
            message,
        } if *status_code == 404 => Some(TaskError::NotFound(message.clone())),
        // 304: the task is already stopped, which is what a stop wants.
        bollard::errors::Error::DockerResponseServerError {
            status_code: 304, ..
        } => None,
        _ => Some(TaskError::Runtime(e.to_string())),
    }
}

fn map_task_start_error(e: bollard::errors::Error) -> TaskError {
    match &e {
        bollard::errors::Error::DockerResponseServerError {
            status_code,
            message,
        } if *status_code == 404 => TaskError::NotFound(message.clone()),
        _ => TaskError::Runtime(e.to_string()),
    }
}

fn task_status(state: Option<&ContainerStateStatusEnum>) -> TaskStatus {
    match state {
        Some(ContainerStateStatusEnum::RUNNING) => TaskStatus::Running,
        Some(ContainerStateStatusEnum::RESTARTING) => TaskStatus::Running,
        Some(ContainerStateStatusEnum::PAUSED) => TaskStatus::Paused,
        Some(ContainerStateStatusEnum::CREATED)
        | Some(ContainerStateStatusEnum::EXITED)
        | Some(ContainerStateStatusEnum::DEAD)
        | Some(ContainerStateStatusEnum::REMOVING) => TaskStatus::Stopped,
        _ => TaskStatus::Unknown,
    }
}

// =============================================================================
// Runtime
// =============================================================================

/// Engine runtime backed by a local Docker or Podman daemon.
pub struct BollardRuntime {
    client: Docker,
    runtime_type: RuntimeType,
}

impl Sealed for BollardRuntime {}

impl BollardRuntime {
    /// Create a new BollardRuntime from a Docker client.
    pub fn new(client: Docker, runtime_type: RuntimeType) -> Self {
        Self {
            client,
            runtime_type,
        }
    }

    /// Connect to a container runtime using detected runtime info.
    ///
    /// Use with `detect_runtime()` to connect to whatever is available locally.
    pub fn connect(info: &super::types::RuntimeInfo) -> Result<Self, ConnectionError> {
        let client =
            Docker::connect_with_unix(&info.socket_path, 120, bollard::API_DEFAULT_VERSION)
                .map_err(|e| ConnectionError {
                    socket: info.socket_path.clone(),
                    message: e.to_string(),
                })?;
        Ok(Self::new(client, info.runtime_type))
    }

    /// Get the runtime type (Docker or Podman).
    pub fn runtime_type(&self) -> RuntimeType {
        self.runtime_type
    }

    /// Remove any container occupying the given name. Missing is fine.
    async fn remove_named_container(&self, name: &str) -> Result<(), TaskError> {
        let opts = RemoveContainerOptions {
            force: true,
            ..Default::default()
        };
        match self.client.remove_container(name, Some(opts)).await {
            Ok(()) => Ok(()),
            Err(bollard::errors::Error::DockerResponseServerError {
                status_code: 404, ..
            }) => Ok(()),
            Err(e) => Err(TaskError::Runtime(e.to_string())),
        }
    }
}

#[async_trait]
impl ContainerOps for BollardRuntime {
    async fn list_containers(
        &self,
        filters: &ContainerFilters,
    ) -> Result<Vec<EngineContainer>, ContainerError> {
        let mut filter_map: HashMap<String, Vec<String>> = HashMap::new();

        if let Some(ref name) = filters.name {
            filter_map.insert("name".to_string(), vec![name.clone()]);
        }

        for (key, value) in &filters.labels {
            filter_map
                .entry("label".to_string())
                .or_default()
                .push(format!("{}={}", key, value));
        }

        let opts = ListContainersOptions {
            all: filters.all,
            filters: Some(filter_map),
            ..Default::default()
        };

        let containers = self
            .client
            .list_containers(Some(opts))
            .await
            .map_err(|e| ContainerError::Runtime(e.to_string()))?;

        Ok(containers
            .into_iter()
            .map(|c| {
                let id = c.id.unwrap_or_default();
                let name = c
                    .names
                    .unwrap_or_default()
                    .first()
                    .map(|n| n.trim_start_matches('/').to_string())
                    .unwrap_or_default();

                EngineContainer {
                    id: ContainerId::new(id),
                    name,
                }
            })
            .collect())
    }

    async fn container_image(&self, id: &ContainerId) -> Result<String, ContainerError> {
        let details = self
            .client
            .inspect_container(id.as_str(), None::<InspectContainerOptions>)
            .await
            .map_err(map_container_inspect_error)?;

        // Config.Image holds the reference the container was created from,
        // which is what version comparison needs; .Image is the content digest.
        Ok(details
            .config
            .and_then(|c| c.image)
            .unwrap_or_default())
    }

    async fn container_labels(
        &self,
        id: &ContainerId,
    ) -> Result<HashMap<String, String>, ContainerError> {
        let details = self
            .client
            .inspect_container(id.as_str(), None::<InspectContainerOptions>)
            .await
            .map_err(map_container_inspect_error)?;

        Ok(details
            .config
            .and_then(|c| c.labels)
            .unwrap_or_default())
    }
}

#[async_trait]
impl TaskOps for BollardRuntime {
    async fn lookup_task(&self, container: &ContainerId) -> Result<TaskInfo, TaskError> {
        let details = self
            .client
            .inspect_container(container.as_str(), None::<InspectContainerOptions>)
            .await
            .map_err(|e| match &e {
                bollard::errors::Error::DockerResponseServerError {
                    status_code,
                    message,
                } if *status_code == 404 => TaskError::NotFound(message.clone()),
                _ => TaskError::Runtime(e.to_string()),
            })?;

        let status = task_status(details.state.as_ref().and_then(|s| s.status.as_ref()));
        if status == TaskStatus::Stopped || status == TaskStatus::Unknown {
            return Err(TaskError::NotFound(format!(
                "container {} has no running task",
                container
            )));
        }

        Ok(TaskInfo {
            id: TaskId::new(details.id.unwrap_or_else(|| container.as_str().to_string())),
            container: container.clone(),
            status,
        })
    }

    async fn stop_task(
        &self,
        container: &ContainerId,
        timeout: Duration,
    ) -> Result<(), TaskError> {
        let opts = StopContainerOptions {
            t: Some(timeout.as_secs() as i32),
            signal: None,
        };

        match self.client.stop_container(container.as_str(), Some(opts)).await {
            Ok(()) => Ok(()),
            Err(e) => match map_task_stop_error(e) {
                None => Ok(()),
                Some(err) => Err(err),
            },
        }
    }

    async fn start_task(&self, spec: &TaskSpec) -> Result<TaskInfo, TaskError> {
        // The Docker-compatible API has no task replacement: the container
        // definition carries the image binding. Recreating under the same
        // name with the same labels preserves the container identity.
        self.remove_named_container(&spec.container_name).await?;

        let mut host_config = HostConfig {
            restart_policy: Some(RestartPolicy {
                name: Some(RestartPolicyNameEnum::UNLESS_STOPPED),
                maximum_retry_count: None,
            }),
            ..Default::default()
        };

        if let Some(ref config_file) = spec.config_file {
            let path = config_file.to_string_lossy().to_string();
            host_config.mounts = Some(vec![Mount {
                source: Some(path.clone()),
                target: Some(path),
                typ: Some(MountTypeEnum::BIND),
                read_only: Some(true),
                ..Default::default()
            }]);
        }

        let body = ContainerCreateBody {
            image: Some(spec.image.to_string()),
            labels: Some(spec.labels.clone()),
            host_config: Some(host_config),
            ..Default::default()
        };

        let opts = CreateContainerOptions {
            name: Some(spec.container_name.clone()),
            ..Default::default()
        };

        let created = self
            .client
            .create_container(Some(opts), body)
            .await
            .map_err(map_task_start_error)?;

        if let Err(e) = self
            .client
            .start_container(&created.id, None::<StartContainerOptions>)
            .await
        {
            // Clean up the created container on start failure
            let _ = self.remove_named_container(&spec.container_name).await;
            return Err(map_task_start_error(e));
        }

        Ok(TaskInfo {
            id: TaskId::new(created.id.clone()),
            container: ContainerId::new(created.id),
            status: TaskStatus::Running,
        })
    }
}

#[async_trait]
impl ImageOps for BollardRuntime {
    async fn get_image(&self, reference: &EngineRef) -> Result<ImageHandle, ImageError> {
        let image_name = reference.to_string();

        match self.client.inspect_image(&image_name).await {
            Ok(details) => Ok(ImageHandle {
                id: details.id.map(ImageId::new),
                reference: image_name,
            }),
            Err(bollard::errors::Error::DockerResponseServerError {
                status_code: 404, ..
            }) => Err(ImageError::NotFound(image_name)),
            Err(e) => Err(ImageError::Runtime(format!(
                "failed to inspect {}: {}",
                image_name, e
            ))),
        }
    }

    async fn pull_image(
        &self,
        reference: &EngineRef,
        auth: Option<&RegistryAuth>,
    ) -> Result<ImageHandle, ImageError> {
        let image_name = reference.to_string();

        let opts = CreateImageOptions {
            from_image: Some(image_name.clone()),
            ..Default::default()
        };

        let credentials = auth.map(|a| bollard::auth::DockerCredentials {
            username: Some(a.username.clone()),
            password: Some(a.password.clone()),
            serveraddress: a.server.clone(),
            ..Default::default()
        });

        // Pull returns a stream of progress updates - consume it
        let mut stream = self.client.create_image(Some(opts), None, credentials);
        while let Some(result) = stream.next().await {
            result.map_err(|e| ImageError::PullFailed(e.to_string()))?;
        }

        // The pulled image id is advisory; a lookup failure here is not a
        // pull failure.
        let id = self
            .client
            .inspect_image(&image_name)
            .await
            .ok()
            .and_then(|details| details.id)
            .map(ImageId::new);

        Ok(ImageHandle {
            id,
            reference: image_name,
        })
    }
}
