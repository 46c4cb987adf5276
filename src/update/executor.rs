// ABOUTME: Pull-and-swap execution: resolve the target image, replace the engine task.
// ABOUTME: Local image lookup first, registry pull on miss, labels preserved across the swap.

use crate::output::Output;
use crate::runtime::{
    ContainerError, EngineContainer, EngineRuntime, ImageError, ImageHandle, MANAGED_LABEL,
    MANAGED_LABEL_VALUE, RegistryAuth, TaskError, TaskInfo, TaskSpec,
};
use crate::types::EngineRef;
use crate::update::error::UpdateError;
use crate::update::health::HealthProbe;
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

/// Container name used when activating on a host with no prior engine.
pub const ENGINE_CONTAINER_NAME: &str = "engine";

/// Grace period before the runtime kills a task that ignores the stop signal.
const STOP_TIMEOUT: Duration = Duration::from_secs(30);

/// Resolve the target image: use the local copy when present, pull on miss.
///
/// The two failure paths are attributed separately. A lookup error that is
/// not not-found means the runtime itself misbehaved ("check for image"); a
/// failed pull means the registry transfer did ("unable to pull").
pub(crate) async fn resolve_image<R>(
    runtime: &R,
    target: &EngineRef,
    auth: Option<&RegistryAuth>,
    output: &Output,
) -> Result<ImageHandle, UpdateError>
where
    R: EngineRuntime,
{
    match runtime.get_image(target).await {
        Ok(image) => {
            output.progress(&format!("  → Image {} already present", target));
            Ok(image)
        }
        Err(ImageError::NotFound(_)) => {
            output.progress(&format!("  → Pulling {}...", target));
            runtime
                .pull_image(target, auth)
                .await
                .map_err(|source| UpdateError::Pull {
                    reference: target.to_string(),
                    source,
                })
        }
        Err(source) => Err(UpdateError::ImageLookup {
            reference: target.to_string(),
            source,
        }),
    }
}

/// Replace the engine's task with one bound to `target`.
///
/// When `existing` is present its labels are carried over unchanged and its
/// container name is kept; a first activation stamps the managed-engine
/// label so later runs can locate the container.
pub async fn pull_and_swap<R, H>(
    runtime: &R,
    existing: Option<&EngineContainer>,
    target: &EngineRef,
    config_file: Option<&Path>,
    auth: Option<&RegistryAuth>,
    probe: &H,
    output: &Output,
) -> Result<TaskInfo, UpdateError>
where
    R: EngineRuntime,
    H: HealthProbe + ?Sized,
{
    let image = resolve_image(runtime, target, auth, output).await?;

    let labels = match existing {
        Some(container) => match runtime.container_labels(&container.id).await {
            Ok(labels) => labels,
            // Partial/legacy state: a container without label metadata still
            // gets its task swapped.
            Err(ContainerError::NotFound(_)) => HashMap::new(),
            Err(e) => return Err(e.into()),
        },
        None => {
            let mut labels = HashMap::new();
            labels.insert(MANAGED_LABEL.to_string(), MANAGED_LABEL_VALUE.to_string());
            labels
        }
    };

    if let Some(container) = existing {
        match runtime.lookup_task(&container.id).await {
            Ok(_) => {
                output.progress("  → Stopping current engine task...");
                runtime.stop_task(&container.id, STOP_TIMEOUT).await?;
            }
            // No running task: nothing to stop, a fresh one is created below.
            Err(TaskError::NotFound(_)) => {}
            Err(e) => return Err(UpdateError::Swap(e)),
        }
    }

    let container_name = existing
        .map(|c| c.name.clone())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| ENGINE_CONTAINER_NAME.to_string());

    let spec = TaskSpec {
        container_name,
        image: target.clone(),
        labels,
        config_file: config_file.map(Path::to_path_buf),
    };

    output.progress(&format!("  → Starting engine task on {}...", image.reference));
    let task = runtime.start_task(&spec).await?;

    output.progress("  → Waiting for the engine to come up...");
    probe.check(&task.container).await?;

    Ok(task)
}
