// ABOUTME: Activation orchestrator: locate the engine container and drive the update.
// ABOUTME: Entry points activate_engine (first activation allowed) and do_update.

use crate::output::Output;
use crate::runtime::{
    ContainerError, ContainerFilters, ContainerOps, EngineContainer, EngineRuntime, RegistryAuth,
};
use crate::update::decision::{UpdateDecision, decide};
use crate::update::error::UpdateError;
use crate::update::executor::pull_and_swap;
use crate::update::health::HealthProbe;
use crate::update::request::UpdateRequest;
use crate::update::UpdateOutcome;

/// Locate the managed engine container, if any.
///
/// At most one container is expected to carry the managed-engine label.
/// When several do, the first match wins and the rest are reported; picking
/// one keeps updates possible on hosts that accumulated a stray container.
pub async fn find_engine_container<R: ContainerOps>(
    runtime: &R,
) -> Result<Option<EngineContainer>, UpdateError> {
    let containers = runtime
        .list_containers(&ContainerFilters::for_engine())
        .await?;

    if containers.len() > 1 {
        let ignored: Vec<&str> = containers[1..].iter().map(|c| c.id.as_str()).collect();
        tracing::warn!(
            chosen = %containers[0].id,
            ?ignored,
            "multiple containers carry the managed engine label"
        );
    }

    Ok(containers.into_iter().next())
}

/// Activate the engine at the requested version.
///
/// Unlike [`do_update`], a host with no engine container at all is valid
/// here: that is a first activation, which goes straight to pull-and-swap.
/// Activation always finishes with the health probe, including on the
/// nothing-to-do path.
pub async fn activate_engine<R, H>(
    runtime: &R,
    request: &UpdateRequest,
    auth: Option<&RegistryAuth>,
    probe: &H,
    output: &Output,
) -> Result<UpdateOutcome, UpdateError>
where
    R: EngineRuntime,
    H: HealthProbe + ?Sized,
{
    request.validate()?;
    let target = request.target_ref();

    let existing = find_engine_container(runtime).await?;
    match existing {
        None => {
            output.progress("  → No engine container found, first activation");
            pull_and_swap(
                runtime,
                None,
                &target,
                Some(&request.config_file),
                auth,
                probe,
                output,
            )
            .await?;
            Ok(UpdateOutcome::Updated(target))
        }
        Some(container) => {
            let current = current_image(runtime, &container).await?;
            if decide(current.as_deref(), &target) == UpdateDecision::NoChangeNeeded {
                output.progress(&format!("  → Engine already running {}", target));
                probe.check(&container.id).await?;
                return Ok(UpdateOutcome::NoChangeNeeded);
            }
            pull_and_swap(
                runtime,
                Some(&container),
                &target,
                Some(&request.config_file),
                auth,
                probe,
                output,
            )
            .await?;
            Ok(UpdateOutcome::Updated(target))
        }
    }
}

/// Update a previously activated engine to the requested version.
///
/// The empty-version check runs before any runtime call, so a bad request
/// fails identically whether or not a daemon is reachable. A matching
/// version is a pure no-op: no pull, no swap, no health re-check.
pub async fn do_update<R, H>(
    runtime: &R,
    request: &UpdateRequest,
    auth: Option<&RegistryAuth>,
    probe: &H,
    output: &Output,
) -> Result<UpdateOutcome, UpdateError>
where
    R: EngineRuntime,
    H: HealthProbe + ?Sized,
{
    request.validate()?;
    let target = request.target_ref();

    let existing = find_engine_container(runtime).await?;
    if let Some(ref container) = existing {
        let current = current_image(runtime, container).await?;
        if decide(current.as_deref(), &target) == UpdateDecision::NoChangeNeeded {
            output.progress(&format!("  → Engine already running {}", target));
            return Ok(UpdateOutcome::NoChangeNeeded);
        }
    }

    pull_and_swap(
        runtime,
        existing.as_ref(),
        &target,
        Some(&request.config_file),
        auth,
        probe,
        output,
    )
    .await?;
    Ok(UpdateOutcome::Updated(target))
}

/// The image reference the container is bound to, or `None` when the
/// container vanished between listing and inspection.
async fn current_image<R: ContainerOps>(
    runtime: &R,
    container: &EngineContainer,
) -> Result<Option<String>, UpdateError> {
    match runtime.container_image(&container.id).await {
        Ok(reference) => Ok(Some(reference)),
        Err(ContainerError::NotFound(_)) => Ok(None),
        Err(e) => Err(e.into()),
    }
}
