// ABOUTME: Status command implementation.
// ABOUTME: Reports the managed engine container, its version, and task state.

use super::runtime_connection::connect_to_runtime;
use ananeo::config::EngineConfig;
use ananeo::error::Result;
use ananeo::output::Output;
use ananeo::runtime::{ContainerOps, TaskError, TaskOps};
use ananeo::types::EngineRef;
use ananeo::update::{UpdateError, find_engine_container};

pub async fn status(config: EngineConfig, output: Output) -> Result<()> {
    let runtime = connect_to_runtime(&config, &output)?;

    let Some(container) = find_engine_container(&runtime).await? else {
        output.success("No engine container found");
        return Ok(());
    };

    let reference = runtime
        .container_image(&container.id)
        .await
        .map_err(UpdateError::from)?;

    let task_state = match runtime.lookup_task(&container.id).await {
        Ok(task) => format!("{:?}", task.status).to_lowercase(),
        Err(TaskError::NotFound(_)) => "stopped".to_string(),
        Err(e) => return Err(UpdateError::from(e).into()),
    };

    match EngineRef::extract_version(&reference, &config.registry_prefix, &config.engine_image) {
        Some(version) => output.success(&format!(
            "{}: version {} ({}), task {}",
            container.name, version, reference, task_state
        )),
        None => output.success(&format!(
            "{}: unmanaged image {}, task {}",
            container.name, reference, task_state
        )),
    }

    Ok(())
}
