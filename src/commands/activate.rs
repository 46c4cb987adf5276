// ABOUTME: Activate and update command implementations.
// ABOUTME: Builds the request from config plus flags and drives the update core.

use super::runtime_connection::connect_to_runtime;
use ananeo::config::EngineConfig;
use ananeo::error::Result;
use ananeo::output::Output;
use ananeo::runtime::RegistryAuth;
use ananeo::update::{
    TaskAliveProbe, UpdateOutcome, UpdateRequest, activate_engine, do_update,
};

enum Mode {
    Activate,
    Update,
}

/// Activate the engine at the requested version, from scratch if necessary.
pub async fn activate(
    config: EngineConfig,
    version: Option<String>,
    auth: Option<RegistryAuth>,
    output: Output,
) -> Result<()> {
    run(config, version, auth, output, Mode::Activate).await
}

/// Update a previously activated engine in place.
pub async fn update(
    config: EngineConfig,
    version: Option<String>,
    auth: Option<RegistryAuth>,
    output: Output,
) -> Result<()> {
    run(config, version, auth, output, Mode::Update).await
}

async fn run(
    config: EngineConfig,
    version: Option<String>,
    auth: Option<RegistryAuth>,
    mut output: Output,
    mode: Mode,
) -> Result<()> {
    output.start_timer();

    let request = build_request(&config, version);
    let runtime = connect_to_runtime(&config, &output)?;
    let probe = TaskAliveProbe::new(
        &runtime,
        config.probe.interval,
        config.probe.retries,
        config.probe.start_period,
    );

    let outcome = match mode {
        Mode::Activate => {
            activate_engine(&runtime, &request, auth.as_ref(), &probe, &output).await?
        }
        Mode::Update => do_update(&runtime, &request, auth.as_ref(), &probe, &output).await?,
    };

    match outcome {
        UpdateOutcome::NoChangeNeeded => {
            output.success(&format!(
                "Engine already running version {}",
                request.target_version
            ));
        }
        UpdateOutcome::Updated(reference) => {
            output.success(&format!("Engine now running {}", reference));
        }
    }

    Ok(())
}

fn build_request(config: &EngineConfig, version: Option<String>) -> UpdateRequest {
    UpdateRequest {
        // An absent version stays empty so the core reports the user error;
        // it is never defaulted to "latest".
        target_version: version.or_else(|| config.version.clone()).unwrap_or_default(),
        registry_prefix: config.registry_prefix.clone(),
        config_file: config.config_file.clone(),
        engine_image: config.engine_image.clone(),
    }
}
