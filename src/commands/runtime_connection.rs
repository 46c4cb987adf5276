// ABOUTME: Shared runtime connection for command handlers.
// ABOUTME: Detects the local runtime socket and connects a bollard client.

use ananeo::config::EngineConfig;
use ananeo::error::Result;
use ananeo::output::Output;
use ananeo::runtime::{BollardRuntime, RuntimeError, detect_runtime};

pub fn connect_to_runtime(config: &EngineConfig, output: &Output) -> Result<BollardRuntime> {
    let info = detect_runtime(config.runtime.as_ref()).map_err(RuntimeError::from)?;

    output.progress(&format!(
        "  → Using {} via {}",
        info.runtime_type, info.socket_path
    ));

    let runtime = BollardRuntime::connect(&info).map_err(RuntimeError::from)?;
    Ok(runtime)
}
