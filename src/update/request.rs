// ABOUTME: The activation/update request and its validation.
// ABOUTME: Carries the target version, registry prefix, image name, and engine config path.

use crate::types::EngineRef;
use crate::update::error::UpdateError;
use std::path::PathBuf;

/// What the caller wants activated.
#[derive(Debug, Clone)]
pub struct UpdateRequest {
    /// Version to activate. Must be non-empty; never defaulted.
    pub target_version: String,
    /// Registry prefix the engine image lives under (e.g. `docker.io/acme`).
    pub registry_prefix: String,
    /// Engine daemon configuration file, mounted into the new task.
    pub config_file: PathBuf,
    /// Engine image name under the registry prefix.
    pub engine_image: String,
}

impl UpdateRequest {
    /// Reject requests without a target version before anything else runs.
    pub fn validate(&self) -> Result<(), UpdateError> {
        if self.target_version.is_empty() {
            return Err(UpdateError::NoVersionSpecified);
        }
        Ok(())
    }

    /// The fully-qualified image reference this request asks for.
    pub fn target_ref(&self) -> EngineRef {
        EngineRef::resolve(
            &self.registry_prefix,
            &self.engine_image,
            &self.target_version,
        )
    }
}
