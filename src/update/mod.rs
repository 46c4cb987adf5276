// ABOUTME: Engine activation and in-place update workflow.
// ABOUTME: Decision engine, pull-and-swap executor, and the two entry points.

mod activate;
mod decision;
mod error;
mod executor;
mod health;
mod request;

#[cfg(test)]
mod tests;

pub use activate::{activate_engine, do_update, find_engine_container};
pub use decision::{UpdateDecision, decide};
pub use error::UpdateError;
pub use executor::{ENGINE_CONTAINER_NAME, pull_and_swap};
pub use health::{HealthCheckError, HealthProbe, TaskAliveProbe};
pub use request::UpdateRequest;

use crate::types::EngineRef;

/// What an activation/update call accomplished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The engine was already bound to the requested version.
    NoChangeNeeded,
    /// The engine task now runs the given reference.
    Updated(EngineRef),
}
