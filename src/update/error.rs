// ABOUTME: Error types for engine activation and update.
// ABOUTME: Each variant pins the failure to the stage that produced it.

use crate::runtime::{ContainerError, ImageError, TaskError};
use crate::update::health::HealthCheckError;

/// Errors from the activation/update workflow.
///
/// Stage attribution is part of the contract: an operator reading the
/// message alone can tell a registry-availability problem from a pull or
/// runtime problem.
#[derive(Debug, thiserror::Error)]
pub enum UpdateError {
    /// The request did not name a target version. Raised before any runtime
    /// or registry call is made.
    #[error("please pick the version you wish to activate")]
    NoVersionSpecified,

    /// The local image lookup failed for a reason other than not-found.
    #[error("check for image {reference}: {source}")]
    ImageLookup {
        reference: String,
        source: ImageError,
    },

    /// The registry pull failed.
    #[error("unable to pull {reference}: {source}")]
    Pull {
        reference: String,
        source: ImageError,
    },

    /// Stopping or starting the engine task failed. The runtime detail is
    /// sufficient on its own; no further wrapping.
    #[error(transparent)]
    Swap(#[from] TaskError),

    /// The post-swap health probe failed: the swap completed but the new
    /// instance is not ready.
    #[error(transparent)]
    HealthCheck(#[from] HealthCheckError),

    /// Querying the engine container failed.
    #[error("unable to query engine container: {0}")]
    Runtime(#[from] ContainerError),
}
