// ABOUTME: Image operations trait for the engine runtime facade.
// ABOUTME: Local lookup and registry pull, with not-found distinguished.

use super::sealed::Sealed;
use super::shared_types::RegistryAuth;
use crate::types::{EngineRef, ImageId};
use async_trait::async_trait;

/// Image lookup and pull.
///
/// `get_image` must report a missing local image as [`ImageError::NotFound`],
/// not as a generic runtime error: callers branch on that variant to decide
/// between using the cached image and pulling.
#[async_trait]
pub trait ImageOps: Sealed + Send + Sync {
    /// Fetch an image already present locally.
    async fn get_image(&self, reference: &EngineRef) -> Result<ImageHandle, ImageError>;

    /// Pull an image from its registry.
    async fn pull_image(
        &self,
        reference: &EngineRef,
        auth: Option<&RegistryAuth>,
    ) -> Result<ImageHandle, ImageError>;
}

/// A resolved image, local or freshly pulled.
#[derive(Debug, Clone)]
pub struct ImageHandle {
    /// Content-addressed image ID, when the runtime reports one.
    pub id: Option<ImageId>,
    /// The reference the image was resolved under.
    pub reference: String,
}

/// Errors from image operations.
#[derive(Debug, thiserror::Error)]
pub enum ImageError {
    #[error("image not found: {0}")]
    NotFound(String),

    #[error("authentication failed for registry: {0}")]
    AuthenticationFailed(String),

    #[error("pull failed: {0}")]
    PullFailed(String),

    #[error("runtime error: {0}")]
    Runtime(String),
}
