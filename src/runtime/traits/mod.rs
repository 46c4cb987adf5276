// ABOUTME: Composable capability traits for the engine container runtime.
// ABOUTME: Defines ContainerOps, TaskOps, and ImageOps consumed by the update core.

mod container;
mod image;
pub(crate) mod sealed;
mod shared_types;
mod task;

pub use container::{
    ContainerError, ContainerFilters, ContainerOps, EngineContainer, MANAGED_LABEL,
    MANAGED_LABEL_VALUE,
};
pub use image::{ImageError, ImageHandle, ImageOps};
pub use shared_types::RegistryAuth;
pub use task::{TaskError, TaskInfo, TaskOps, TaskSpec, TaskStatus};

/// Everything the update workflow needs from a runtime.
pub trait EngineRuntime: ContainerOps + TaskOps + ImageOps {}

impl<R: ContainerOps + TaskOps + ImageOps> EngineRuntime for R {}
