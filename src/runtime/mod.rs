// ABOUTME: Container runtime layer: capability traits, local detection, bollard backend.
// ABOUTME: The update core consumes only the traits; binaries pick the backend.

mod bollard;
mod detection;
mod error;
pub mod traits;
mod types;

pub use self::bollard::{BollardRuntime, ConnectionError};
pub use detection::{DetectionError, detect_runtime};
pub use error::{RuntimeError, RuntimeErrorKind};
pub use traits::{
    ContainerError, ContainerFilters, ContainerOps, EngineContainer, EngineRuntime, ImageError,
    ImageHandle, ImageOps, MANAGED_LABEL, MANAGED_LABEL_VALUE, RegistryAuth, TaskError, TaskInfo,
    TaskOps, TaskSpec, TaskStatus,
};
pub use types::{RuntimeConfig, RuntimeInfo, RuntimeType};
