// ABOUTME: Container engine access for the upgrade core.
// ABOUTME: Capability traits, local detection and the bollard-backed client.

mod bollard;
mod detection;
mod error;
#[cfg(test)]
pub(crate) mod fake;
pub mod traits;
mod types;

pub use self::bollard::BollardRuntime;
pub use detection::{DetectionError, detect_local};
pub use error::{RuntimeError, RuntimeErrorKind};
pub use traits::{
    ContainerError, ContainerOps, ContainerRef, ContainerSnapshot, ContainerState, ImageError,
    ImageOps, PullLine, PullStream, RecreateSpec, RemoveOptions, RuntimeInfo as RuntimeInfoTrait,
    RuntimeInfoError, RuntimeMetadata,
};
pub use types::{DetectedRuntime, RuntimeConfig, RuntimeType};
