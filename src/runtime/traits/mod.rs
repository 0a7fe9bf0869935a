// ABOUTME: Capability traits the upgrade core needs from a container engine.
// ABOUTME: Defines ContainerOps, ImageOps and RuntimeInfo plus their shared types.

mod container;
mod image;
mod runtime_info;
pub(crate) mod sealed;
mod shared_types;

pub use container::{ContainerError, ContainerOps};
pub use image::{ImageError, ImageOps, PullLine, PullStream};
pub use runtime_info::{RuntimeInfo, RuntimeInfoError};
pub use shared_types::*;
