// ABOUTME: Validated domain types shared by the runtime and upgrade modules.
// ABOUTME: Phantom-typed IDs, image references and container names.

mod container_name;
mod id;
mod image_ref;

pub use container_name::ContainerName;
pub(crate) use container_name::strip_engine_prefix;
pub use id::{ContainerId, Id, ImageId};
pub use image_ref::{ImageRef, ParseImageRefError};
