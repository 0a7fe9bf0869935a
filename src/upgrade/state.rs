// ABOUTME: Stage types for the type state pattern of a single upgrade.
// ABOUTME: Each stage carries the data the next engine call needs.

use crate::runtime::{ContainerSnapshot, RecreateSpec};
use crate::types::ContainerId;

/// Selected from the running set; nothing pulled yet.
/// Available actions: `pull()`
#[derive(Debug, Clone, Copy, Default)]
pub struct Selected;

/// Pull found the image already present.
/// Available actions: `finish()`
#[derive(Debug, Clone, Copy, Default)]
pub struct UpToDate;

/// Pull fetched a newer image.
/// Available actions: `inspect()`, `finish()` (pull-only)
#[derive(Debug, Clone, Copy, Default)]
pub struct Pulled;

/// Configuration captured; container still running.
/// Available actions: `stop()`
#[derive(Debug, Clone)]
pub struct Inspected {
    pub(crate) snapshot: ContainerSnapshot,
}

/// Old container stopped.
/// Available actions: `remove()`
#[derive(Debug, Clone)]
pub struct Stopped {
    pub(crate) snapshot: ContainerSnapshot,
}

/// Old container removed, volumes kept. From here on a failure leaves no
/// container under the original name.
/// Available actions: `create()`
#[derive(Debug, Clone)]
pub struct Removed {
    pub(crate) spec: RecreateSpec,
}

/// Replacement created under the original name.
/// Available actions: `start()`
#[derive(Debug, Clone)]
pub struct Created {
    pub(crate) new_id: ContainerId,
}

/// Replacement running on the new image.
/// Available actions: `finish()`
#[derive(Debug, Clone)]
pub struct Started {
    pub(crate) new_id: ContainerId,
}
