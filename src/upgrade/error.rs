// ABOUTME: Error taxonomy for selecting and upgrading containers.
// ABOUTME: One variant per failing stage, carrying the engine error as source.

use crate::runtime::{ContainerError, ContainerState, ImageError};
use crate::types::ContainerId;

/// Why an upgrade request could not be built.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("choose either a single container or all running containers, not both")]
    Both,

    #[error("no container selected; name one or select all running containers")]
    Neither,
}

/// Errors from the upgrade core.
///
/// Every engine failure aborts the run; containers upgraded earlier in the
/// same run keep their new version.
#[derive(Debug, thiserror::Error)]
pub enum UpgradeError {
    #[error("invalid selection: {0}")]
    InvalidSelection(#[from] SelectionError),

    #[error("container {container} is {state}; only running containers can be upgraded")]
    NotRunning {
        container: String,
        state: ContainerState,
    },

    #[error("failed to list running containers: {source}")]
    ListFailed { source: ContainerError },

    #[error("failed to pull {image} for {container}: {source}")]
    PullFailed {
        container: String,
        image: String,
        source: ImageError,
    },

    #[error("failed to inspect {container}: {source}")]
    InspectFailed {
        container: String,
        source: ContainerError,
    },

    #[error("failed to stop {container}: {source}")]
    StopFailed {
        container: String,
        source: ContainerError,
    },

    #[error("failed to remove {container}: {source}")]
    RemoveFailed {
        container: String,
        source: ContainerError,
    },

    #[error(
        "failed to create {container}: {source}; the previous container is already removed and must be recreated by hand"
    )]
    CreateFailed {
        container: String,
        source: ContainerError,
    },

    #[error(
        "failed to start {container} ({id}): {source}; the previous container is already removed"
    )]
    StartFailed {
        container: String,
        id: ContainerId,
        source: ContainerError,
    },
}

/// Error kind for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpgradeErrorKind {
    InvalidSelection,
    NotRunning,
    ListFailed,
    PullFailed,
    InspectFailed,
    StopFailed,
    RemoveFailed,
    CreateFailed,
    StartFailed,
}

impl UpgradeError {
    pub fn kind(&self) -> UpgradeErrorKind {
        match self {
            UpgradeError::InvalidSelection(_) => UpgradeErrorKind::InvalidSelection,
            UpgradeError::NotRunning { .. } => UpgradeErrorKind::NotRunning,
            UpgradeError::ListFailed { .. } => UpgradeErrorKind::ListFailed,
            UpgradeError::PullFailed { .. } => UpgradeErrorKind::PullFailed,
            UpgradeError::InspectFailed { .. } => UpgradeErrorKind::InspectFailed,
            UpgradeError::StopFailed { .. } => UpgradeErrorKind::StopFailed,
            UpgradeError::RemoveFailed { .. } => UpgradeErrorKind::RemoveFailed,
            UpgradeError::CreateFailed { .. } => UpgradeErrorKind::CreateFailed,
            UpgradeError::StartFailed { .. } => UpgradeErrorKind::StartFailed,
        }
    }

    /// The old container is gone and no replacement is running.
    pub fn is_irrecoverable(&self) -> bool {
        matches!(
            self,
            UpgradeError::CreateFailed { .. } | UpgradeError::StartFailed { .. }
        )
    }

    /// Name of the container the failure belongs to, if any.
    pub fn container(&self) -> Option<&str> {
        match self {
            UpgradeError::InvalidSelection(_) | UpgradeError::ListFailed { .. } => None,
            UpgradeError::NotRunning { container, .. }
            | UpgradeError::PullFailed { container, .. }
            | UpgradeError::InspectFailed { container, .. }
            | UpgradeError::StopFailed { container, .. }
            | UpgradeError::RemoveFailed { container, .. }
            | UpgradeError::CreateFailed { container, .. }
            | UpgradeError::StartFailed { container, .. } => Some(container),
        }
    }
}
