// ABOUTME: Validated upgrade request built once at the entry point.
// ABOUTME: Exactly one selection mode, plus the pull-only switch.

use super::error::{SelectionError, UpgradeError};
use crate::types::ContainerName;

/// Which running containers an upgrade targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// The running container with this name.
    Named(ContainerName),
    /// Every running container.
    AllRunning,
}

/// Input to [`upgrade`](super::upgrade).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpgradeRequest {
    selection: Selection,
    pull_only: bool,
}

impl UpgradeRequest {
    /// Build a request from the raw selection inputs.
    ///
    /// # Errors
    ///
    /// Returns `UpgradeError::InvalidSelection` unless exactly one of `container`
    /// and `all` is given. An empty `container` counts as not given.
    pub fn new(container: Option<&str>, all: bool, pull_only: bool) -> Result<Self, UpgradeError> {
        let container = container.filter(|name| !name.is_empty());
        let selection = match (container, all) {
            (Some(_), true) => return Err(SelectionError::Both.into()),
            (None, false) => return Err(SelectionError::Neither.into()),
            (Some(name), false) => Selection::Named(ContainerName::new(name)),
            (None, true) => Selection::AllRunning,
        };

        Ok(Self {
            selection,
            pull_only,
        })
    }

    pub fn named(name: ContainerName, pull_only: bool) -> Self {
        Self {
            selection: Selection::Named(name),
            pull_only,
        }
    }

    pub fn all(pull_only: bool) -> Self {
        Self {
            selection: Selection::AllRunning,
            pull_only,
        }
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn pull_only(&self) -> bool {
        self.pull_only
    }
}
