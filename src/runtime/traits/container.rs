// ABOUTME: Container lifecycle trait for container engines.
// ABOUTME: List, inspect, stop, remove, create and start containers.

use super::sealed::Sealed;
use super::shared_types::{ContainerRef, ContainerSnapshot, RecreateSpec, RemoveOptions};
use crate::types::ContainerId;
use async_trait::async_trait;
use std::time::Duration;

/// Container lifecycle operations.
#[async_trait]
pub trait ContainerOps: Sealed + Send + Sync {
    /// List containers the engine currently reports as running.
    async fn list_running(&self) -> Result<Vec<ContainerRef>, ContainerError>;

    /// Capture everything needed to recreate a container.
    async fn inspect_container(&self, id: &ContainerId)
    -> Result<ContainerSnapshot, ContainerError>;

    /// Stop a running container. `None` leaves the grace period to the engine.
    async fn stop_container(
        &self,
        id: &ContainerId,
        timeout: Option<Duration>,
    ) -> Result<(), ContainerError>;

    /// Remove a stopped container.
    async fn remove_container(
        &self,
        id: &ContainerId,
        opts: RemoveOptions,
    ) -> Result<(), ContainerError>;

    /// Create a container, returning the engine-assigned ID.
    async fn create_container(&self, spec: &RecreateSpec) -> Result<ContainerId, ContainerError>;

    /// Start a created container.
    async fn start_container(&self, id: &ContainerId) -> Result<(), ContainerError>;
}

/// Errors from container operations.
#[derive(Debug, thiserror::Error)]
pub enum ContainerError {
    #[error("container not found: {0}")]
    NotFound(String),

    #[error("container name already in use: {0}")]
    AlreadyExists(String),

    #[error("container not running: {0}")]
    NotRunning(String),

    #[error("container already running: {0}")]
    AlreadyRunning(String),

    #[error("image not found: {0}")]
    ImageNotFound(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("runtime error: {0}")]
    Runtime(String),
}
