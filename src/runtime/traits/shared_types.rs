// ABOUTME: Shared types used across runtime trait definitions.
// ABOUTME: ContainerRef, ContainerSnapshot, RecreateSpec, RemoveOptions, etc.

use crate::types::ContainerId;
use crate::types::strip_engine_prefix;
use std::collections::HashMap;

/// Engine data model types carried through a recreate unchanged.
pub use bollard::models::{ContainerConfig as ProcessConfig, EndpointSettings, HostConfig};

/// A container as reported by the running-containers listing.
#[derive(Debug, Clone, PartialEq)]
pub struct ContainerRef {
    /// Container ID.
    pub id: ContainerId,
    /// Names as the engine reports them, usually with a leading `/`.
    pub names: Vec<String>,
    /// Lifecycle state.
    pub state: ContainerState,
    /// Image reference the container was created from.
    pub image: String,
}

impl ContainerRef {
    /// First name without the engine's leading `/`, falling back to the short ID.
    pub fn display_name(&self) -> &str {
        self.names
            .first()
            .map(|n| strip_engine_prefix(n))
            .unwrap_or_else(|| self.id.short())
    }

    pub fn is_running(&self) -> bool {
        self.state == ContainerState::Running
    }
}

/// Container lifecycle state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContainerState {
    Created,
    Running,
    Paused,
    Restarting,
    Removing,
    Exited,
    Dead,
    /// Anything else the engine reports, e.g. Podman's `stopping`.
    Other(String),
}

impl ContainerState {
    pub fn parse(state: &str) -> Self {
        match state.to_ascii_lowercase().as_str() {
            "created" => Self::Created,
            "running" => Self::Running,
            "paused" => Self::Paused,
            "restarting" => Self::Restarting,
            "removing" => Self::Removing,
            "exited" => Self::Exited,
            "dead" => Self::Dead,
            other => Self::Other(other.to_string()),
        }
    }
}

impl std::fmt::Display for ContainerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Created => "created",
            Self::Running => "running",
            Self::Paused => "paused",
            Self::Restarting => "restarting",
            Self::Removing => "removing",
            Self::Exited => "exited",
            Self::Dead => "dead",
            Self::Other(s) => s,
        };
        f.write_str(s)
    }
}

/// Everything inspect reports that a recreate needs.
#[derive(Debug, Clone, PartialEq)]
pub struct ContainerSnapshot {
    /// Container ID.
    pub id: ContainerId,
    /// Name without the leading `/`.
    pub name: String,
    /// Lifecycle state at inspect time.
    pub state: ContainerState,
    /// Process and image configuration (command, env, labels, exposed ports...).
    pub config: ProcessConfig,
    /// Host configuration (mounts, limits, restart policy, port bindings...).
    pub host_config: HostConfig,
    /// Endpoint settings keyed by network name.
    pub endpoints: HashMap<String, EndpointSettings>,
}

impl ContainerSnapshot {
    /// Create request that reproduces this container under the same name.
    pub fn recreate_spec(&self) -> RecreateSpec {
        RecreateSpec {
            name: self.name.clone(),
            config: self.config.clone(),
            host_config: self.host_config.clone(),
            endpoints: self.endpoints.clone(),
        }
    }
}

/// Create request for a container that replaces an inspected one.
#[derive(Debug, Clone, PartialEq)]
pub struct RecreateSpec {
    pub name: String,
    pub config: ProcessConfig,
    pub host_config: HostConfig,
    pub endpoints: HashMap<String, EndpointSettings>,
}

/// Options for removing a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemoveOptions {
    /// Leave named and anonymous volumes in place.
    pub keep_volumes: bool,
    /// Kill the container first if it is still running.
    pub force: bool,
}

impl RemoveOptions {
    /// Remove a stopped container and nothing else.
    pub fn keep_volumes() -> Self {
        Self {
            keep_volumes: true,
            force: false,
        }
    }
}

/// Engine metadata.
#[derive(Debug, Clone)]
pub struct RuntimeMetadata {
    pub name: String,
    pub version: String,
    pub api_version: String,
    pub os: String,
    pub arch: String,
}
