// ABOUTME: Local container engine detection.
// ABOUTME: Explicit config, then DOCKER_HOST, then Podman and Docker sockets.

use super::types::{DetectedRuntime, RuntimeConfig, RuntimeType};
use std::path::Path;

const ROOTFUL_PODMAN: &str = "/run/podman/podman.sock";
const DOCKER_SOCKET: &str = "/var/run/docker.sock";

#[derive(Debug, thiserror::Error)]
pub enum DetectionError {
    #[error("no container runtime found (checked DOCKER_HOST, Podman and Docker sockets)")]
    NoRuntimeFound,

    #[error("unsupported DOCKER_HOST {0:?}: only unix:// sockets are supported")]
    UnsupportedHost(String),
}

/// Find the engine socket to talk to.
///
/// Detection order:
/// 1. Explicit `runtime` / `socket` from configuration
/// 2. `DOCKER_HOST` (`unix://` only)
/// 3. Rootless Podman socket (`/run/user/$UID/podman/podman.sock`)
/// 4. Rootful Podman socket (`/run/podman/podman.sock`)
/// 5. Docker socket (`/var/run/docker.sock`)
pub fn detect_local(config: &RuntimeConfig) -> Result<DetectedRuntime, DetectionError> {
    match (config.runtime, &config.socket) {
        (Some(runtime_type), socket) => {
            return Ok(DetectedRuntime {
                runtime_type,
                socket_path: socket
                    .clone()
                    .unwrap_or_else(|| default_socket_path(runtime_type).to_string()),
            });
        }
        (None, Some(socket)) => {
            return Ok(DetectedRuntime {
                runtime_type: guess_runtime(socket),
                socket_path: socket.clone(),
            });
        }
        (None, None) => {}
    }

    if let Some(host) = std::env::var("DOCKER_HOST").ok().filter(|h| !h.is_empty()) {
        let socket_path = host
            .strip_prefix("unix://")
            .ok_or_else(|| DetectionError::UnsupportedHost(host.clone()))?;
        return Ok(DetectedRuntime {
            runtime_type: guess_runtime(socket_path),
            socket_path: socket_path.to_string(),
        });
    }

    if let Some(uid) = get_uid() {
        let rootless_socket = format!("/run/user/{}/podman/podman.sock", uid);
        if Path::new(&rootless_socket).exists() {
            return Ok(DetectedRuntime {
                runtime_type: RuntimeType::Podman,
                socket_path: rootless_socket,
            });
        }
    }

    if Path::new(ROOTFUL_PODMAN).exists() {
        return Ok(DetectedRuntime {
            runtime_type: RuntimeType::Podman,
            socket_path: ROOTFUL_PODMAN.to_string(),
        });
    }

    if Path::new(DOCKER_SOCKET).exists() {
        return Ok(DetectedRuntime {
            runtime_type: RuntimeType::Docker,
            socket_path: DOCKER_SOCKET.to_string(),
        });
    }

    Err(DetectionError::NoRuntimeFound)
}

fn guess_runtime(socket_path: &str) -> RuntimeType {
    if socket_path.contains("podman") {
        RuntimeType::Podman
    } else {
        RuntimeType::Docker
    }
}

fn get_uid() -> Option<String> {
    std::env::var("UID").ok().or_else(|| {
        std::fs::read_to_string("/proc/self/status")
            .ok()
            .and_then(|s| {
                s.lines()
                    .find(|l| l.starts_with("Uid:"))
                    .and_then(|l| l.split_whitespace().nth(1))
                    .map(|s| s.to_string())
            })
    })
}

fn default_socket_path(runtime: RuntimeType) -> &'static str {
    match runtime {
        RuntimeType::Docker => DOCKER_SOCKET,
        RuntimeType::Podman => ROOTFUL_PODMAN,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_runtime_uses_its_default_socket() {
        let config = RuntimeConfig {
            runtime: Some(RuntimeType::Podman),
            socket: None,
        };
        let detected = detect_local(&config).unwrap();
        assert_eq!(detected.runtime_type, RuntimeType::Podman);
        assert_eq!(detected.socket_path, ROOTFUL_PODMAN);
    }

    #[test]
    fn explicit_socket_guesses_runtime_from_path() {
        let config = RuntimeConfig {
            runtime: None,
            socket: Some("/run/user/1000/podman/podman.sock".to_string()),
        };
        let detected = detect_local(&config).unwrap();
        assert_eq!(detected.runtime_type, RuntimeType::Podman);
    }
}
