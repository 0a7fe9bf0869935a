// ABOUTME: Optional repull.yml settings and their CLI overrides.
// ABOUTME: Engine selection, stop grace period and pull classifier.

use crate::error::{Error, Result};
use crate::runtime::{RuntimeConfig, RuntimeType};
use crate::upgrade::{ClassifierKind, UpgradeOptions};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

pub const CONFIG_FILENAME: &str = "repull.yml";
pub const CONFIG_FILENAME_ALT: &str = "repull.yaml";

/// The engine takes the stop grace period as a signed 32-bit second count.
const MAX_STOP_TIMEOUT_SECS: u64 = i32::MAX as u64;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Engine type, skipping socket auto-detection.
    #[serde(default)]
    pub runtime: Option<RuntimeType>,

    /// Engine socket path.
    #[serde(default)]
    pub socket: Option<String>,

    /// Grace period before the engine kills a stopping container.
    #[serde(default, with = "humantime_serde")]
    pub stop_timeout: Option<Duration>,

    #[serde(default)]
    pub classifier: ClassifierKind,
}

impl Config {
    pub fn parse(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Config = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load an explicitly named config file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(Error::ConfigNotFound(path.to_path_buf()));
        }
        Self::parse(&std::fs::read_to_string(path)?)
    }

    /// Load `repull.yml` or `repull.yaml` from `dir`, or defaults if neither exists.
    pub fn discover(dir: &Path) -> Result<Self> {
        for name in [CONFIG_FILENAME, CONFIG_FILENAME_ALT] {
            let path = dir.join(name);
            if path.is_file() {
                return Self::load(&path);
            }
        }
        Ok(Self::default())
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(socket) = &self.socket
            && socket.trim().is_empty()
        {
            return Err(Error::InvalidConfig("socket cannot be empty".to_string()));
        }
        if let Some(timeout) = self.stop_timeout
            && timeout.as_secs() > MAX_STOP_TIMEOUT_SECS
        {
            return Err(Error::InvalidConfig(format!(
                "stop_timeout cannot exceed {MAX_STOP_TIMEOUT_SECS}s"
            )));
        }
        Ok(())
    }

    pub fn runtime_config(&self) -> RuntimeConfig {
        RuntimeConfig {
            runtime: self.runtime,
            socket: self.socket.clone(),
        }
    }

    pub fn upgrade_options(&self) -> UpgradeOptions {
        UpgradeOptions {
            stop_timeout: self.stop_timeout,
            classifier: self.classifier,
        }
    }
}
