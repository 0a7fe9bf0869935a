// ABOUTME: Application-wide error type for the repull binary.
// ABOUTME: Wraps configuration, engine connection and upgrade failures.

use crate::runtime::RuntimeError;
use crate::upgrade::UpgradeError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("configuration file not found: {0}")]
    ConfigNotFound(PathBuf),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Runtime(#[from] RuntimeError),

    #[error(transparent)]
    Upgrade(#[from] UpgradeError),
}

pub type Result<T> = std::result::Result<T, Error>;
