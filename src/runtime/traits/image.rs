// ABOUTME: Image pull trait for container engines.
// ABOUTME: Pulls expose the engine's line-oriented progress stream.

use super::sealed::Sealed;
use crate::types::{ImageRef, ParseImageRefError};
use async_trait::async_trait;
use futures::Stream;
use serde::Deserialize;
use std::pin::Pin;

/// Progress messages of one pull, in the order the engine sent them.
///
/// Dropping the stream closes the underlying connection.
pub type PullStream = Pin<Box<dyn Stream<Item = Result<PullLine, ImageError>> + Send>>;

/// Image operations.
#[async_trait]
pub trait ImageOps: Sealed + Send + Sync {
    /// Start pulling an image and return its progress stream.
    async fn pull_image(&self, reference: &ImageRef) -> Result<PullStream, ImageError>;
}

/// One JSON message of a pull progress stream, e.g. `{"status":"Pulling fs layer"}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullLine(String);

#[derive(Deserialize)]
struct PullMessage {
    status: Option<String>,
}

impl PullLine {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The `status` field, or `None` for lines that carry none or are not JSON.
    pub fn status(&self) -> Option<String> {
        serde_json::from_str::<PullMessage>(&self.0)
            .ok()
            .and_then(|m| m.status)
    }
}

impl std::fmt::Display for PullLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Errors from image operations.
#[derive(Debug, thiserror::Error)]
pub enum ImageError {
    #[error("invalid image reference: {0}")]
    InvalidReference(#[from] ParseImageRefError),

    #[error("image not found: {0}")]
    NotFound(String),

    #[error("authentication required for {0}")]
    AuthenticationFailed(String),

    #[error("pull failed: {0}")]
    PullFailed(String),

    #[error("runtime error: {0}")]
    Runtime(String),
}
