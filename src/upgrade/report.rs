// ABOUTME: Per-container result of a successful upgrade.
// ABOUTME: Serializable so the CLI can emit it as JSON.

use crate::types::ContainerId;
use serde::Serialize;

/// What happened to one container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum UpgradeOutcome {
    /// The image was already current; the container was left alone.
    Unchanged,
    /// A newer image was pulled but the container was not recreated.
    Pulled,
    /// The container was recreated from the newer image.
    Recreated { new_id: ContainerId },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpgradeReport {
    pub container: String,
    pub image: String,
    #[serde(flatten)]
    pub outcome: UpgradeOutcome,
}

impl std::fmt::Display for UpgradeReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.outcome {
            UpgradeOutcome::Unchanged => write!(f, "{}: {} is up to date", self.container, self.image),
            UpgradeOutcome::Pulled => write!(f, "{}: pulled newer {}", self.container, self.image),
            UpgradeOutcome::Recreated { new_id } => write!(
                f,
                "{}: recreated from {} as {}",
                self.container,
                self.image,
                new_id.short()
            ),
        }
    }
}
