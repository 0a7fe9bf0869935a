// ABOUTME: Stage transition methods for a single-container upgrade.
// ABOUTME: Each method consumes self and returns the next stage on success.

use std::time::Duration;

use super::classify::{PullClassifier, PullOutcome, classify_pull};
use super::error::UpgradeError;
use super::report::{UpgradeOutcome, UpgradeReport};
use super::state::{Created, Inspected, Pulled, Removed, Selected, Started, Stopped, UpToDate};
use super::upgrader::Upgrade;
use crate::runtime::{ContainerOps, ImageOps, RemoveOptions};
use crate::types::ContainerId;

/// Result of the pull stage.
#[derive(Debug)]
pub enum PullResult {
    UpToDate(Upgrade<UpToDate>),
    Pulled(Upgrade<Pulled>),
}

impl<S> Upgrade<S> {
    fn transition<T>(self, state: T) -> Upgrade<T> {
        Upgrade {
            target: self.target,
            name: self.name,
            image: self.image,
            state,
        }
    }

    fn report(&self, outcome: UpgradeOutcome) -> UpgradeReport {
        UpgradeReport {
            container: self.name.clone(),
            image: self.image.to_string(),
            outcome,
        }
    }
}

// =============================================================================
// Selected -> UpToDate | Pulled
// =============================================================================

impl Upgrade<Selected> {
    /// Pull the container's image and classify the result.
    ///
    /// # Errors
    ///
    /// Returns `UpgradeError::PullFailed` if the pull cannot be opened or
    /// its stream fails.
    pub async fn pull<R: ImageOps>(
        self,
        runtime: &R,
        classifier: &dyn PullClassifier,
    ) -> Result<PullResult, UpgradeError> {
        let pulled = match runtime.pull_image(&self.image).await {
            Ok(stream) => classify_pull(stream, classifier).await,
            Err(e) => Err(e),
        };

        match pulled {
            Ok(PullOutcome::Unchanged) => Ok(PullResult::UpToDate(self.transition(UpToDate))),
            Ok(PullOutcome::Updated) => Ok(PullResult::Pulled(self.transition(Pulled))),
            Err(source) => Err(UpgradeError::PullFailed {
                container: self.name,
                image: self.image.to_string(),
                source,
            }),
        }
    }
}

impl Upgrade<UpToDate> {
    pub fn finish(self) -> UpgradeReport {
        self.report(UpgradeOutcome::Unchanged)
    }
}

// =============================================================================
// Pulled -> Inspected
// =============================================================================

impl Upgrade<Pulled> {
    /// End a pull-only upgrade.
    pub fn finish(self) -> UpgradeReport {
        self.report(UpgradeOutcome::Pulled)
    }

    /// Capture the configuration the replacement is created from.
    ///
    /// # Errors
    ///
    /// Returns `UpgradeError::InspectFailed` if the engine cannot inspect the container.
    pub async fn inspect<R: ContainerOps>(
        self,
        runtime: &R,
    ) -> Result<Upgrade<Inspected>, UpgradeError> {
        let mut snapshot = match runtime.inspect_container(&self.target.id).await {
            Ok(snapshot) => snapshot,
            Err(source) => {
                return Err(UpgradeError::InspectFailed {
                    container: self.name,
                    source,
                });
            }
        };

        if snapshot.name.is_empty() {
            snapshot.name = self.name.clone();
        }
        Ok(self.transition(Inspected { snapshot }))
    }
}

// =============================================================================
// Inspected -> Stopped -> Removed
// =============================================================================

impl Upgrade<Inspected> {
    /// Stop the old container.
    ///
    /// # Errors
    ///
    /// Returns `UpgradeError::StopFailed`; the container is then left as it was.
    pub async fn stop<R: ContainerOps>(
        self,
        runtime: &R,
        timeout: Option<Duration>,
    ) -> Result<Upgrade<Stopped>, UpgradeError> {
        if let Err(source) = runtime.stop_container(&self.target.id, timeout).await {
            return Err(UpgradeError::StopFailed {
                container: self.name,
                source,
            });
        }

        let snapshot = self.state.snapshot.clone();
        Ok(self.transition(Stopped { snapshot }))
    }
}

impl Upgrade<Stopped> {
    /// Remove the stopped container, keeping its volumes.
    ///
    /// # Errors
    ///
    /// Returns `UpgradeError::RemoveFailed`; the stopped container still exists.
    pub async fn remove<R: ContainerOps>(
        self,
        runtime: &R,
    ) -> Result<Upgrade<Removed>, UpgradeError> {
        if let Err(source) = runtime
            .remove_container(&self.target.id, RemoveOptions::keep_volumes())
            .await
        {
            return Err(UpgradeError::RemoveFailed {
                container: self.name,
                source,
            });
        }

        let spec = self.state.snapshot.recreate_spec();
        Ok(self.transition(Removed { spec }))
    }
}

// =============================================================================
// Removed -> Created -> Started
// =============================================================================

impl Upgrade<Removed> {
    /// Create the replacement from the captured configuration.
    ///
    /// # Errors
    ///
    /// Returns `UpgradeError::CreateFailed`. The old container is already
    /// gone at this point and is not restored.
    pub async fn create<R: ContainerOps>(
        self,
        runtime: &R,
    ) -> Result<Upgrade<Created>, UpgradeError> {
        match runtime.create_container(&self.state.spec).await {
            Ok(new_id) => Ok(self.transition(Created { new_id })),
            Err(source) => Err(UpgradeError::CreateFailed {
                container: self.name,
                source,
            }),
        }
    }
}

impl Upgrade<Created> {
    pub fn new_container(&self) -> &ContainerId {
        &self.state.new_id
    }

    /// Start the replacement.
    ///
    /// # Errors
    ///
    /// Returns `UpgradeError::StartFailed`; the replacement stays created but stopped.
    pub async fn start<R: ContainerOps>(
        self,
        runtime: &R,
    ) -> Result<Upgrade<Started>, UpgradeError> {
        if let Err(source) = runtime.start_container(&self.state.new_id).await {
            return Err(UpgradeError::StartFailed {
                container: self.name,
                id: self.state.new_id,
                source,
            });
        }

        let new_id = self.state.new_id.clone();
        Ok(self.transition(Started { new_id }))
    }
}

impl Upgrade<Started> {
    pub fn new_container(&self) -> &ContainerId {
        &self.state.new_id
    }

    pub fn finish(self) -> UpgradeReport {
        let new_id = self.state.new_id.clone();
        self.report(UpgradeOutcome::Recreated { new_id })
    }
}
