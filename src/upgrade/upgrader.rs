// ABOUTME: Single-container upgrade parameterized by its current stage.
// ABOUTME: Runs pull, then inspect, stop, remove, create and start in order.

use std::time::Duration;

use super::classify::ClassifierKind;
use super::error::UpgradeError;
use super::report::UpgradeReport;
use super::state::Selected;
use super::transitions::PullResult;
use crate::runtime::{ContainerOps, ContainerRef, ImageOps};
use crate::types::ImageRef;

/// Settings shared by every container in one run.
#[derive(Debug, Clone, Copy, Default)]
pub struct UpgradeOptions {
    /// Grace period for stop; `None` uses the engine's default.
    pub stop_timeout: Option<Duration>,
    /// How pull progress is turned into a `PullOutcome`.
    pub classifier: ClassifierKind,
}

/// One container's upgrade, in stage `S`.
///
/// Stages only expose the next engine call, so the recreate sequence cannot
/// be reordered or skip a step.
#[derive(Debug)]
pub struct Upgrade<S> {
    pub(crate) target: ContainerRef,
    pub(crate) name: String,
    pub(crate) image: ImageRef,
    pub(crate) state: S,
}

impl Upgrade<Selected> {
    /// Start upgrading a container from the running listing.
    ///
    /// # Errors
    ///
    /// Returns `UpgradeError::PullFailed` when the container's image string
    /// is not a pullable reference.
    pub fn new(target: ContainerRef) -> Result<Self, UpgradeError> {
        let name = target.display_name().to_string();
        let image =
            ImageRef::from_container_image(&target.image).map_err(|e| UpgradeError::PullFailed {
                container: name.clone(),
                image: target.image.clone(),
                source: e.into(),
            })?;

        Ok(Upgrade {
            target,
            name,
            image,
            state: Selected,
        })
    }
}

impl<S> Upgrade<S> {
    /// Container name without the engine's leading `/`.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn image(&self) -> &ImageRef {
        &self.image
    }
}

/// Upgrade one running container.
///
/// Pulls its image and, unless the image was already current or `pull_only`
/// is set, replaces the container with one created from the same
/// configuration under the same name.
///
/// # Errors
///
/// Returns the error of the first stage that fails. After a `RemoveFailed`
/// the original container is stopped but intact; after `CreateFailed` or
/// `StartFailed` it no longer exists.
pub async fn upgrade_container<R: ContainerOps + ImageOps>(
    runtime: &R,
    target: ContainerRef,
    pull_only: bool,
    options: &UpgradeOptions,
) -> Result<UpgradeReport, UpgradeError> {
    let upgrade = Upgrade::new(target)?;
    tracing::info!("upgrading {} ({})", upgrade.name(), upgrade.image());

    let classifier = options.classifier.classifier();
    let pulled = match upgrade.pull(runtime, classifier.as_ref()).await? {
        PullResult::UpToDate(upgrade) => {
            tracing::info!("no new image for {}", upgrade.image());
            return Ok(upgrade.finish());
        }
        PullResult::Pulled(upgrade) => upgrade,
    };
    tracing::info!("pulled {}", pulled.image());

    if pull_only {
        return Ok(pulled.finish());
    }

    let inspected = pulled.inspect(runtime).await?;
    tracing::info!("recreating {}", inspected.name());

    let stopped = inspected.stop(runtime, options.stop_timeout).await?;
    tracing::info!("stopped {}", stopped.name());

    let removed = stopped.remove(runtime).await?;
    tracing::info!("removed {}", removed.name());

    let created = removed
        .create(runtime)
        .await
        .inspect_err(|e| tracing::warn!("no container left after failed recreate: {}", e))?;
    tracing::info!("created {} with ID {}", created.name(), created.new_container());

    let started = created
        .start(runtime)
        .await
        .inspect_err(|e| tracing::warn!("replacement container is not running: {}", e))?;
    tracing::info!("started {}", started.name());

    Ok(started.finish())
}
