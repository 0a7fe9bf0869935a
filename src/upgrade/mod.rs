// ABOUTME: Pull-and-recreate upgrades of running containers.
// ABOUTME: Selects targets, then upgrades them one at a time, stopping at the first failure.

mod classify;
mod error;
mod report;
mod request;
mod selector;
mod state;
mod transitions;
mod upgrader;

pub use classify::{
    ClassifierKind, DigestLineClassifier, PullClassifier, PullOutcome, StatusMessageClassifier,
};
pub use error::{SelectionError, UpgradeError, UpgradeErrorKind};
pub use report::{UpgradeOutcome, UpgradeReport};
pub use request::{Selection, UpgradeRequest};
pub use selector::select;
pub use state::{Created, Inspected, Pulled, Removed, Selected, Started, Stopped, UpToDate};
pub use transitions::PullResult;
pub use upgrader::{Upgrade, UpgradeOptions, upgrade_container};

use crate::runtime::{ContainerOps, ImageOps};

/// Upgrade every container the request selects.
///
/// Containers are upgraded sequentially in listing order. The first failure
/// aborts the run; containers upgraded before it keep their new version.
///
/// # Errors
///
/// Returns the first `UpgradeError` encountered.
pub async fn upgrade<R: ContainerOps + ImageOps>(
    runtime: &R,
    request: &UpgradeRequest,
    options: &UpgradeOptions,
) -> Result<Vec<UpgradeReport>, UpgradeError> {
    let mut reports = Vec::new();
    upgrade_with(runtime, request, options, |report| reports.push(report.clone())).await?;
    Ok(reports)
}

/// Like [`upgrade`], calling `on_report` as soon as each container is done.
///
/// # Errors
///
/// Returns the first `UpgradeError` encountered.
pub async fn upgrade_with<R, F>(
    runtime: &R,
    request: &UpgradeRequest,
    options: &UpgradeOptions,
    mut on_report: F,
) -> Result<usize, UpgradeError>
where
    R: ContainerOps + ImageOps,
    F: FnMut(&UpgradeReport),
{
    let targets = select(runtime, request.selection()).await?;
    tracing::debug!("{} container(s) selected", targets.len());

    let mut done = 0;
    for target in targets {
        let report = upgrade_container(runtime, target, request.pull_only(), options).await?;
        on_report(&report);
        done += 1;
    }

    Ok(done)
}
