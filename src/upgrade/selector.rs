// ABOUTME: Resolves an upgrade selection against the running containers.
// ABOUTME: One list call; name matching ignores the engine's leading slash.

use super::error::UpgradeError;
use super::request::Selection;
use crate::runtime::{ContainerOps, ContainerRef};

/// Containers to upgrade, in the order the engine listed them.
///
/// A name that matches no running container selects nothing. A name that
/// matches a container in any state other than running is an error, since
/// the recreate sequence has to stop it first.
///
/// # Errors
///
/// Returns `UpgradeError::ListFailed` if the listing fails and
/// `UpgradeError::NotRunning` for a named container that is not running.
pub async fn select<R: ContainerOps>(
    runtime: &R,
    selection: &Selection,
) -> Result<Vec<ContainerRef>, UpgradeError> {
    let containers = runtime
        .list_running()
        .await
        .map_err(|source| UpgradeError::ListFailed { source })?;

    let name = match selection {
        Selection::AllRunning => return Ok(containers),
        Selection::Named(name) => name,
    };

    let Some(container) = containers
        .into_iter()
        .find(|c| c.names.iter().any(|n| name.matches(n)))
    else {
        tracing::info!("no running container named {}", name);
        return Ok(Vec::new());
    };

    if !container.is_running() {
        return Err(UpgradeError::NotRunning {
            container: name.to_string(),
            state: container.state,
        });
    }

    Ok(vec![container])
}
