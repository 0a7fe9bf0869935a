// ABOUTME: Container name used to select a running container.
// ABOUTME: Normalizes the leading slash the engine prepends when listing.

use std::fmt;

/// A container name, stored without the engine's leading `/`.
///
/// No grammar is enforced: a name the engine would never accept simply
/// matches no running container.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContainerName(String);

impl ContainerName {
    /// Normalize a user-supplied name. A single leading `/` is dropped, so
    /// names copied from `docker inspect` output work as-is.
    pub fn new(value: &str) -> Self {
        Self(strip_engine_prefix(value).to_string())
    }

    /// Whether an engine-reported name refers to this container.
    pub fn matches(&self, engine_name: &str) -> bool {
        strip_engine_prefix(engine_name) == self.0
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Drop the single leading `/` the engine puts in front of container names.
pub(crate) fn strip_engine_prefix(name: &str) -> &str {
    name.strip_prefix('/').unwrap_or(name)
}

impl fmt::Display for ContainerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ContainerName {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}
