// ABOUTME: Recording in-memory engine for unit tests.
// ABOUTME: Scripts pull streams and failures, and logs every call in order.

use crate::runtime::traits::sealed::Sealed;
use crate::runtime::traits::{
    ContainerError, ContainerOps, ContainerRef, ContainerSnapshot, ContainerState, EndpointSettings,
    HostConfig, ImageError, ImageOps, ProcessConfig, PullLine, PullStream, RecreateSpec,
    RemoveOptions,
};
use crate::types::{ContainerId, ImageRef};
use async_trait::async_trait;
use futures::{StreamExt, stream};
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

pub(crate) const DIGEST_PRESENT: &[&str] = &[
    r#"{"status":"Pulling from library/nginx","id":"latest"}"#,
    r#"{"status":"Digest: sha256:4c0fdaa8b6341bfdeca5f18f7837462c80cff90527ee35ef185571e1c327beac"}"#,
    r#"{"status":"Status: Image is up to date for nginx:latest"}"#,
];

pub(crate) const NEW_IMAGE: &[&str] = &[
    r#"{"status":"Pulling fs layer"}"#,
    r#"{"status":"Pulling..."}"#,
    r#"{"status":"Downloading","progressDetail":{"current":1024,"total":4096},"id":"a2abf6c4d29d"}"#,
    r#"{"status":"Pull complete","id":"a2abf6c4d29d"}"#,
    r#"{"status":"Status: Downloaded newer image"}"#,
];

/// Engine operations, for call logs and failure injection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Op {
    List,
    Pull,
    /// The pull opens, then errors after its second line.
    PullStream,
    Inspect,
    Stop,
    Remove,
    Create,
    Start,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    List,
    Pull(String),
    Inspect(ContainerId),
    Stop(ContainerId),
    Remove(ContainerId, RemoveOptions),
    Create(RecreateSpec),
    Start(ContainerId),
}

impl Call {
    pub(crate) fn op(&self) -> Op {
        match self {
            Call::List => Op::List,
            Call::Pull(_) => Op::Pull,
            Call::Inspect(_) => Op::Inspect,
            Call::Stop(_) => Op::Stop,
            Call::Remove(..) => Op::Remove,
            Call::Create(_) => Op::Create,
            Call::Start(_) => Op::Start,
        }
    }
}

#[derive(Default)]
pub(crate) struct FakeRuntime {
    containers: Mutex<Vec<ContainerRef>>,
    snapshots: Mutex<HashMap<ContainerId, ContainerSnapshot>>,
    pulls: HashMap<String, Vec<String>>,
    failures: HashSet<Op>,
    calls: Mutex<Vec<Call>>,
    lines_read: Arc<AtomicUsize>,
}

impl FakeRuntime {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Add a container; its image pull yields `pull_lines`.
    pub(crate) fn with_container(
        mut self,
        name: &str,
        state: ContainerState,
        image: &str,
        pull_lines: &[&str],
    ) -> Self {
        let id = ContainerId::new(format!("{name}-id"));
        self.containers.get_mut().push(ContainerRef {
            id: id.clone(),
            names: vec![format!("/{name}")],
            state: state.clone(),
            image: image.to_string(),
        });
        self.snapshots.get_mut().insert(id.clone(), snapshot(&id, name, state, image));

        let reference = ImageRef::parse(image).expect("valid test image").to_string();
        self.pulls
            .insert(reference, pull_lines.iter().map(|l| l.to_string()).collect());
        self
    }

    pub(crate) fn with_running(self, name: &str, image: &str, pull_lines: &[&str]) -> Self {
        self.with_container(name, ContainerState::Running, image, pull_lines)
    }

    pub(crate) fn failing_on(mut self, op: Op) -> Self {
        self.failures.insert(op);
        self
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }

    pub(crate) fn ops(&self) -> Vec<Op> {
        self.calls.lock().iter().map(Call::op).collect()
    }

    /// Pull lines consumed by callers across all pulls.
    pub(crate) fn lines_read(&self) -> usize {
        self.lines_read.load(Ordering::SeqCst)
    }

    pub(crate) fn running(&self) -> Vec<ContainerRef> {
        self.containers
            .lock()
            .iter()
            .filter(|c| c.is_running())
            .cloned()
            .collect()
    }

    fn record(&self, call: Call) -> Result<(), ContainerError> {
        let op = call.op();
        self.calls.lock().push(call);
        if self.failures.contains(&op) {
            return Err(ContainerError::Runtime(format!("injected {op:?} failure")));
        }
        Ok(())
    }
}

fn snapshot(id: &ContainerId, name: &str, state: ContainerState, image: &str) -> ContainerSnapshot {
    let mut endpoints = HashMap::new();
    endpoints.insert(
        "bridge".to_string(),
        EndpointSettings {
            aliases: Some(vec![name.to_string()]),
            ..Default::default()
        },
    );

    ContainerSnapshot {
        id: id.clone(),
        name: name.to_string(),
        state,
        config: ProcessConfig {
            image: Some(image.to_string()),
            env: Some(vec![format!("SERVICE={name}")]),
            ..Default::default()
        },
        host_config: HostConfig {
            binds: Some(vec![format!("{name}-data:/data")]),
            ..Default::default()
        },
        endpoints,
    }
}

impl Sealed for FakeRuntime {}

#[async_trait]
impl ImageOps for FakeRuntime {
    async fn pull_image(&self, reference: &ImageRef) -> Result<PullStream, ImageError> {
        let reference = reference.to_string();
        self.calls.lock().push(Call::Pull(reference.clone()));
        if self.failures.contains(&Op::Pull) {
            return Err(ImageError::PullFailed(format!("{reference}: injected failure")));
        }

        let mut lines: Vec<Result<PullLine, ImageError>> = self
            .pulls
            .get(&reference)
            .cloned()
            .unwrap_or_default()
            .into_iter()
            .map(|l| Ok(PullLine::new(l)))
            .collect();
        if self.failures.contains(&Op::PullStream) {
            lines.truncate(2);
            lines.push(Err(ImageError::PullFailed("connection reset".to_string())));
        }

        let counter = Arc::clone(&self.lines_read);
        let stream = stream::iter(lines).inspect(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        Ok(Box::pin(stream))
    }
}

#[async_trait]
impl ContainerOps for FakeRuntime {
    async fn list_running(&self) -> Result<Vec<ContainerRef>, ContainerError> {
        self.record(Call::List)?;
        Ok(self.containers.lock().clone())
    }

    async fn inspect_container(
        &self,
        id: &ContainerId,
    ) -> Result<ContainerSnapshot, ContainerError> {
        self.record(Call::Inspect(id.clone()))?;
        self.snapshots
            .lock()
            .get(id)
            .cloned()
            .ok_or_else(|| ContainerError::NotFound(id.to_string()))
    }

    async fn stop_container(
        &self,
        id: &ContainerId,
        _timeout: Option<Duration>,
    ) -> Result<(), ContainerError> {
        self.record(Call::Stop(id.clone()))?;
        let mut containers = self.containers.lock();
        let container = containers
            .iter_mut()
            .find(|c| &c.id == id)
            .ok_or_else(|| ContainerError::NotFound(id.to_string()))?;
        container.state = ContainerState::Exited;
        Ok(())
    }

    async fn remove_container(
        &self,
        id: &ContainerId,
        opts: RemoveOptions,
    ) -> Result<(), ContainerError> {
        self.record(Call::Remove(id.clone(), opts))?;
        self.containers.lock().retain(|c| &c.id != id);
        self.snapshots.lock().remove(id);
        Ok(())
    }

    async fn create_container(&self, spec: &RecreateSpec) -> Result<ContainerId, ContainerError> {
        self.record(Call::Create(spec.clone()))?;
        let mut containers = self.containers.lock();
        if containers
            .iter()
            .any(|c| c.names.iter().any(|n| n.trim_start_matches('/') == spec.name))
        {
            return Err(ContainerError::AlreadyExists(spec.name.clone()));
        }

        let id = ContainerId::new(format!("{}-new", spec.name));
        containers.push(ContainerRef {
            id: id.clone(),
            names: vec![format!("/{}", spec.name)],
            state: ContainerState::Created,
            image: spec.config.image.clone().unwrap_or_default(),
        });
        Ok(id)
    }

    async fn start_container(&self, id: &ContainerId) -> Result<(), ContainerError> {
        self.record(Call::Start(id.clone()))?;
        let mut containers = self.containers.lock();
        let container = containers
            .iter_mut()
            .find(|c| &c.id == id)
            .ok_or_else(|| ContainerError::NotFound(id.to_string()))?;
        container.state = ContainerState::Running;
        Ok(())
    }
}
