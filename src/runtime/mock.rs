//! In-memory `RuntimeClient` for tests.
//!
//! Keeps fake containers in engine order, records every call and lets tests
//! inject failures per operation.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use tokio::sync::Semaphore;

use super::{RuntimeClient, RuntimeError};
use crate::models::container_models::{ContainerRecord, InspectedContainer, PortMapping};
use crate::models::launch_models::{CreateParams, HostPort};

#[derive(Debug, Clone, PartialEq)]
pub enum RuntimeCall {
    ListContainers(String),
    InspectContainer(String),
    CreateContainer(Option<String>),
    StartContainer(String),
}

#[derive(Debug)]
struct FakeContainer {
    record: ContainerRecord,
    inspected: InspectedContainer,
    running: bool,
}

#[derive(Debug, Default)]
struct Inner {
    calls: Vec<RuntimeCall>,
    containers: Vec<FakeContainer>,
    next_id: u64,
    next_host_port: u16,
    fail_list: bool,
    ///each list call takes one permit before answering
    list_gate: Option<Arc<Semaphore>>,
    fail_inspect: HashSet<String>,
    fail_create: bool,
    fail_start: bool,
}

pub struct MockRuntime {
    inner: Mutex<Inner>,
}

impl MockRuntime {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                next_id: 1,
                next_host_port: 32768,
                ..Default::default()
            }),
        }
    }

    /// Adds a container as the engine would report it. `record.env` stays
    /// unset so the listing has to inspect it.
    pub fn with_container(self, record: ContainerRecord, inspected: InspectedContainer) -> Self {
        self.inner.lock().unwrap().containers.push(FakeContainer {
            record,
            inspected,
            running: true,
        });
        self
    }

    /// Holds every `list_containers` call until a permit is added to `gate`.
    pub fn with_list_gate(self, gate: Arc<Semaphore>) -> Self {
        self.inner.lock().unwrap().list_gate = Some(gate);
        self
    }

    pub fn fail_list(self) -> Self {
        self.inner.lock().unwrap().fail_list = true;
        self
    }

    pub fn fail_inspect(self, id: &str) -> Self {
        self.inner
            .lock()
            .unwrap()
            .fail_inspect
            .insert(id.to_string());
        self
    }

    pub fn fail_create(self) -> Self {
        self.inner.lock().unwrap().fail_create = true;
        self
    }

    pub fn fail_start(self) -> Self {
        self.inner.lock().unwrap().fail_start = true;
        self
    }

    pub fn calls(&self) -> Vec<RuntimeCall> {
        self.inner.lock().unwrap().calls.clone()
    }

    pub fn is_running(&self, id: &str) -> bool {
        self.inner
            .lock()
            .unwrap()
            .containers
            .iter()
            .any(|container| container.record.id == id && container.running)
    }
}

fn matches_label(labels: &HashMap<String, String>, label_filter: &str) -> bool {
    match label_filter.split_once('=') {
        Some((key, value)) => labels.get(key).is_some_and(|v| v == value),
        None => labels.contains_key(label_filter),
    }
}

#[async_trait]
impl RuntimeClient for MockRuntime {
    async fn list_containers(
        &self,
        label_filter: &str,
    ) -> Result<Vec<ContainerRecord>, RuntimeError> {
        let gate = {
            let mut inner = self.inner.lock().unwrap();
            inner
                .calls
                .push(RuntimeCall::ListContainers(label_filter.to_string()));
            inner.list_gate.clone()
        };
        if let Some(gate) = gate {
            if let Ok(permit) = gate.acquire().await {
                permit.forget();
            }
        }

        let inner = self.inner.lock().unwrap();
        if inner.fail_list {
            return Err(RuntimeError::Connection(
                "Cannot connect to the Docker daemon".to_string(),
            ));
        }
        Ok(inner
            .containers
            .iter()
            .filter(|container| matches_label(&container.record.labels, label_filter))
            .map(|container| container.record.clone())
            .collect())
    }

    async fn inspect_container(&self, id: &str) -> Result<InspectedContainer, RuntimeError> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(RuntimeCall::InspectContainer(id.to_string()));
        if inner.fail_inspect.contains(id) {
            return Err(RuntimeError::Other(format!("inspect of {} timed out", id)));
        }
        inner
            .containers
            .iter()
            .find(|container| container.record.id == id)
            .map(|container| container.inspected.clone())
            .ok_or_else(|| RuntimeError::NotFound(id.to_string()))
    }

    async fn create_container(&self, params: &CreateParams) -> Result<String, RuntimeError> {
        let mut inner = self.inner.lock().unwrap();
        inner
            .calls
            .push(RuntimeCall::CreateContainer(params.name.clone()));
        if inner.fail_create {
            return Err(RuntimeError::Other(format!(
                "No such image: {}",
                params.image
            )));
        }

        let id = format!("{:064x}", inner.next_id);
        inner.next_id += 1;
        let host_port = match params.host_port {
            HostPort::Fixed(port) => port,
            HostPort::Auto => {
                let port = inner.next_host_port;
                inner.next_host_port += 1;
                port
            }
        };
        let names = params
            .name
            .iter()
            .map(|name| format!("/{}", name))
            .collect::<Vec<_>>();
        let ports = vec![PortMapping::tcp(params.container_port, Some(host_port))];
        inner.containers.push(FakeContainer {
            record: ContainerRecord {
                id: id.clone(),
                names: names.clone(),
                status: "Created".to_string(),
                labels: params.labels.clone(),
                ports: ports.clone(),
                env: None,
            },
            inspected: InspectedContainer {
                names,
                env: params.env.clone(),
                ports,
            },
            running: false,
        });
        Ok(id)
    }

    async fn start_container(&self, id: &str) -> Result<(), RuntimeError> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(RuntimeCall::StartContainer(id.to_string()));
        if inner.fail_start {
            return Err(RuntimeError::Other(
                "port is already allocated".to_string(),
            ));
        }
        let container = inner
            .containers
            .iter_mut()
            .find(|container| container.record.id == id)
            .ok_or_else(|| RuntimeError::NotFound(id.to_string()))?;
        container.running = true;
        container.record.status = "Up Less than a second".to_string();
        Ok(())
    }
}
