use std::collections::HashMap;

use async_trait::async_trait;
use bollard::{
    container::{
        Config, CreateContainerOptions, InspectContainerOptions, ListContainersOptions,
        StartContainerOptions,
    },
    models::{ContainerSummary, HostConfig, PortBinding, PortMap},
    Docker,
};
use tracing::debug;

use crate::{
    models::{
        container_models::{ContainerRecord, InspectedContainer, PortMapping},
        launch_models::{CreateParams, HostPort},
    },
    runtime::{RuntimeClient, RuntimeError},
};

/// `RuntimeClient` backed by the local docker engine.
pub struct DockerRuntime {
    docker: Docker,
    ///include stopped containers in listings
    list_all: bool,
}

/// Connects once at start up; the handle is then shared by every request.
pub fn connect(list_all: bool) -> Result<DockerRuntime, RuntimeError> {
    let docker = Docker::connect_with_local_defaults()
        .map_err(|err| RuntimeError::Connection(err.to_string()))?;
    Ok(DockerRuntime { docker, list_all })
}

fn to_err(err: bollard::errors::Error) -> RuntimeError {
    match &err {
        bollard::errors::Error::DockerResponseServerError {
            status_code: 404, ..
        } => RuntimeError::NotFound(err.to_string()),
        _ => RuntimeError::Other(err.to_string()),
    }
}

fn summary_to_record(summary: ContainerSummary) -> ContainerRecord {
    let ports = summary
        .ports
        .unwrap_or_default()
        .into_iter()
        .map(|port| PortMapping {
            private_port: port.private_port,
            public_port: port.public_port,
            protocol: port
                .typ
                .map(|typ| typ.to_string())
                .unwrap_or_else(|| "tcp".to_string()),
        })
        .collect();
    ContainerRecord {
        id: summary.id.unwrap_or_default(),
        names: summary.names.unwrap_or_default(),
        status: summary.status.unwrap_or_default(),
        labels: summary.labels.unwrap_or_default(),
        ports,
        env: None,
    }
}

/// Flattens docker's `{"27017/tcp": [{"HostPort": "49153"}]}` port map.
/// Only the first binding of each port is kept; an unparsable host port is
/// treated as unbound. Entries are sorted so repeated inspects compare equal.
pub fn port_map_to_mappings(port_map: PortMap) -> Vec<PortMapping> {
    let mut mappings = port_map
        .into_iter()
        .filter_map(|(key, bindings)| {
            let (port, protocol) = key.split_once('/').unwrap_or((key.as_str(), "tcp"));
            let private_port = port.parse::<u16>().ok()?;
            let public_port = bindings
                .unwrap_or_default()
                .into_iter()
                .next()
                .and_then(|binding| binding.host_port)
                .and_then(|host_port| host_port.parse::<u16>().ok());
            Some(PortMapping {
                private_port,
                public_port,
                protocol: protocol.to_string(),
            })
        })
        .collect::<Vec<_>>();
    mappings.sort_by(|a, b| {
        (a.private_port, &a.protocol).cmp(&(b.private_port, &b.protocol))
    });
    mappings
}

#[async_trait]
impl RuntimeClient for DockerRuntime {
    async fn list_containers(
        &self,
        label_filter: &str,
    ) -> Result<Vec<ContainerRecord>, RuntimeError> {
        let mut filters = HashMap::new();
        filters.insert("label".to_string(), vec![label_filter.to_string()]);
        let options = ListContainersOptions {
            all: self.list_all,
            filters,
            ..Default::default()
        };
        let containers = self
            .docker
            .list_containers(Some(options))
            .await
            .map_err(to_err)?;
        debug!(count = containers.len(), label_filter, "listed containers");
        Ok(containers.into_iter().map(summary_to_record).collect())
    }

    async fn inspect_container(&self, id: &str) -> Result<InspectedContainer, RuntimeError> {
        let inspect = self
            .docker
            .inspect_container(id, None::<InspectContainerOptions>)
            .await
            .map_err(to_err)?;
        let env = inspect
            .config
            .and_then(|config| config.env)
            .unwrap_or_default();
        let ports = inspect
            .network_settings
            .and_then(|settings| settings.ports)
            .map(port_map_to_mappings)
            .unwrap_or_default();
        Ok(InspectedContainer {
            names: inspect.name.into_iter().collect(),
            env,
            ports,
        })
    }

    async fn create_container(&self, params: &CreateParams) -> Result<String, RuntimeError> {
        let port_key = params.container_port_key();
        let host_port = match params.host_port {
            HostPort::Fixed(port) => Some(port.to_string()),
            //an empty binding lets the engine pick a free port
            HostPort::Auto => None,
        };
        let mut port_bindings: PortMap = HashMap::new();
        port_bindings.insert(
            port_key.clone(),
            Some(vec![PortBinding {
                host_ip: Some("0.0.0.0".to_string()),
                host_port,
            }]),
        );
        let mut exposed_ports = HashMap::new();
        exposed_ports.insert(port_key, HashMap::new());

        let host_config = HostConfig {
            port_bindings: Some(port_bindings),
            ..Default::default()
        };
        let config = Config {
            hostname: params.name.clone(),
            image: Some(params.image.clone()),
            env: Some(params.env.clone()),
            labels: Some(params.labels.clone()),
            exposed_ports: Some(exposed_ports),
            host_config: Some(host_config),
            ..Default::default()
        };
        let options = params.name.as_ref().map(|name| CreateContainerOptions {
            name: name.clone(),
            platform: None,
        });
        let response = self
            .docker
            .create_container(options, config)
            .await
            .map_err(to_err)?;
        Ok(response.id)
    }

    async fn start_container(&self, id: &str) -> Result<(), RuntimeError> {
        self.docker
            .start_container(id, None::<StartContainerOptions<String>>)
            .await
            .map_err(to_err)
    }
}
