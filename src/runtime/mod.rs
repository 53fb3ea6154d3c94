#[cfg(test)]
pub mod mock;

use async_trait::async_trait;

use crate::models::container_models::{ContainerRecord, InspectedContainer};
use crate::models::launch_models::CreateParams;

#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    #[error("container not found: {0}")]
    NotFound(String),

    #[error("docker connection failed: {0}")]
    Connection(String),

    #[error("{0}")]
    Other(String),
}

/// The container engine operations the extension backend relies on.
///
/// One implementation talks to the docker engine through bollard, the test
/// build adds an in-memory one. A single instance is created at start up and
/// shared by every request.
#[async_trait]
pub trait RuntimeClient: Send + Sync {
    /// Containers carrying `label_filter` (`key=value`), in engine order.
    async fn list_containers(&self, label_filter: &str)
        -> Result<Vec<ContainerRecord>, RuntimeError>;

    async fn inspect_container(&self, id: &str) -> Result<InspectedContainer, RuntimeError>;

    /// Creates the container and returns its id. Does not start it.
    async fn create_container(&self, params: &CreateParams) -> Result<String, RuntimeError>;

    async fn start_container(&self, id: &str) -> Result<(), RuntimeError>;
}
