use std::collections::HashMap;

use serde::Serialize;

/// A single port entry as reported by the runtime.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PortMapping {
    ///port the process inside the container listens on
    pub private_port: u16,
    ///host side of the binding, `None` when the port is exposed but not published
    pub public_port: Option<u16>,
    pub protocol: String,
}

#[cfg(test)]
impl PortMapping {
    pub fn tcp(private_port: u16, public_port: Option<u16>) -> Self {
        PortMapping {
            private_port,
            public_port,
            protocol: "tcp".to_string(),
        }
    }
}

/// A container as returned by the label-filtered list call.
///
/// `env` stays `None` until the container has been inspected; the list call
/// of the docker engine never carries it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContainerRecord {
    ///Docker container id
    pub id: String,
    pub names: Vec<String>,
    ///free text status, e.g. "Up 2 minutes"
    pub status: String,
    pub labels: HashMap<String, String>,
    pub ports: Vec<PortMapping>,
    pub env: Option<Vec<String>>,
}

/// The subset of an inspect response the listing needs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InspectedContainer {
    pub names: Vec<String>,
    pub env: Vec<String>,
    pub ports: Vec<PortMapping>,
}

impl ContainerRecord {
    /// Merges an inspect response into the listed record. Inspected ports
    /// replace the listed ones since they carry the actual host bindings.
    pub fn with_inspection(mut self, inspected: InspectedContainer) -> Self {
        self.env = Some(inspected.env);
        self.ports = inspected.ports;
        if self.names.iter().all(|name| name.is_empty()) {
            self.names = inspected.names;
        }
        self
    }

    /// First non-empty name without its leading `/`, or the short id.
    pub fn display_name(&self) -> String {
        match self.names.iter().find(|name| !name.is_empty()) {
            Some(name) => name.strip_prefix('/').unwrap_or(name).to_string(),
            None => self.id.chars().take(12).collect(),
        }
    }

    pub fn version(&self) -> String {
        self.labels.get("version").cloned().unwrap_or_default()
    }
}

/// Row returned to the extension UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayRow {
    pub id: String,
    pub name: String,
    pub status: String,
    pub version: String,
    ///absent when no port is exported
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connection_string: Option<String>,
    ///set only when inspecting failed and the listing runs in lenient mode
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
