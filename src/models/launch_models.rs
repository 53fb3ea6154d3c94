use std::collections::{BTreeMap, HashMap};
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

pub const ATLAS_LOCAL_IMAGE: &str = "mongodb/mongodb-atlas-local";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthChoice {
    Auth,
    Skip,
}

/// The UI posts the port from a text field, other callers send a number.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum PortInput {
    Number(serde_json::Number),
    Text(String),
}

impl PortInput {
    pub fn is_blank(&self) -> bool {
        matches!(self, PortInput::Text(text) if text.trim().is_empty())
    }

    /// `None` unless the input is an integer in 1..=65535.
    pub fn as_port(&self) -> Option<u16> {
        let value = match self {
            PortInput::Number(number) => number.as_i64()?,
            PortInput::Text(text) => text.trim().parse::<i64>().ok()?,
        };
        u16::try_from(value).ok().filter(|port| *port != 0)
    }
}

/// Body of `POST /containers`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LaunchRequest {
    pub name: Option<String>,
    pub port: Option<PortInput>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub database: Option<String>,
    pub auth_choice: Option<AuthChoice>,
}

impl LaunchRequest {
    /// An explicit choice wins; otherwise any credential means the caller
    /// wants authentication.
    pub fn auth_choice(&self) -> AuthChoice {
        match self.auth_choice {
            Some(choice) => choice,
            None if non_blank(&self.username).is_some() || non_blank(&self.password).is_some() => {
                AuthChoice::Auth
            }
            None => AuthChoice::Skip,
        }
    }
}

/// The value as typed, unless it is missing or only whitespace.
pub fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|value| !value.trim().is_empty())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LaunchField {
    Name,
    Port,
    Username,
    Password,
}

impl Display for LaunchField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Name => write!(f, "name"),
            Self::Port => write!(f, "port"),
            Self::Username => write!(f, "username"),
            Self::Password => write!(f, "password"),
        }
    }
}

/// Launch form errors keyed by field, at most one per field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<LaunchField, &'static str>);

impl ValidationErrors {
    pub fn insert(&mut self, field: LaunchField, message: &'static str) {
        self.0.insert(field, message);
    }

    #[cfg(test)]
    pub fn get(&self, field: LaunchField) -> Option<&'static str> {
        self.0.get(&field).copied()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .0
            .iter()
            .map(|(field, message)| format!("{}: {}", field, message))
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "{}", joined)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostPort {
    Fixed(u16),
    ///let the engine pick a free port
    Auto,
}

/// Everything the runtime needs to create an Atlas Local container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateParams {
    ///container name and hostname
    pub name: Option<String>,
    pub image: String,
    pub env: Vec<String>,
    pub labels: HashMap<String, String>,
    pub container_port: u16,
    pub host_port: HostPort,
}

impl CreateParams {
    /// Key of the port in docker's `port/protocol` notation.
    pub fn container_port_key(&self) -> String {
        format!("{}/tcp", self.container_port)
    }
}
