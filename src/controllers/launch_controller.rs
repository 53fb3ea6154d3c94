use std::{collections::HashMap, sync::OnceLock};

use regex::Regex;

use crate::{
    controllers::{
        connection_controller::MONGODB_PORT,
        container_controller::{ATLAS_LOCAL_LABEL, ATLAS_LOCAL_LABEL_VALUE},
    },
    models::{
        connection_models::{DATABASE_ENV, PASSWORD_ENV, USERNAME_ENV},
        launch_models::{
            non_blank, AuthChoice, CreateParams, HostPort, LaunchField, LaunchRequest,
            ValidationErrors, ATLAS_LOCAL_IMAGE,
        },
    },
};

static CONTAINER_NAME: OnceLock<Regex> = OnceLock::new();

/// Same rule the docker engine applies to container names.
fn is_valid_container_name(name: &str) -> bool {
    CONTAINER_NAME
        .get_or_init(|| Regex::new(r"^[a-zA-Z0-9][a-zA-Z0-9_.-]*$").unwrap())
        .is_match(name)
}

/// Validates a launch form and turns it into creation parameters.
///
/// Every rule is checked so the caller gets all field errors at once.
pub fn build(request: &LaunchRequest) -> Result<CreateParams, ValidationErrors> {
    let mut errors = ValidationErrors::default();
    let auth = request.auth_choice() == AuthChoice::Auth;
    let username = non_blank(&request.username);
    let password = non_blank(&request.password);

    if auth && username.is_none() {
        errors.insert(LaunchField::Username, "required");
    }
    if auth && password.is_none() {
        errors.insert(LaunchField::Password, "required");
    }

    let host_port = match &request.port {
        Some(port) if !port.is_blank() => match port.as_port() {
            Some(port) => HostPort::Fixed(port),
            None => {
                errors.insert(LaunchField::Port, "out of range");
                HostPort::Auto
            }
        },
        _ => HostPort::Auto,
    };

    //names are trimmed, credentials and database are passed through as typed
    let name = non_blank(&request.name).map(str::trim);
    if let Some(name) = name {
        if !is_valid_container_name(name) {
            errors.insert(LaunchField::Name, "invalid");
        }
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    let mut env = Vec::new();
    if let (true, Some(username), Some(password)) = (auth, username, password) {
        env.push(format!("{}={}", USERNAME_ENV, username));
        env.push(format!("{}={}", PASSWORD_ENV, password));
    }
    if let Some(database) = non_blank(&request.database) {
        env.push(format!("{}={}", DATABASE_ENV, database));
    }

    let mut labels = HashMap::new();
    labels.insert(
        ATLAS_LOCAL_LABEL.to_string(),
        ATLAS_LOCAL_LABEL_VALUE.to_string(),
    );

    Ok(CreateParams {
        name: name.map(str::to_string),
        image: ATLAS_LOCAL_IMAGE.to_string(),
        env,
        labels,
        container_port: MONGODB_PORT,
        host_port,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(body: serde_json::Value) -> LaunchRequest {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn missing_username_is_the_only_error() {
        let errors = build(&request(serde_json::json!({
            "authChoice": "auth",
            "username": "",
            "password": "x"
        })))
        .unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get(LaunchField::Username), Some("required"));
    }

    #[test]
    fn port_out_of_range_is_the_only_error() {
        let errors = build(&request(serde_json::json!({"port": "70000"}))).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get(LaunchField::Port), Some("out of range"));
    }

    #[test]
    fn all_errors_are_reported_together() {
        let errors = build(&request(serde_json::json!({
            "name": "-bad name",
            "authChoice": "auth",
            "port": 0
        })))
        .unwrap_err();
        assert_eq!(errors.len(), 4);
        assert_eq!(errors.get(LaunchField::Name), Some("invalid"));
        assert_eq!(errors.get(LaunchField::Port), Some("out of range"));
        assert_eq!(errors.get(LaunchField::Username), Some("required"));
        assert_eq!(errors.get(LaunchField::Password), Some("required"));
    }

    #[test]
    fn explicit_port_without_auth() {
        let params = build(&request(serde_json::json!({
            "port": "27017",
            "authChoice": "skip",
            "username": "ignored"
        })))
        .unwrap();
        assert_eq!(params.host_port, HostPort::Fixed(27017));
        assert!(params.env.is_empty());
        assert_eq!(params.image, "mongodb/mongodb-atlas-local");
        assert_eq!(params.container_port_key(), "27017/tcp");
        assert_eq!(
            params.labels.get("mongodb-atlas-local").map(String::as_str),
            Some("container")
        );
    }

    #[test]
    fn credentials_and_database_become_env() {
        let params = build(&request(serde_json::json!({
            "name": "atlas-dev",
            "username": "alice",
            "password": "secret",
            "database": "orders",
            "port": ""
        })))
        .unwrap();
        assert_eq!(params.name.as_deref(), Some("atlas-dev"));
        assert_eq!(params.host_port, HostPort::Auto);
        assert_eq!(
            params.env,
            vec![
                "MONGODB_INITDB_ROOT_USERNAME=alice".to_string(),
                "MONGODB_INITDB_ROOT_PASSWORD=secret".to_string(),
                "MONGODB_INITDB_DATABASE=orders".to_string(),
            ]
        );
    }

    #[test]
    fn credentials_keep_surrounding_whitespace() {
        let params = build(&request(serde_json::json!({
            "name": " atlas-dev ",
            "username": "alice",
            "password": " s3cret ",
            "database": "orders "
        })))
        .unwrap();
        assert_eq!(params.name.as_deref(), Some("atlas-dev"));
        assert!(params
            .env
            .contains(&"MONGODB_INITDB_ROOT_PASSWORD= s3cret ".to_string()));
        assert!(params
            .env
            .contains(&"MONGODB_INITDB_DATABASE=orders ".to_string()));
    }

    #[test]
    fn whitespace_only_password_is_required() {
        let errors = build(&request(serde_json::json!({
            "username": "alice",
            "password": "   "
        })))
        .unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get(LaunchField::Password), Some("required"));
    }

    #[test]
    fn empty_request_is_valid() {
        let params = build(&LaunchRequest::default()).unwrap();
        assert_eq!(params.name, None);
        assert_eq!(params.host_port, HostPort::Auto);
        assert!(params.env.is_empty());
    }
}
