use crate::models::{
    connection_models::{
        ConnectionEndpoint, DATABASE_ENV, DEFAULT_DATABASE, PASSWORD_ENV, USERNAME_ENV,
    },
    container_models::ContainerRecord,
};

/// Port mongod listens on inside the Atlas Local image.
pub const MONGODB_PORT: u16 = 27017;

/// Host port published for 27017/tcp, if any. Port 0 means unbound.
fn published_port(record: &ContainerRecord) -> Option<u16> {
    record
        .ports
        .iter()
        .filter(|port| port.private_port == MONGODB_PORT && port.protocol.eq_ignore_ascii_case("tcp"))
        .find_map(|port| port.public_port.filter(|public_port| *public_port != 0))
}

/// Derives the endpoint of an inspected container. `None` means nothing is
/// published for 27017/tcp, which the UI shows as "no port exported".
///
/// The env scan is linear and a repeated key overrides the earlier value.
pub fn resolve(record: &ContainerRecord) -> Option<ConnectionEndpoint> {
    let host_port = published_port(record)?;

    let mut username = None;
    let mut password = None;
    let mut database = DEFAULT_DATABASE.to_string();
    for entry in record.env.iter().flatten() {
        let Some((key, value)) = entry.split_once('=') else {
            continue;
        };
        match key {
            USERNAME_ENV => username = Some(value.to_string()),
            PASSWORD_ENV => password = Some(value.to_string()),
            DATABASE_ENV => database = value.to_string(),
            _ => {}
        }
    }

    Some(ConnectionEndpoint {
        host_port,
        username,
        password,
        database,
    })
}

pub fn connection_string(record: &ContainerRecord) -> Option<String> {
    resolve(record).map(|endpoint| endpoint.connection_string())
}
