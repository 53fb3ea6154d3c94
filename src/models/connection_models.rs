use std::fmt::{self, Display};

pub const USERNAME_ENV: &str = "MONGODB_INITDB_ROOT_USERNAME";
pub const PASSWORD_ENV: &str = "MONGODB_INITDB_ROOT_PASSWORD";
pub const DATABASE_ENV: &str = "MONGODB_INITDB_DATABASE";
pub const DEFAULT_DATABASE: &str = "test";

/// Where and how to reach the mongod inside a launched container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionEndpoint {
    pub host_port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
    pub database: String,
}

impl ConnectionEndpoint {
    /// Both halves of the credentials, or nothing. A lone username or
    /// password never makes it into the connection string.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (self.username.as_deref(), self.password.as_deref()) {
            (Some(username), Some(password)) if !username.is_empty() && !password.is_empty() => {
                Some((username, password))
            }
            _ => None,
        }
    }

    pub fn connection_string(&self) -> String {
        self.to_string()
    }
}

impl Display for ConnectionEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.credentials() {
            Some((username, password)) => write!(
                f,
                "mongodb://{}:{}@localhost:{}/{}?directConnection=true&authSource=admin",
                username, password, self.host_port, self.database
            ),
            None => write!(
                f,
                "mongodb://localhost:{}/{}?directConnection=true",
                self.host_port, self.database
            ),
        }
    }
}
