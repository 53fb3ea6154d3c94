use std::path::PathBuf;

use clap::{ArgAction, Parser};

/// Backend settings. Every flag can also come from the environment, which
/// `main` fills from a `.env` file first.
#[derive(Parser, Debug, Clone)]
#[command(name = "atlas-local-launcher", version, about = "Atlas Local extension backend")]
pub struct Config {
    /// Unix domain socket to listen on
    #[arg(long = "socket", env = "SOCKET_PATH", default_value = "/run/guest-services/backend.sock")]
    pub socket_path: PathBuf,

    /// Fail the whole listing when one container cannot be inspected
    #[arg(long, env = "STRICT_MODE", default_value_t = true, action = ArgAction::Set)]
    pub strict_mode: bool,

    /// Include stopped containers in listings
    #[arg(long = "all", env = "LIST_ALL", default_value_t = false, action = ArgAction::Set)]
    pub list_all: bool,

    /// Emit logs as JSON lines
    #[arg(long, env = "JSON_LOGS", default_value_t = true, action = ArgAction::Set)]
    pub json_logs: bool,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}
