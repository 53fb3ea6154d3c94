extern crate dotenv;

use std::sync::Arc;

use atlas_local_launcher::{
    models::app_state::AppState,
    utils::{config_utils::Config, docker_utils, listener_utils, logging_utils},
};
use clap::Parser;
use dotenv::dotenv;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    let config = Config::parse();
    logging_utils::init(&config)?;

    //one docker handle for the lifetime of the process
    let runtime = docker_utils::connect(config.list_all)?;
    let state = Arc::new(AppState::new(Arc::new(runtime), config.strict_mode));

    let listener = listener_utils::bind(&config.socket_path)?;
    info!(
        socket = %config.socket_path.display(),
        strict_mode = config.strict_mode,
        "Starting listening"
    );
    listener_utils::serve(listener, state, async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!(error = %err, "failed to listen for shutdown signal");
            std::future::pending::<()>().await;
        }
    })
    .await?;

    if let Err(err) = std::fs::remove_file(&config.socket_path) {
        warn!(socket = %config.socket_path.display(), error = %err, "failed to remove socket");
    }
    Ok(())
}
