use std::sync::Arc;

use tokio::sync::Mutex;

use crate::{
    controllers::container_controller, error::AppError, models::container_models::DisplayRow,
    runtime::RuntimeClient,
};

/// Shared by every connection the server accepts.
pub struct AppState {
    pub runtime: Arc<dyn RuntimeClient>,
    pub strict_mode: bool,
    ///at most one listing talks to the engine at a time, later ones queue
    listing_guard: Mutex<()>,
}

impl AppState {
    pub fn new(runtime: Arc<dyn RuntimeClient>, strict_mode: bool) -> Self {
        AppState {
            runtime,
            strict_mode,
            listing_guard: Mutex::new(()),
        }
    }

    pub async fn list_rows(&self) -> Result<Vec<DisplayRow>, AppError> {
        let _guard = self.listing_guard.lock().await;
        container_controller::list_containers(self.runtime.as_ref(), self.strict_mode).await
    }
}
