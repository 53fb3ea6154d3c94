pub mod app_state;
pub mod connection_models;
pub mod container_models;
pub mod launch_models;
