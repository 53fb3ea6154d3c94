pub mod connection_controller;
pub mod container_controller;
pub mod launch_controller;
