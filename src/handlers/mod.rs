pub mod container_handler;
pub mod router_handler;
