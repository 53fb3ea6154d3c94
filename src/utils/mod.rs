pub mod config_utils;
pub mod docker_utils;
pub mod listener_utils;
pub mod logging_utils;
pub mod response_utils;
