pub mod controllers;
pub mod error;
pub mod handlers;
pub mod models;
pub mod runtime;
pub mod utils;
