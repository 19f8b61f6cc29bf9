pub mod config;
pub mod error;
pub mod model;
pub mod protocol;
pub mod service;
pub mod transport;
mod utils;
