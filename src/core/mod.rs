pub mod types;
pub mod server;
pub mod config;
pub mod error;
pub mod timing;
