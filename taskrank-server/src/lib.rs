//! taskrank-server: HTTP API, configuration and request intake for taskrank

pub mod api;
pub mod config;
pub mod intake;

pub use api::{AppState, router};
pub use config::{Config, load_config};
