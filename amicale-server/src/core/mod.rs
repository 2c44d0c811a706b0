//! Core module - server configuration, state and startup
//!
//! - [`Config`] - env-driven configuration
//! - [`ServerState`] - shared per-request state
//! - [`Server`] - HTTP server

pub mod config;
pub mod server;
pub mod state;

pub use config::Config;
pub use server::Server;
pub use state::ServerState;
