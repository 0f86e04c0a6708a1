//! # HTTP Server Module
//!
//! Axum server exposing the experiment API.
//!
//! # Endpoints
//!
//! - `/health` - Health check
//! - `/metrics` - Request counters
//! - `{api_prefix}/experiments/*` - Experiment list and retrieve

pub mod config;
pub mod observability_routes;
pub mod server;

pub use config::{ConfigError, HttpServerConfig};
pub use server::HttpServer;
