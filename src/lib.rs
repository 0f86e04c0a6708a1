//! nimbus-api - A read-only HTTP API over experiment configurations
//!
//! Three endpoint groups (non-draft, draft, live first-run) list and
//! retrieve experiment records by slug.

pub mod cli;
pub mod experiment;
pub mod http_server;
pub mod observability;
pub mod rest_api;
