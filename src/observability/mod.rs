//! Observability for the experiment API
//!
//! - Structured logging through `tracing`
//! - Monotonic request counters, readable as a JSON snapshot
//!
//! # Usage
//!
//! ```ignore
//! use nimbus_api::observability::{init_logging, LogFormat, MetricsRegistry};
//!
//! init_logging(false, LogFormat::Compact);
//!
//! let metrics = MetricsRegistry::new();
//! metrics.record_list(3);
//! ```

mod logging;
mod metrics;

pub use logging::{init_logging, LogFormat};
pub use metrics::{MetricsRegistry, MetricsSnapshot};
