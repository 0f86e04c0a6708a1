//! # Experiment REST API
//!
//! Read-only list and retrieve endpoints over the experiment store.
//!
//! | Path | Records |
//! |---|---|
//! | `/experiments/` | status is not Draft, filter `is_first_run` |
//! | `/experiments/draft/` | status is Draft, filter `is_localized` |
//! | `/experiments/first-run/` | status is Live and `is_first_run` |
//!
//! Each path also serves `{slug}/` for single-record lookup.

pub mod errors;
pub mod filter;
pub mod group;
pub mod routes;

pub use errors::{ErrorResponse, RestError, RestResult};
pub use filter::{BoolFilter, FilterField};
pub use group::{ExperimentGroup, StatusPredicate};
pub use routes::{experiment_routes, GroupState};
