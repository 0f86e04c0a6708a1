//! # Experiment Records
//!
//! The experiment configuration model and the store the read API queries.
//!
//! Records are authored elsewhere; this crate only loads them once at boot
//! and serves them read-only.

mod errors;
mod model;
mod store;

pub use errors::{StoreError, StoreResult};
pub use model::{Branch, Experiment, Status, RESERVED_SLUGS};
pub use store::{ExperimentStore, InMemoryExperimentStore};
