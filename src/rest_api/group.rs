//! # Endpoint Groups
//!
//! Each group narrows the experiment collection by status (and optionally
//! the first-run flag) and exposes one boolean filter. The same list and
//! retrieve logic serves every group.

use std::collections::HashMap;

use crate::experiment::{Experiment, ExperimentStore, Status};

use super::errors::{RestError, RestResult};
use super::filter::{BoolFilter, FilterField};

/// Status condition a record must satisfy to belong to a group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusPredicate {
    Is(Status),
    IsNot(Status),
}

impl StatusPredicate {
    pub fn matches(&self, status: Status) -> bool {
        match self {
            StatusPredicate::Is(expected) => status == *expected,
            StatusPredicate::IsNot(excluded) => status != *excluded,
        }
    }
}

/// A status-scoped view over the experiment store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExperimentGroup {
    name: &'static str,
    status: StatusPredicate,
    first_run_only: bool,
    filter_field: FilterField,
}

impl ExperimentGroup {
    /// Every experiment that has left draft, filterable by `is_first_run`
    pub fn all() -> Self {
        Self {
            name: "all",
            status: StatusPredicate::IsNot(Status::Draft),
            first_run_only: false,
            filter_field: FilterField::IsFirstRun,
        }
    }

    /// Draft experiments, filterable by `is_localized`
    pub fn draft() -> Self {
        Self {
            name: "draft",
            status: StatusPredicate::Is(Status::Draft),
            first_run_only: false,
            filter_field: FilterField::IsLocalized,
        }
    }

    /// Live first-run experiments; keeps the base `is_first_run` filter
    pub fn first_run() -> Self {
        Self {
            name: "first-run",
            status: StatusPredicate::Is(Status::Live),
            first_run_only: true,
            filter_field: FilterField::IsFirstRun,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn filter_field(&self) -> FilterField {
        self.filter_field
    }

    /// Check whether a record is in this group's scope
    pub fn contains(&self, experiment: &Experiment) -> bool {
        self.status.matches(experiment.status) && (!self.first_run_only || experiment.is_first_run)
    }

    /// Parse this group's filter out of raw query parameters
    pub fn parse_filter(&self, params: &HashMap<String, String>) -> RestResult<Option<BoolFilter>> {
        BoolFilter::from_query(self.filter_field, params)
    }

    /// Records in scope, optionally narrowed by `filter`, ordered by slug
    pub fn list(
        &self,
        store: &dyn ExperimentStore,
        filter: Option<BoolFilter>,
    ) -> RestResult<Vec<Experiment>> {
        let records = store.scan(&|e: &Experiment| {
            self.contains(e) && filter.map_or(true, |f| f.matches(e))
        })?;
        Ok(records)
    }

    /// The record with `slug`, if it is in scope
    pub fn retrieve(&self, store: &dyn ExperimentStore, slug: &str) -> RestResult<Experiment> {
        match store.get(slug)? {
            Some(experiment) if self.contains(&experiment) => Ok(experiment),
            _ => Err(RestError::NotFound),
        }
    }
}
