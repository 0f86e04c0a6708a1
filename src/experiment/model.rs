//! # Experiment Model
//!
//! An experiment record as stored and as served. Related data (branches and
//! the reference branch) lives inline on the record, so every response
//! carries it.

use std::fmt;
use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::errors::{StoreError, StoreResult};

/// Lifecycle stage of an experiment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    Draft,
    Preview,
    Live,
    Complete,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Draft => "Draft",
            Status::Preview => "Preview",
            Status::Live => "Live",
            Status::Complete => "Complete",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A treatment or control branch of an experiment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Branch {
    pub slug: String,
    #[serde(default)]
    pub name: String,
    /// Relative enrollment weight
    #[serde(default = "default_ratio")]
    pub ratio: u32,
    /// Feature configuration value, kept as opaque JSON
    #[serde(default)]
    pub feature_value: serde_json::Value,
}

fn default_ratio() -> u32 {
    1
}

impl Branch {
    pub fn new(slug: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            name: name.into(),
            ratio: default_ratio(),
            feature_value: serde_json::Value::Null,
        }
    }
}

/// Experiment configuration record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Experiment {
    /// Unique lookup key
    pub slug: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub public_description: String,
    pub status: Status,
    #[serde(default)]
    pub application: String,
    #[serde(default)]
    pub channel: String,
    #[serde(default)]
    pub is_first_run: bool,
    #[serde(default)]
    pub is_localized: bool,
    /// Localization payload, a JSON document encoded as a string
    #[serde(default)]
    pub localizations: Option<String>,
    /// Slug of the control branch
    #[serde(default)]
    pub reference_branch: Option<String>,
    #[serde(default)]
    pub branches: Vec<Branch>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}

/// Path segments the endpoint groups occupy; a record slug may not take them
pub const RESERVED_SLUGS: &[&str] = &["draft", "first-run"];

fn slug_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[a-z0-9][a-z0-9_-]*$").expect("slug pattern is valid"))
}

impl Experiment {
    /// Create a record with the given slug and status and empty related data
    pub fn new(slug: impl Into<String>, status: Status) -> Self {
        let slug = slug.into();
        Self {
            name: slug.clone(),
            slug,
            public_description: String::new(),
            status,
            application: String::new(),
            channel: String::new(),
            is_first_run: false,
            is_localized: false,
            localizations: None,
            reference_branch: None,
            branches: Vec::new(),
            start_date: None,
            end_date: None,
        }
    }

    pub fn with_first_run(mut self, is_first_run: bool) -> Self {
        self.is_first_run = is_first_run;
        self
    }

    pub fn with_localized(mut self, is_localized: bool) -> Self {
        self.is_localized = is_localized;
        self
    }

    /// Add a branch; the first branch added becomes the reference branch
    pub fn with_branch(mut self, branch: Branch) -> Self {
        if self.reference_branch.is_none() {
            self.reference_branch = Some(branch.slug.clone());
        }
        self.branches.push(branch);
        self
    }

    /// Check the record invariants the store relies on
    pub fn validate(&self) -> StoreResult<()> {
        if !slug_pattern().is_match(&self.slug) {
            return Err(StoreError::invalid(
                &self.slug,
                "slug must be lowercase letters, digits, '-' or '_'",
            ));
        }

        if RESERVED_SLUGS.contains(&self.slug.as_str()) {
            return Err(StoreError::invalid(
                &self.slug,
                "slug is reserved by the experiment routes",
            ));
        }

        if let Some(reference) = &self.reference_branch {
            if !self.branches.iter().any(|b| &b.slug == reference) {
                return Err(StoreError::invalid(
                    &self.slug,
                    format!("reference branch '{}' is not one of its branches", reference),
                ));
            }
        }

        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            if end < start {
                return Err(StoreError::invalid(&self.slug, "end_date precedes start_date"));
            }
        }

        Ok(())
    }
}
