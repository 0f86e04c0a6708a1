//! # Store Errors
//!
//! Error types for loading and reading the experiment store.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Experiment store errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// A record with this slug is already present
    #[error("Duplicate slug: {0}")]
    DuplicateSlug(String),

    /// Record violates a model invariant
    #[error("Invalid record '{slug}': {reason}")]
    InvalidRecord { slug: String, reason: String },

    /// Fixture file could not be read
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Fixture file is not a JSON array of records
    #[error("Invalid records JSON in {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A writer panicked while holding the store lock
    #[error("Store lock poisoned")]
    Poisoned,
}

impl StoreError {
    pub(crate) fn invalid(slug: impl Into<String>, reason: impl Into<String>) -> Self {
        StoreError::InvalidRecord {
            slug: slug.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            StoreError::DuplicateSlug("pocket-nudge".to_string()).to_string(),
            "Duplicate slug: pocket-nudge"
        );
        assert_eq!(
            StoreError::invalid("Bad Slug", "slug must be lowercase").to_string(),
            "Invalid record 'Bad Slug': slug must be lowercase"
        );
    }
}
