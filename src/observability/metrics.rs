//! Request counters
//!
//! - Counters only, monotonic
//! - Reset only on process start
//! - Relaxed atomics; readers tolerate slightly stale values

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Counters for the read API
#[derive(Debug, Default)]
pub struct MetricsRegistry {
    /// List requests answered with 200
    list_requests: AtomicU64,
    /// Retrieve requests answered with 200
    retrieve_requests: AtomicU64,
    /// Records serialized across all responses
    records_served: AtomicU64,
    /// Retrieve requests for a slug outside the group
    not_found: AtomicU64,
    /// Requests rejected for a bad filter value
    rejected: AtomicU64,
}

/// Point-in-time copy of all counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub list_requests: u64,
    pub retrieve_requests: u64,
    pub records_served: u64,
    pub not_found: u64,
    pub rejected: u64,
}

impl MetricsRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a successful list returning `records` items
    pub fn record_list(&self, records: usize) {
        self.list_requests.fetch_add(1, Ordering::Relaxed);
        self.records_served.fetch_add(records as u64, Ordering::Relaxed);
    }

    /// Record a successful retrieve
    pub fn record_retrieve(&self) {
        self.retrieve_requests.fetch_add(1, Ordering::Relaxed);
        self.records_served.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_not_found(&self) {
        self.not_found.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_rejected(&self) {
        self.rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            list_requests: self.list_requests.load(Ordering::Relaxed),
            retrieve_requests: self.retrieve_requests.load(Ordering::Relaxed),
            records_served: self.records_served.load(Ordering::Relaxed),
            not_found: self.not_found.load(Ordering::Relaxed),
            rejected: self.rejected.load(Ordering::Relaxed),
        }
    }
}
