//! Store statistics.
//!
//! Provides operation counters for monitoring how a store is used.
//!
//! # Usage
//!
//! ```rust
//! use nestkv_core::LayeredStore;
//!
//! let mut store = LayeredStore::new();
//! store.set("a", "1");
//! let _ = store.get("a");
//!
//! let stats = store.stats().snapshot();
//! assert_eq!(stats.writes, 1);
//! assert_eq!(stats.reads, 1);
//! ```

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

/// Store statistics and metrics.
///
/// Counters are atomic so that reads through `&LayeredStore` can be
/// recorded. Values are monotonically increasing.
#[derive(Debug, Default)]
pub struct StoreStats {
    // Operation counters
    /// Total number of lookups.
    reads: AtomicU64,
    /// Lookups that resolved to no value.
    read_misses: AtomicU64,
    /// Total number of writes.
    writes: AtomicU64,
    /// Total number of deletes.
    deletes: AtomicU64,
    /// Total number of value counts.
    counts: AtomicU64,

    // Transaction counters
    /// Transactions begun.
    transactions_begun: AtomicU64,
    /// Transactions committed.
    transactions_committed: AtomicU64,
    /// Transactions rolled back.
    transactions_rolled_back: AtomicU64,
    /// Commit or rollback attempts with no open transaction.
    rejected: AtomicU64,
}

impl StoreStats {
    /// Creates a new stats instance.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_read(&self, hit: bool) {
        self.reads.fetch_add(1, Ordering::Relaxed);
        if !hit {
            self.read_misses.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub(crate) fn record_write(&self) {
        self.writes.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_delete(&self) {
        self.deletes.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_count(&self) {
        self.counts.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_begin(&self) {
        self.transactions_begun.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_commit(&self) {
        self.transactions_committed.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_rollback(&self) {
        self.transactions_rolled_back.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_rejected(&self) {
        self.rejected.fetch_add(1, Ordering::Relaxed);
    }

    /// Returns the total number of lookups.
    pub fn reads(&self) -> u64 {
        self.reads.load(Ordering::Relaxed)
    }

    /// Returns the number of lookups that found nothing.
    pub fn read_misses(&self) -> u64 {
        self.read_misses.load(Ordering::Relaxed)
    }

    /// Returns the total number of writes.
    pub fn writes(&self) -> u64 {
        self.writes.load(Ordering::Relaxed)
    }

    /// Returns the total number of deletes.
    pub fn deletes(&self) -> u64 {
        self.deletes.load(Ordering::Relaxed)
    }

    /// Returns the total number of value counts.
    pub fn counts(&self) -> u64 {
        self.counts.load(Ordering::Relaxed)
    }

    /// Returns the number of transactions begun.
    pub fn transactions_begun(&self) -> u64 {
        self.transactions_begun.load(Ordering::Relaxed)
    }

    /// Returns the number of transactions committed.
    pub fn transactions_committed(&self) -> u64 {
        self.transactions_committed.load(Ordering::Relaxed)
    }

    /// Returns the number of transactions rolled back.
    pub fn transactions_rolled_back(&self) -> u64 {
        self.transactions_rolled_back.load(Ordering::Relaxed)
    }

    /// Returns the number of commit/rollback calls made at root depth.
    pub fn rejected(&self) -> u64 {
        self.rejected.load(Ordering::Relaxed)
    }

    /// Returns a snapshot of all stats.
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            reads: self.reads(),
            read_misses: self.read_misses(),
            writes: self.writes(),
            deletes: self.deletes(),
            counts: self.counts(),
            transactions_begun: self.transactions_begun(),
            transactions_committed: self.transactions_committed(),
            transactions_rolled_back: self.transactions_rolled_back(),
            rejected: self.rejected(),
        }
    }
}

/// A point-in-time snapshot of store statistics.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct StatsSnapshot {
    /// Total number of lookups.
    pub reads: u64,
    /// Lookups that resolved to no value.
    pub read_misses: u64,
    /// Total number of writes.
    pub writes: u64,
    /// Total number of deletes.
    pub deletes: u64,
    /// Total number of value counts.
    pub counts: u64,
    /// Transactions begun.
    pub transactions_begun: u64,
    /// Transactions committed.
    pub transactions_committed: u64,
    /// Transactions rolled back.
    pub transactions_rolled_back: u64,
    /// Commit or rollback attempts with no open transaction.
    pub rejected: u64,
}
