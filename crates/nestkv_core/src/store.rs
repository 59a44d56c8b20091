//! The layered store.

use crate::config::Config;
use crate::error::{CoreError, CoreResult};
use crate::stats::StoreStats;
use crate::transaction::{Frame, FrameEntry};
use crate::types::Depth;
use std::collections::HashSet;
use std::iter;
use tracing::{debug, trace, warn};

/// Log target for store events.
pub const LOG_TARGET: &str = "nestkv::store";

/// An in-memory key-value store with nested transactions.
///
/// The store is a stack of [`Frame`]s. The root frame always exists and
/// holds committed state; `begin` pushes a frame and `commit` or
/// `rollback` pops it. Reads resolve a key by scanning frames from the
/// innermost scope outwards, so a nested write or pending delete shadows
/// anything beneath it.
///
/// ## Deletes
///
/// At the root a delete removes the key immediately. Inside a
/// transaction it is recorded as pending in the active frame and only
/// reaches the root once every enclosing transaction has committed.
///
/// # Example
///
/// ```rust
/// use nestkv_core::LayeredStore;
///
/// let mut store = LayeredStore::new();
/// store.set("a", "1");
///
/// store.begin();
/// store.delete("a");
/// assert_eq!(store.get("a"), None);
/// store.rollback().unwrap();
///
/// assert_eq!(store.get("a"), Some("1"));
/// ```
#[derive(Debug, Default)]
pub struct LayeredStore {
    /// Committed state; never popped.
    root: Frame,
    /// Open transaction scopes, outermost first.
    nested: Vec<Frame>,
    /// Store configuration.
    config: Config,
    /// Operation counters.
    stats: StoreStats,
}

impl LayeredStore {
    /// Creates an empty store with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty store with the given configuration.
    #[must_use]
    pub fn with_config(config: Config) -> Self {
        Self {
            root: Frame::new(),
            nested: Vec::new(),
            config,
            stats: StoreStats::new(),
        }
    }

    /// Returns the store configuration.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the operation counters.
    #[must_use]
    pub fn stats(&self) -> &StoreStats {
        &self.stats
    }

    /// Returns the current stack depth (1 at the root).
    #[must_use]
    pub fn depth(&self) -> Depth {
        Depth::new(self.nested.len() + 1)
    }

    /// Returns true if at least one transaction is open.
    #[must_use]
    pub fn in_transaction(&self) -> bool {
        !self.nested.is_empty()
    }

    /// Returns the frames from the root to the active one.
    pub fn frames(&self) -> impl DoubleEndedIterator<Item = &Frame> {
        iter::once(&self.root).chain(self.nested.iter())
    }

    /// Returns the active frame.
    #[must_use]
    pub fn active(&self) -> &Frame {
        self.nested.last().unwrap_or(&self.root)
    }

    fn active_mut(&mut self) -> &mut Frame {
        self.nested.last_mut().unwrap_or(&mut self.root)
    }

    /// Opens a nested transaction.
    pub fn begin(&mut self) {
        self.nested
            .push(Frame::with_capacity(self.config.frame_capacity));
        if self.config.record_stats {
            self.stats.record_begin();
        }
        debug!(target: LOG_TARGET, depth = %self.depth(), "begin");
    }

    /// Writes `key` in the active scope.
    ///
    /// Any delete of `key` staged in this scope is cancelled. Returns the
    /// value the active scope held before, which is `None` when the only
    /// earlier value lives in an enclosing scope.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let key = key.into();
        trace!(target: LOG_TARGET, key = %key, depth = %self.depth(), "set");
        if self.config.record_stats {
            self.stats.record_write();
        }
        self.active_mut().set(key, value.into())
    }

    /// Resolves the current value of `key`.
    ///
    /// Frames are scanned from the active one down to the root. The first
    /// frame with a pending delete for `key` yields `None`; the first with
    /// a value yields it.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        let found = self.resolve(key);
        if self.config.record_stats {
            self.stats.record_read(found.is_some());
        }
        if found.is_none() {
            trace!(target: LOG_TARGET, key, "not set");
        }
        found
    }

    fn resolve(&self, key: &str) -> Option<&str> {
        self.frames()
            .rev()
            .find_map(|frame| frame.entry(key))
            .and_then(|entry| match entry {
                FrameEntry::Value(value) => Some(value),
                FrameEntry::Deleted => None,
            })
    }

    /// Deletes `key`.
    ///
    /// At the root the key is removed immediately; deleting an absent key
    /// is not an error. Inside a transaction the delete is staged in the
    /// active frame.
    pub fn delete(&mut self, key: &str) {
        trace!(target: LOG_TARGET, key, depth = %self.depth(), "delete");
        if self.config.record_stats {
            self.stats.record_delete();
        }
        match self.nested.last_mut() {
            Some(frame) => frame.mark_deleted(key),
            None => {
                self.root.remove(key);
            }
        }
    }

    /// Commits the innermost transaction into its parent.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::NoOpenTransaction`] at the root; the store is
    /// left unchanged.
    pub fn commit(&mut self) -> CoreResult<()> {
        let Some(frame) = self.nested.pop() else {
            return Err(self.reject("commit"));
        };

        let outcome = match self.nested.last_mut() {
            Some(parent) => frame.merge_into(parent, false),
            None => frame.merge_into(&mut self.root, true),
        };

        if self.config.record_stats {
            self.stats.record_commit();
        }
        debug!(
            target: LOG_TARGET,
            depth = %self.depth(),
            values = outcome.values,
            deletes = outcome.deletes,
            "commit"
        );
        Ok(())
    }

    /// Discards the innermost transaction.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::NoOpenTransaction`] at the root; the store is
    /// left unchanged.
    pub fn rollback(&mut self) -> CoreResult<()> {
        let Some(frame) = self.nested.pop() else {
            return Err(self.reject("rollback"));
        };

        if self.config.record_stats {
            self.stats.record_rollback();
        }
        debug!(
            target: LOG_TARGET,
            depth = %self.depth(),
            discarded_values = frame.value_count(),
            discarded_deletes = frame.pending_delete_count(),
            "rollback"
        );
        Ok(())
    }

    fn reject(&self, op: &'static str) -> CoreError {
        if self.config.record_stats {
            self.stats.record_rejected();
        }
        warn!(target: LOG_TARGET, op, "no open transaction");
        CoreError::no_open_transaction()
    }

    /// Counts the keys whose current value equals `value`.
    ///
    /// Every key referenced by any frame is resolved once with the same
    /// shadowing rule as [`get`](Self::get), so a key written in several
    /// frames is counted at most once and a key deleted in an inner scope
    /// is not counted at all.
    #[must_use]
    pub fn count(&self, value: &str) -> usize {
        if self.config.record_stats {
            self.stats.record_count();
        }
        let keys: HashSet<&str> = self.frames().flat_map(|frame| frame.keys()).collect();
        keys.into_iter()
            .filter(|key| self.resolve(key) == Some(value))
            .count()
    }
}
