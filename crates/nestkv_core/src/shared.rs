//! A lock-guarded handle for sharing one store across threads.

use crate::config::Config;
use crate::error::CoreResult;
use crate::stats::StatsSnapshot;
use crate::store::LayeredStore;
use crate::types::Depth;
use parking_lot::Mutex;
use std::sync::Arc;

/// A cloneable, thread-safe handle to a [`LayeredStore`].
///
/// The whole frame stack sits behind one mutex: every operation, and in
/// particular every commit merge, sees a consistent stack. All handles
/// share the same transaction state, so they form a single logical
/// session.
///
/// Use [`with`](Self::with) to run several operations under one lock
/// acquisition.
#[derive(Debug, Clone, Default)]
pub struct SharedStore {
    inner: Arc<Mutex<LayeredStore>>,
}

impl SharedStore {
    /// Creates an empty shared store with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty shared store with the given configuration.
    #[must_use]
    pub fn with_config(config: Config) -> Self {
        Self::from_store(LayeredStore::with_config(config))
    }

    /// Wraps an existing store.
    #[must_use]
    pub fn from_store(store: LayeredStore) -> Self {
        Self {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    /// Runs `f` with exclusive access to the store.
    pub fn with<R>(&self, f: impl FnOnce(&mut LayeredStore) -> R) -> R {
        let mut guard = self.inner.lock();
        f(&mut guard)
    }

    /// See [`LayeredStore::begin`].
    pub fn begin(&self) {
        self.inner.lock().begin();
    }

    /// See [`LayeredStore::set`].
    pub fn set(&self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.inner.lock().set(key, value)
    }

    /// See [`LayeredStore::get`]. The value is cloned out of the lock.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        self.inner.lock().get(key).map(str::to_owned)
    }

    /// See [`LayeredStore::delete`].
    pub fn delete(&self, key: &str) {
        self.inner.lock().delete(key);
    }

    /// See [`LayeredStore::commit`].
    ///
    /// # Errors
    ///
    /// Returns an error if no transaction is open.
    pub fn commit(&self) -> CoreResult<()> {
        self.inner.lock().commit()
    }

    /// See [`LayeredStore::rollback`].
    ///
    /// # Errors
    ///
    /// Returns an error if no transaction is open.
    pub fn rollback(&self) -> CoreResult<()> {
        self.inner.lock().rollback()
    }

    /// See [`LayeredStore::count`].
    #[must_use]
    pub fn count(&self, value: &str) -> usize {
        self.inner.lock().count(value)
    }

    /// See [`LayeredStore::depth`].
    #[must_use]
    pub fn depth(&self) -> Depth {
        self.inner.lock().depth()
    }

    /// Returns a snapshot of the store's counters.
    #[must_use]
    pub fn stats(&self) -> StatsSnapshot {
        self.inner.lock().stats().snapshot()
    }
}
