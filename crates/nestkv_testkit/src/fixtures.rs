//! Test fixtures and store helpers.
//!
//! Provides convenience functions for setting up stores in common
//! starting states.

use nestkv_core::{Config, LayeredStore};

/// Creates a store whose root holds `entries`.
pub fn store_with(entries: &[(&str, &str)]) -> LayeredStore {
    let mut store = LayeredStore::new();
    for (key, value) in entries {
        store.set(*key, *value);
    }
    store
}

/// Creates a store with `open` empty transactions on top of `entries`.
pub fn store_at_depth(entries: &[(&str, &str)], open: usize) -> LayeredStore {
    let mut store = store_with(entries);
    for _ in 0..open {
        store.begin();
    }
    store
}

/// Creates an empty store that does not record statistics.
pub fn quiet_store() -> LayeredStore {
    LayeredStore::with_config(Config::new().record_stats(false))
}

/// Runs a test with a fresh store.
///
/// # Example
///
/// ```rust
/// use nestkv_testkit::with_store;
///
/// with_store(|store| {
///     store.set("a", "1");
///     assert_eq!(store.get("a"), Some("1"));
/// });
/// ```
pub fn with_store<F, R>(f: F) -> R
where
    F: FnOnce(&mut LayeredStore) -> R,
{
    let mut store = LayeredStore::new();
    f(&mut store)
}
