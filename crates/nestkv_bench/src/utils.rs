//! Benchmark utilities.

use nestkv_core::LayeredStore;
use rand::distributions::Alphanumeric;
use rand::Rng;

/// Generate a random alphanumeric string of the specified length.
pub fn random_string(len: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

/// Generate `count` distinct keys.
pub fn generate_keys(count: usize) -> Vec<String> {
    (0..count).map(|i| format!("key-{i:08}")).collect()
}

/// Build a store with `keys` written at the root and `depth - 1` open
/// transactions, each overwriting every tenth key.
pub fn layered_store(keys: &[String], depth: usize) -> LayeredStore {
    let mut store = LayeredStore::new();
    for key in keys {
        store.set(key.as_str(), random_string(8));
    }
    for level in 1..depth {
        store.begin();
        for key in keys.iter().step_by(10) {
            store.set(key.as_str(), format!("level-{level}"));
        }
    }
    store
}
