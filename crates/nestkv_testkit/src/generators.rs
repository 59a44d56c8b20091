//! Property-based test generators using proptest.
//!
//! Keys and values are drawn from small alphabets so that random
//! operation sequences hit the same keys often enough to exercise
//! shadowing and merge paths.

use proptest::prelude::*;

/// Strategy for generating keys from a small pool.
pub fn key_strategy() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["a", "b", "c", "d", "e"]).prop_map(str::to_owned)
}

/// Strategy for generating values from a small pool, including the empty string.
pub fn value_strategy() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["", "0", "1", "2", "10"]).prop_map(str::to_owned)
}

/// Strategy for generating arbitrary printable keys.
pub fn wide_key_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z0-9_]{1,16}").expect("Invalid regex")
}

/// A single store operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreOp {
    /// Write a key.
    Set {
        /// Key
        key: String,
        /// Value
        value: String,
    },
    /// Resolve a key.
    Get {
        /// Key
        key: String,
    },
    /// Delete a key.
    Delete {
        /// Key
        key: String,
    },
    /// Count keys holding a value.
    Count {
        /// Value
        value: String,
    },
    /// Open a transaction.
    Begin,
    /// Commit the innermost transaction.
    Commit,
    /// Roll back the innermost transaction.
    Rollback,
}

/// Strategy for generating store operations.
pub fn store_op_strategy() -> impl Strategy<Value = StoreOp> {
    prop_oneof![
        4 => (key_strategy(), value_strategy())
            .prop_map(|(key, value)| StoreOp::Set { key, value }),
        3 => key_strategy().prop_map(|key| StoreOp::Get { key }),
        2 => key_strategy().prop_map(|key| StoreOp::Delete { key }),
        1 => value_strategy().prop_map(|value| StoreOp::Count { value }),
        2 => Just(StoreOp::Begin),
        1 => Just(StoreOp::Commit),
        1 => Just(StoreOp::Rollback),
    ]
}

/// Strategy for generating a sequence of operations.
pub fn op_sequence_strategy(
    min_ops: usize,
    max_ops: usize,
) -> impl Strategy<Value = Vec<StoreOp>> {
    prop::collection::vec(store_op_strategy(), min_ops..max_ops)
}

/// Configuration for property tests.
#[derive(Debug, Clone)]
pub struct PropTestConfig {
    /// Number of test cases to run.
    pub cases: u32,
    /// Maximum shrink iterations.
    pub max_shrink_iters: u32,
}

impl Default for PropTestConfig {
    fn default() -> Self {
        Self {
            cases: 256,
            max_shrink_iters: 1000,
        }
    }
}

impl PropTestConfig {
    /// Creates a configuration for quick tests.
    #[must_use]
    pub fn quick() -> Self {
        Self {
            cases: 32,
            max_shrink_iters: 100,
        }
    }

    /// Creates a configuration for thorough tests.
    #[must_use]
    pub fn thorough() -> Self {
        Self {
            cases: 1024,
            max_shrink_iters: 10000,
        }
    }

    /// Converts to proptest config.
    #[must_use]
    pub fn to_proptest_config(&self) -> ProptestConfig {
        ProptestConfig {
            cases: self.cases,
            max_shrink_iters: self.max_shrink_iters,
            ..ProptestConfig::default()
        }
    }
}
