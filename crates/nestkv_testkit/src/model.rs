//! Reference model of a nested-transaction store.
//!
//! [`ReferenceStore`] keeps a full copy of the visible key space per open
//! transaction: `begin` clones the top map, `commit` replaces the parent
//! with the child, `rollback` drops the child. It is slow but obviously
//! correct, which makes it a good oracle for `LayeredStore`.

use crate::generators::StoreOp;
use nestkv_core::{CoreError, CoreResult, LayeredStore};
use std::collections::HashMap;

/// Naive snapshot-stack store.
#[derive(Debug, Clone)]
pub struct ReferenceStore {
    /// Visible state per scope, root first. Never empty.
    stack: Vec<HashMap<String, String>>,
}

impl Default for ReferenceStore {
    fn default() -> Self {
        Self {
            stack: vec![HashMap::new()],
        }
    }
}

impl ReferenceStore {
    /// Creates an empty model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of scopes, root included.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    fn top(&self) -> &HashMap<String, String> {
        &self.stack[self.stack.len() - 1]
    }

    fn top_mut(&mut self) -> &mut HashMap<String, String> {
        let last = self.stack.len() - 1;
        &mut self.stack[last]
    }

    /// Opens a scope.
    pub fn begin(&mut self) {
        let snapshot = self.top().clone();
        self.stack.push(snapshot);
    }

    /// Writes a key.
    pub fn set(&mut self, key: &str, value: &str) {
        self.top_mut().insert(key.to_owned(), value.to_owned());
    }

    /// Reads a key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.top().get(key).map(String::as_str)
    }

    /// Deletes a key.
    pub fn delete(&mut self, key: &str) {
        self.top_mut().remove(key);
    }

    /// Counts keys holding `value`.
    pub fn count(&self, value: &str) -> usize {
        self.top().values().filter(|v| v.as_str() == value).count()
    }

    /// Commits the innermost scope.
    pub fn commit(&mut self) -> CoreResult<()> {
        if self.stack.len() == 1 {
            return Err(CoreError::NoOpenTransaction);
        }
        let child = self.stack.pop().unwrap_or_default();
        *self.top_mut() = child;
        Ok(())
    }

    /// Rolls back the innermost scope.
    pub fn rollback(&mut self) -> CoreResult<()> {
        if self.stack.len() == 1 {
            return Err(CoreError::NoOpenTransaction);
        }
        self.stack.pop();
        Ok(())
    }

    /// Returns the visible state, for comparisons.
    pub fn visible(&self) -> &HashMap<String, String> {
        self.top()
    }
}

/// The externally observable result of one operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Observation {
    /// The operation returns nothing worth comparing.
    Unit,
    /// A resolved value.
    Value(Option<String>),
    /// A count.
    Count(usize),
    /// The status of a commit or rollback.
    Status(CoreResult<()>),
}

/// Applies `op` to a `LayeredStore`.
pub fn apply_to_store(store: &mut LayeredStore, op: &StoreOp) -> Observation {
    match op {
        StoreOp::Set { key, value } => {
            store.set(key.as_str(), value.as_str());
            Observation::Unit
        }
        StoreOp::Get { key } => Observation::Value(store.get(key).map(str::to_owned)),
        StoreOp::Delete { key } => {
            store.delete(key);
            Observation::Unit
        }
        StoreOp::Count { value } => Observation::Count(store.count(value)),
        StoreOp::Begin => {
            store.begin();
            Observation::Unit
        }
        StoreOp::Commit => Observation::Status(store.commit()),
        StoreOp::Rollback => Observation::Status(store.rollback()),
    }
}

/// Applies `op` to a `ReferenceStore`.
pub fn apply_to_model(model: &mut ReferenceStore, op: &StoreOp) -> Observation {
    match op {
        StoreOp::Set { key, value } => {
            model.set(key, value);
            Observation::Unit
        }
        StoreOp::Get { key } => Observation::Value(model.get(key).map(str::to_owned)),
        StoreOp::Delete { key } => {
            model.delete(key);
            Observation::Unit
        }
        StoreOp::Count { value } => Observation::Count(model.count(value)),
        StoreOp::Begin => {
            model.begin();
            Observation::Unit
        }
        StoreOp::Commit => Observation::Status(model.commit()),
        StoreOp::Rollback => Observation::Status(model.rollback()),
    }
}
