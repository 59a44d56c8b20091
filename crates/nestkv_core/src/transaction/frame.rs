//! Per-scope write state.

use std::collections::{HashMap, HashSet};

/// What a single frame knows about a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameEntry<'a> {
    /// The key was written in this scope.
    Value(&'a str),
    /// The key was deleted in this scope and the delete is still pending.
    Deleted,
}

/// Counts reported by a merge into a parent frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeOutcome {
    /// Number of values folded into the parent.
    pub values: usize,
    /// Number of deletes folded into the parent.
    pub deletes: usize,
}

/// The write and delete state belonging to one transaction scope.
///
/// A key is never both in `values` and in `pending_deletes` of the same
/// frame: writing a key clears its delete marker and deleting a key drops
/// the frame's own write.
#[derive(Debug, Clone, Default)]
pub struct Frame {
    /// Values written in this scope.
    values: HashMap<String, String>,
    /// Keys deleted in this scope, not yet reconciled into the parent.
    pending_deletes: HashSet<String>,
}

impl Frame {
    /// Creates an empty frame.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty frame with room for `capacity` values.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            values: HashMap::with_capacity(capacity),
            pending_deletes: HashSet::new(),
        }
    }

    /// Returns this frame's own state for `key`, if any.
    ///
    /// A pending delete takes precedence over a value.
    #[must_use]
    pub fn entry(&self, key: &str) -> Option<FrameEntry<'_>> {
        if self.pending_deletes.contains(key) {
            return Some(FrameEntry::Deleted);
        }
        self.values.get(key).map(|v| FrameEntry::Value(v.as_str()))
    }

    /// Returns the value written in this frame, ignoring enclosing scopes.
    #[must_use]
    pub fn value(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Returns true if `key` has a pending delete in this frame.
    #[must_use]
    pub fn is_deleted(&self, key: &str) -> bool {
        self.pending_deletes.contains(key)
    }

    /// Returns the values written in this frame.
    pub fn values(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Returns the keys with a pending delete in this frame.
    pub fn pending_deletes(&self) -> impl Iterator<Item = &str> {
        self.pending_deletes.iter().map(String::as_str)
    }

    /// Returns every key this frame references, written or deleted.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values
            .keys()
            .map(String::as_str)
            .chain(self.pending_deletes())
    }

    /// Returns the number of values written in this frame.
    #[must_use]
    pub fn value_count(&self) -> usize {
        self.values.len()
    }

    /// Returns the number of pending deletes in this frame.
    #[must_use]
    pub fn pending_delete_count(&self) -> usize {
        self.pending_deletes.len()
    }

    /// Returns true if the frame holds no writes and no deletes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty() && self.pending_deletes.is_empty()
    }

    /// Writes `key`, clearing any delete staged for it in this frame.
    ///
    /// Returns the value this frame previously held for `key`.
    pub(crate) fn set(&mut self, key: String, value: String) -> Option<String> {
        self.pending_deletes.remove(&key);
        self.values.insert(key, value)
    }

    /// Removes `key` outright. Used by the root frame.
    pub(crate) fn remove(&mut self, key: &str) -> Option<String> {
        self.values.remove(key)
    }

    /// Stages a delete of `key`, dropping this frame's own write.
    pub(crate) fn mark_deleted(&mut self, key: &str) {
        self.values.remove(key);
        if !self.pending_deletes.contains(key) {
            self.pending_deletes.insert(key.to_owned());
        }
    }

    /// Folds this frame into `parent`.
    ///
    /// Values overwrite the parent's and clear any delete the parent had
    /// staged for the same key. Deletes remove the parent's value and,
    /// unless the parent is the root, stay pending in the parent.
    pub(crate) fn merge_into(self, parent: &mut Frame, parent_is_root: bool) -> MergeOutcome {
        let outcome = MergeOutcome {
            values: self.values.len(),
            deletes: self.pending_deletes.len(),
        };

        for (key, value) in self.values {
            parent.pending_deletes.remove(&key);
            parent.values.insert(key, value);
        }

        for key in self.pending_deletes {
            parent.values.remove(&key);
            if !parent_is_root {
                parent.pending_deletes.insert(key);
            }
        }

        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame_with(entries: &[(&str, &str)]) -> Frame {
        let mut frame = Frame::new();
        for (k, v) in entries {
            frame.set((*k).to_string(), (*v).to_string());
        }
        frame
    }

    #[test]
    fn new_frame_is_empty() {
        let frame = Frame::new();
        assert!(frame.is_empty());
        assert_eq!(frame.entry("a"), None);
    }

    #[test]
    fn set_returns_previous_frame_value() {
        let mut frame = Frame::new();
        assert_eq!(frame.set("a".into(), "1".into()), None);
        assert_eq!(frame.set("a".into(), "2".into()), Some("1".to_string()));
        assert_eq!(frame.entry("a"), Some(FrameEntry::Value("2")));
    }

    #[test]
    fn set_clears_pending_delete() {
        let mut frame = Frame::new();
        frame.mark_deleted("a");
        assert!(frame.is_deleted("a"));

        frame.set("a".into(), "1".into());
        assert!(!frame.is_deleted("a"));
        assert_eq!(frame.value("a"), Some("1"));
    }

    #[test]
    fn mark_deleted_drops_own_write() {
        let mut frame = frame_with(&[("a", "1")]);
        frame.mark_deleted("a");

        assert_eq!(frame.value("a"), None);
        assert_eq!(frame.entry("a"), Some(FrameEntry::Deleted));
        assert_eq!(frame.value_count(), 0);
        assert_eq!(frame.pending_delete_count(), 1);
    }

    #[test]
    fn keys_cover_values_and_deletes() {
        let mut frame = frame_with(&[("a", "1")]);
        frame.mark_deleted("b");

        let mut keys: Vec<_> = frame.keys().collect();
        keys.sort_unstable();
        assert_eq!(keys, vec!["a", "b"]);
    }

    #[test]
    fn merge_into_nested_parent_keeps_deletes_pending() {
        let mut parent = frame_with(&[("a", "1"), ("b", "1")]);
        let mut child = frame_with(&[("c", "3")]);
        child.mark_deleted("a");

        let outcome = child.merge_into(&mut parent, false);

        assert_eq!(outcome, MergeOutcome { values: 1, deletes: 1 });
        assert_eq!(parent.entry("a"), Some(FrameEntry::Deleted));
        assert_eq!(parent.value("b"), Some("1"));
        assert_eq!(parent.value("c"), Some("3"));
    }

    #[test]
    fn merge_into_root_resolves_deletes() {
        let mut root = frame_with(&[("a", "1")]);
        let mut child = Frame::new();
        child.mark_deleted("a");
        child.mark_deleted("missing");

        child.merge_into(&mut root, true);

        assert_eq!(root.entry("a"), None);
        assert_eq!(root.pending_delete_count(), 0);
        assert!(root.is_empty());
    }

    #[test]
    fn merged_value_clears_parent_delete() {
        let mut parent = Frame::new();
        parent.mark_deleted("a");
        let child = frame_with(&[("a", "5")]);

        child.merge_into(&mut parent, false);

        assert!(!parent.is_deleted("a"));
        assert_eq!(parent.entry("a"), Some(FrameEntry::Value("5")));
    }
}
