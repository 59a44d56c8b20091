//! Transaction scopes.
//!
//! Each open transaction is a [`Frame`] holding the values written and the
//! deletes staged in that scope. Committing folds a frame into its parent;
//! rolling back drops it.

mod frame;

pub use frame::{Frame, FrameEntry, MergeOutcome};
