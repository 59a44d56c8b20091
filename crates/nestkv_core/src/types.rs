//! Core type definitions for NestKV.

use std::fmt;

/// Number of frames on a store's stack.
///
/// Depth 1 is the root scope; every open transaction adds one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Depth(usize);

impl Depth {
    /// Depth of a store with no open transaction.
    pub const ROOT: Depth = Depth(1);

    /// Creates a depth from a frame count.
    #[must_use]
    pub const fn new(frames: usize) -> Self {
        Self(frames)
    }

    /// Returns the number of frames.
    #[must_use]
    pub const fn as_usize(self) -> usize {
        self.0
    }

    /// Returns true if only the root frame exists.
    #[must_use]
    pub const fn is_root(self) -> bool {
        self.0 <= 1
    }

    /// Returns the number of open transactions.
    #[must_use]
    pub const fn open_transactions(self) -> usize {
        self.0.saturating_sub(1)
    }
}

impl fmt::Display for Depth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "depth:{}", self.0)
    }
}
