//! Error types for NestKV core.

use thiserror::Error;

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur in NestKV core operations.
///
/// A missing key is not an error: lookups return `None`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// `commit` or `rollback` was called with no open transaction.
    ///
    /// The store is left unchanged.
    #[error("no open transaction")]
    NoOpenTransaction,
}

impl CoreError {
    /// Creates a no-open-transaction error.
    #[must_use]
    pub fn no_open_transaction() -> Self {
        Self::NoOpenTransaction
    }

    /// Returns true if this error reports a missing transaction.
    #[must_use]
    pub fn is_no_open_transaction(&self) -> bool {
        matches!(self, Self::NoOpenTransaction)
    }
}
