//! # NestKV Core
//!
//! In-memory key-value store with nested transactions.
//!
//! This crate provides:
//! - [`LayeredStore`], a stack of transaction frames with shadowed lookups
//!   and merge-on-commit
//! - [`SharedStore`], a mutex-guarded handle for multi-threaded callers
//! - Operation counters via [`StoreStats`]
//!
//! ## Example
//!
//! ```rust
//! use nestkv_core::{CoreError, LayeredStore};
//!
//! let mut store = LayeredStore::new();
//! store.set("a", "1");
//!
//! store.begin();
//! store.set("a", "2");
//! store.commit().unwrap();
//! assert_eq!(store.get("a"), Some("2"));
//!
//! assert_eq!(store.rollback(), Err(CoreError::NoOpenTransaction));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod shared;
mod stats;
mod store;
mod transaction;
mod types;

pub use config::Config;
pub use error::{CoreError, CoreResult};
pub use shared::SharedStore;
pub use stats::{StatsSnapshot, StoreStats};
pub use store::{LayeredStore, LOG_TARGET};
pub use transaction::{Frame, FrameEntry, MergeOutcome};
pub use types::Depth;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
