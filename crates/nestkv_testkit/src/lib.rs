//! # NestKV Testkit
//!
//! Test utilities for NestKV.
//!
//! This crate provides:
//! - Store fixtures for common starting states
//! - Property-based test generators using proptest
//! - A snapshot-stack reference model and a differential harness
//! - Command-script test vectors shared with the CLI
//!
//! ## Usage
//!
//! ```rust
//! use nestkv_testkit::prelude::*;
//!
//! let mut harness = DifferentialHarness::new();
//! harness.apply(&StoreOp::Begin).unwrap();
//! harness.apply(&StoreOp::Commit).unwrap();
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod generators;
pub mod integration;
pub mod model;
pub mod vectors;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::fixtures::*;
    pub use crate::generators::*;
    pub use crate::integration::*;
    pub use crate::model::*;
    pub use crate::vectors::*;
}

pub use fixtures::*;
pub use generators::*;
pub use integration::*;
pub use model::*;
pub use vectors::*;
