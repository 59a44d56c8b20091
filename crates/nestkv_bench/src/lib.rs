//! Benchmark support for NestKV.

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod utils;
