//! Error handling utilities
//!
//! The crate-wide error type plus the recovery primitives wrapped around
//! external calls.

pub mod error;
pub mod recovery;

pub use error::*;
pub use recovery::*;
