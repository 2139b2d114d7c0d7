//! Utility modules for certforge
//!
//! - **error**: error types, conversions and recovery primitives
//! - **logging**: tracing subscriber setup

pub mod error;
pub mod logging;
