//! Error handling for certforge
//!
//! This module defines the crate-wide error type and its HTTP mapping.

mod conversions;
mod helpers;
mod response;
mod types;

pub use response::{ErrorDetail, ErrorResponse};
pub use types::{CertforgeError, Result};
