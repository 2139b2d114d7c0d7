//! Error recovery and resilience utilities
//!
//! Retry with backoff, deadlines, and concurrency bulkheads used around every
//! external collaborator call.

mod resilience;
mod retry;
mod types;

pub use resilience::{Bulkhead, Elapsed, TimeoutWrapper};
pub use retry::RetryPolicy;
pub use types::{RetryConfig, Retryable};
