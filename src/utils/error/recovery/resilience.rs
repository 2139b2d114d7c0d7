//! Resilience patterns for resource isolation and timeout protection

use crate::utils::error::{CertforgeError, Result};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tracing::debug;

/// Raised when a wrapped operation exceeds its deadline
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Operation timed out after {0:?}")]
pub struct Elapsed(pub Duration);

/// Timeout wrapper for async operations
#[derive(Debug, Clone, Copy)]
pub struct TimeoutWrapper {
    timeout: Duration,
}

impl TimeoutWrapper {
    /// Create a new timeout wrapper
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Configured deadline
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Execute a future with timeout protection
    pub async fn call<F, R>(&self, f: F) -> std::result::Result<R, Elapsed>
    where
        F: std::future::Future<Output = R>,
    {
        tokio::time::timeout(self.timeout, f)
            .await
            .map_err(|_| Elapsed(self.timeout))
    }
}

/// Bulkhead pattern for resource isolation
#[derive(Debug, Clone)]
pub struct Bulkhead {
    semaphore: Arc<Semaphore>,
    name: String,
    max_concurrent: usize,
}

impl Bulkhead {
    /// Create a new bulkhead; a zero limit is raised to one
    pub fn new(name: impl Into<String>, max_concurrent: usize) -> Self {
        let max_concurrent = max_concurrent.max(1);
        Self {
            semaphore: Arc::new(Semaphore::new(max_concurrent)),
            name: name.into(),
            max_concurrent,
        }
    }

    /// Wait for a slot; the slot is released when the permit drops
    pub async fn acquire(&self) -> Result<OwnedSemaphorePermit> {
        let permit = Arc::clone(&self.semaphore)
            .acquire_owned()
            .await
            .map_err(|e| CertforgeError::Internal(format!("Bulkhead acquire failed: {}", e)))?;
        debug!("Bulkhead '{}' acquired permit", self.name);
        Ok(permit)
    }

    /// Execute a future while holding a slot
    pub async fn call<F, R>(&self, f: F) -> Result<R>
    where
        F: std::future::Future<Output = R>,
    {
        let _permit = self.acquire().await?;
        let result = f.await;
        debug!("Bulkhead '{}' released permit", self.name);
        Ok(result)
    }

    /// Get available permits
    pub fn available_permits(&self) -> usize {
        self.semaphore.available_permits()
    }

    /// Get maximum concurrent operations
    pub fn max_concurrent(&self) -> usize {
        self.max_concurrent
    }

    /// Bulkhead name used in logs
    pub fn name(&self) -> &str {
        &self.name
    }
}
