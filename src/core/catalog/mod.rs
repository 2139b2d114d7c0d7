//! Training catalog
//!
//! The catalog owns training names and workloads. Batches only read it, once,
//! when they are submitted.

mod memory;

pub use memory::InMemoryTrainingCatalog;

use crate::core::models::{NewTraining, Training, TrainingSnapshot, TrainingUpdate};
use async_trait::async_trait;
use thiserror::Error;

/// Catalog errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// No training with the given id
    #[error("Training not found: {0}")]
    NotFound(String),

    /// Rejected create or update payload
    #[error("Invalid training: {0}")]
    Validation(String),
}

/// Store of trainings that certificates can be issued for
#[async_trait]
pub trait TrainingCatalog: Send + Sync {
    /// All trainings in creation order
    async fn list(&self) -> Vec<Training>;

    /// Fetch one training
    async fn get(&self, id: &str) -> Result<Training, CatalogError>;

    /// Add a training
    async fn create(&self, training: NewTraining) -> Result<Training, CatalogError>;

    /// Rename a training or change its workload
    async fn update(&self, id: &str, update: TrainingUpdate) -> Result<Training, CatalogError>;

    /// Remove a training
    async fn delete(&self, id: &str) -> Result<(), CatalogError>;

    /// Resolve the name and workload printed on certificates
    async fn lookup(&self, id: &str) -> Result<TrainingSnapshot, CatalogError> {
        self.get(id).await.map(|training| training.snapshot())
    }
}

/// Trimmed, non-empty training name
pub(crate) fn validate_name(name: &str) -> Result<String, CatalogError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(CatalogError::Validation(
            "name must not be empty".to_string(),
        ));
    }
    Ok(name.to_string())
}

/// Workload in hours, strictly positive
pub(crate) fn validate_workload(workload: u32) -> Result<u32, CatalogError> {
    if workload == 0 {
        return Err(CatalogError::Validation(
            "workload must be greater than zero".to_string(),
        ));
    }
    Ok(workload)
}
