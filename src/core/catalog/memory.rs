//! In-process training catalog

use super::{CatalogError, TrainingCatalog, validate_name, validate_workload};
use crate::config::CatalogConfig;
use crate::core::models::{NewTraining, Training, TrainingUpdate};
use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Catalog kept in memory, optionally seeded from configuration
#[derive(Debug, Default)]
pub struct InMemoryTrainingCatalog {
    trainings: RwLock<Vec<Training>>,
}

impl InMemoryTrainingCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a catalog holding the configured seed trainings.
    ///
    /// Invalid or duplicate seed entries are skipped with a warning.
    pub fn from_config(config: &CatalogConfig) -> Self {
        let catalog = Self::new();
        {
            let mut trainings = catalog.trainings.write();
            for seed in &config.trainings {
                let (name, workload) =
                    match (validate_name(&seed.name), validate_workload(seed.workload)) {
                        (Ok(name), Ok(workload)) => (name, workload),
                        (Err(e), _) | (_, Err(e)) => {
                            warn!("Skipping seed training '{}': {}", seed.name, e);
                            continue;
                        }
                    };

                let id = seed
                    .id
                    .clone()
                    .unwrap_or_else(|| Uuid::new_v4().to_string());
                if trainings.iter().any(|t| t.id == id) {
                    warn!("Skipping seed training with duplicate id {}", id);
                    continue;
                }

                trainings.push(Training {
                    id,
                    name,
                    workload,
                    created_at: Utc::now(),
                });
            }
            info!("Training catalog seeded with {} trainings", trainings.len());
        }
        catalog
    }
}

#[async_trait]
impl TrainingCatalog for InMemoryTrainingCatalog {
    async fn list(&self) -> Vec<Training> {
        self.trainings.read().clone()
    }

    async fn get(&self, id: &str) -> Result<Training, CatalogError> {
        self.trainings
            .read()
            .iter()
            .find(|t| t.id == id)
            .cloned()
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))
    }

    async fn create(&self, training: NewTraining) -> Result<Training, CatalogError> {
        let training = Training {
            id: Uuid::new_v4().to_string(),
            name: validate_name(&training.name)?,
            workload: validate_workload(training.workload)?,
            created_at: Utc::now(),
        };

        self.trainings.write().push(training.clone());
        debug!("Training created: {} ({})", training.name, training.id);
        Ok(training)
    }

    async fn update(&self, id: &str, update: TrainingUpdate) -> Result<Training, CatalogError> {
        let name = update.name.as_deref().map(validate_name).transpose()?;
        let workload = update.workload.map(validate_workload).transpose()?;

        let mut trainings = self.trainings.write();
        let training = trainings
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))?;

        if let Some(name) = name {
            training.name = name;
        }
        if let Some(workload) = workload {
            training.workload = workload;
        }

        debug!("Training updated: {}", id);
        Ok(training.clone())
    }

    async fn delete(&self, id: &str) -> Result<(), CatalogError> {
        let mut trainings = self.trainings.write();
        let before = trainings.len();
        trainings.retain(|t| t.id != id);

        if trainings.len() == before {
            return Err(CatalogError::NotFound(id.to_string()));
        }
        debug!("Training deleted: {}", id);
        Ok(())
    }
}
