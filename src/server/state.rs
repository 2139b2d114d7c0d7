//! Application state shared across HTTP handlers

use crate::config::Config;
use crate::core::Certforge;
use crate::core::batch::BatchCoordinator;
use crate::core::catalog::TrainingCatalog;
use crate::storage::FileStorage;
use std::sync::Arc;

/// HTTP server state shared across handlers
///
/// All fields are behind `Arc`, so cloning per worker is cheap.
#[derive(Clone)]
pub struct AppState {
    /// Service configuration (shared read-only)
    pub config: Arc<Config>,
    pub coordinator: Arc<BatchCoordinator>,
    pub catalog: Arc<dyn TrainingCatalog>,
    /// Artifact storage, also used for health reporting
    pub storage: Option<Arc<FileStorage>>,
}

impl AppState {
    /// State backed by a fully wired service
    pub fn from_service(service: &Certforge) -> Self {
        Self {
            config: service.shared_config(),
            coordinator: service.coordinator(),
            catalog: service.catalog(),
            storage: Some(service.storage()),
        }
    }

    /// State from individual components
    pub fn new(
        config: Config,
        coordinator: Arc<BatchCoordinator>,
        catalog: Arc<dyn TrainingCatalog>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            coordinator,
            catalog,
            storage: None,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}
