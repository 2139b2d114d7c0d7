//! Core functionality for certforge
//!
//! This module contains the certificate pipeline and the service that wires
//! its components together.

pub mod batch;
pub mod catalog;
pub mod models;
pub mod notify;
pub mod renderer;
pub mod roster;

use crate::config::Config;
use crate::core::batch::{BatchCoordinator, BatchSettings};
use crate::core::catalog::{InMemoryTrainingCatalog, TrainingCatalog};
use crate::core::renderer::ConversionServiceRenderer;
use crate::core::roster::SheetsRosterSource;
use crate::storage::FileStorage;
use crate::utils::error::Result;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

/// Assembled certforge service
#[derive(Clone)]
pub struct Certforge {
    config: Arc<Config>,
    catalog: Arc<dyn TrainingCatalog>,
    storage: Arc<FileStorage>,
    coordinator: Arc<BatchCoordinator>,
}

impl Certforge {
    /// Build every component from configuration
    pub async fn new(config: Config) -> Result<Self> {
        info!("Initializing certforge");

        debug!("Seeding training catalog");
        let catalog: Arc<dyn TrainingCatalog> =
            Arc::new(InMemoryTrainingCatalog::from_config(&config.catalog));

        debug!("Initializing roster source");
        let roster = Arc::new(SheetsRosterSource::new(config.roster.clone())?);

        debug!("Initializing renderer at {}", config.renderer.endpoint);
        let renderer = Arc::new(ConversionServiceRenderer::new(config.renderer.clone())?);

        debug!("Initializing {} artifact storage", config.storage.backend);
        let storage = Arc::new(FileStorage::new(&config.storage).await?);

        let notifier = crate::core::notify::build_notifier(&config.notifications)?;

        let coordinator = Arc::new(BatchCoordinator::new(
            catalog.clone(),
            roster,
            renderer,
            storage.clone(),
            notifier,
            BatchSettings::from(&config.batch),
        ));

        info!("certforge initialized successfully");

        Ok(Self {
            config: Arc::new(config),
            catalog,
            storage,
            coordinator,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn shared_config(&self) -> Arc<Config> {
        self.config.clone()
    }

    pub fn catalog(&self) -> Arc<dyn TrainingCatalog> {
        self.catalog.clone()
    }

    pub fn storage(&self) -> Arc<FileStorage> {
        self.storage.clone()
    }

    pub fn coordinator(&self) -> Arc<BatchCoordinator> {
        self.coordinator.clone()
    }

    /// Health check
    pub async fn health_check(&self) -> HealthStatus {
        health_report(Some(&self.storage), self.coordinator.batch_ids().len()).await
    }
}

/// Storage health plus the number of tracked batches
pub async fn health_report(storage: Option<&FileStorage>, tracked_batches: usize) -> HealthStatus {
    let mut status = HealthStatus::healthy();

    if let Some(storage) = storage {
        let health = match storage.health_check().await {
            Ok(()) => ComponentHealth::healthy(),
            Err(e) => ComponentHealth::unhealthy(e.to_string()),
        };
        status.insert(storage.backend_name(), health);
    }

    status.insert(
        "batches",
        ComponentHealth {
            status: "healthy".to_string(),
            message: Some(format!("{} tracked", tracked_batches)),
        },
    );

    status
}

/// Health status response
#[derive(Debug, Clone, Serialize)]
pub struct HealthStatus {
    /// Overall system status
    pub status: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub components: HashMap<String, ComponentHealth>,
}

impl HealthStatus {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now(),
            components: HashMap::new(),
        }
    }

    /// Record a component; any unhealthy component marks the whole service
    pub fn insert(&mut self, name: &str, health: ComponentHealth) {
        if !health.is_healthy() {
            self.status = "unhealthy".to_string();
        }
        self.components.insert(name.to_string(), health);
    }

    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}

/// Component health status
#[derive(Debug, Clone, Serialize)]
pub struct ComponentHealth {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ComponentHealth {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            message: None,
        }
    }

    pub fn unhealthy(message: impl Into<String>) -> Self {
        Self {
            status: "unhealthy".to_string(),
            message: Some(message.into()),
        }
    }

    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}
