//! Training catalog configuration

use serde::{Deserialize, Serialize};

/// Trainings loaded into the catalog at startup
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default)]
    pub trainings: Vec<SeedTraining>,
}

/// One seeded training
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeedTraining {
    /// Fixed id; generated when absent
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    /// Workload in hours
    pub workload: u32,
}
