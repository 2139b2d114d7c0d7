//! Training catalog records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A training that certificates can be issued for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Training {
    /// Stable unique identifier
    pub id: String,
    /// Display name printed on the certificate
    pub name: String,
    /// Workload in hours
    pub workload: u32,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Training {
    /// Copy of the fields a batch prints on every certificate
    pub fn snapshot(&self) -> TrainingSnapshot {
        TrainingSnapshot {
            id: self.id.clone(),
            name: self.name.clone(),
            workload: self.workload,
        }
    }
}

/// Payload for creating a training
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTraining {
    pub name: String,
    pub workload: u32,
}

/// Partial update for rename and workload edits
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub workload: Option<u32>,
}

/// Read-only view of a training taken when a batch is submitted.
///
/// Later catalog edits never reach a batch that already holds a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingSnapshot {
    pub id: String,
    pub name: String,
    pub workload: u32,
}
