//! Notification payload types

use crate::core::models::{BatchResult, FailureReason};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Notification event types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NotificationEventType {
    /// A batch reached Completed
    BatchCompleted,
}

/// Counts of a completed batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub batch_id: Uuid,
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub cancelled: bool,
    pub failures_by_reason: BTreeMap<String, usize>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl From<&BatchResult> for BatchSummary {
    fn from(result: &BatchResult) -> Self {
        let mut failures_by_reason = BTreeMap::new();
        for failure in &result.failed {
            *failures_by_reason
                .entry(reason_key(failure.reason))
                .or_insert(0) += 1;
        }

        Self {
            batch_id: result.batch_id,
            total: result.total,
            succeeded: result.succeeded.len(),
            failed: result.failed.len(),
            cancelled: result.cancelled,
            failures_by_reason,
            started_at: result.started_at,
            finished_at: result.finished_at,
        }
    }
}

fn reason_key(reason: FailureReason) -> String {
    reason.to_string()
}

/// Body posted to webhook endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationPayload {
    /// Event type
    pub event_type: NotificationEventType,
    /// Event timestamp
    pub timestamp: DateTime<Utc>,
    /// Addresses the receiving system should forward the certificates to
    pub recipients: Vec<String>,
    pub summary: BatchSummary,
    /// Full batch report, including every artifact URL
    pub result: BatchResult,
}

impl NotificationPayload {
    pub fn batch_completed(result: &BatchResult, recipients: Vec<String>) -> Self {
        Self {
            event_type: NotificationEventType::BatchCompleted,
            timestamp: Utc::now(),
            recipients,
            summary: BatchSummary::from(result),
            result: result.clone(),
        }
    }
}
