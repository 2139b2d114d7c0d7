//! Notification sink writing batch summaries to the log

use super::types::BatchSummary;
use super::{NotificationError, NotificationSink};
use crate::core::models::BatchResult;
use async_trait::async_trait;
use tracing::{info, warn};

/// Logs one line per completed batch
#[derive(Debug, Clone, Default)]
pub struct TracingNotifier;

impl TracingNotifier {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl NotificationSink for TracingNotifier {
    async fn notify(&self, result: &BatchResult) -> Result<(), NotificationError> {
        let summary = BatchSummary::from(result);
        let elapsed_ms = (summary.finished_at - summary.started_at).num_milliseconds();

        if summary.failed == 0 {
            info!(
                batch_id = %summary.batch_id,
                total = summary.total,
                elapsed_ms,
                "Batch completed: {} certificates generated",
                summary.succeeded
            );
        } else {
            warn!(
                batch_id = %summary.batch_id,
                total = summary.total,
                cancelled = summary.cancelled,
                elapsed_ms,
                "Batch completed with failures: {} generated, {} failed {:?}",
                summary.succeeded,
                summary.failed,
                summary.failures_by_reason
            );
        }
        Ok(())
    }
}
