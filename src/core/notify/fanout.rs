//! Notification sink broadcasting to several sinks

use super::{NotificationError, NotificationSink};
use crate::core::models::BatchResult;
use async_trait::async_trait;
use futures::future::join_all;
use std::sync::Arc;

/// Forwards each notification to every inner sink
#[derive(Clone, Default)]
pub struct FanoutNotifier {
    sinks: Vec<Arc<dyn NotificationSink>>,
}

impl FanoutNotifier {
    pub fn new(sinks: Vec<Arc<dyn NotificationSink>>) -> Self {
        Self { sinks }
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}

impl std::fmt::Debug for FanoutNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FanoutNotifier")
            .field("sinks", &self.sinks.len())
            .finish()
    }
}

#[async_trait]
impl NotificationSink for FanoutNotifier {
    async fn notify(&self, result: &BatchResult) -> Result<(), NotificationError> {
        let outcomes = join_all(self.sinks.iter().map(|sink| sink.notify(result))).await;

        let mut errors: Vec<NotificationError> =
            outcomes.into_iter().filter_map(Result::err).collect();

        match errors.len() {
            0 => Ok(()),
            1 => Err(errors.remove(0)),
            _ => Err(NotificationError::Multiple(
                errors.iter().map(ToString::to_string).collect(),
            )),
        }
    }
}
