//! Batch coordinator

use super::pipeline::{EntryOutcome, EntryPipeline};
use super::registry::BatchRun;
use super::settings::BatchSettings;
use super::validation::validate_request;
use crate::core::catalog::TrainingCatalog;
use crate::core::models::{
    BatchFailure, BatchHandle, BatchProgress, BatchResult, BatchState, EntryFailure,
    GenerationRequest,
};
use crate::core::notify::NotificationSink;
use crate::core::renderer::TemplateRenderer;
use crate::core::roster::{RosterEntry, RosterSource};
use crate::storage::files::ArtifactStore;
use crate::utils::error::recovery::{RetryPolicy, TimeoutWrapper};
use crate::utils::error::{CertforgeError, Result};
use chrono::Utc;
use futures::stream::{self, StreamExt};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

/// Drives certificate batches from submission to a terminal state
pub struct BatchCoordinator {
    catalog: Arc<dyn TrainingCatalog>,
    roster: Arc<dyn RosterSource>,
    renderer: Arc<dyn TemplateRenderer>,
    store: Arc<dyn ArtifactStore>,
    notifier: Arc<dyn NotificationSink>,
    settings: BatchSettings,
    batches: RwLock<HashMap<Uuid, Arc<BatchRun>>>,
}

impl std::fmt::Debug for BatchCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BatchCoordinator")
            .field("settings", &self.settings)
            .field("batches", &self.batches.read().len())
            .finish()
    }
}

impl BatchCoordinator {
    /// Create a new coordinator
    pub fn new(
        catalog: Arc<dyn TrainingCatalog>,
        roster: Arc<dyn RosterSource>,
        renderer: Arc<dyn TemplateRenderer>,
        store: Arc<dyn ArtifactStore>,
        notifier: Arc<dyn NotificationSink>,
        settings: BatchSettings,
    ) -> Self {
        Self {
            catalog,
            roster,
            renderer,
            store,
            notifier,
            settings,
            batches: RwLock::new(HashMap::new()),
        }
    }

    pub fn settings(&self) -> &BatchSettings {
        &self.settings
    }

    /// Validate the request, resolve its roster, and start processing.
    ///
    /// A request rejected before processing leaves a `Failed` batch behind and
    /// returns [`CertforgeError::BatchFailed`] carrying its id.
    pub async fn submit_batch(&self, request: GenerationRequest) -> Result<BatchHandle> {
        self.evict_expired();

        let handle = BatchHandle::new();
        let run = BatchRun::new(handle.batch_id);
        self.batches.write().insert(handle.batch_id, run.clone());

        info!(
            batch_id = %handle,
            training_id = %request.training_id,
            "Batch submitted with template '{}'",
            request.template.filename
        );

        let validated = match validate_request(request, self.catalog.as_ref(), &self.settings).await
        {
            Ok(validated) => Arc::new(validated),
            Err(failure) => return Err(self.abort(&run, failure)),
        };
        run.transition(BatchState::ResolvingRoster);

        let roster = match self.roster.fetch_roster(&validated.roster_reference).await {
            Ok(roster) => roster,
            Err(e) => return Err(self.abort(&run, BatchFailure::roster_unavailable(e.to_string()))),
        };

        let entries = roster.into_entries();
        run.set_total(entries.len());
        run.transition(BatchState::Processing);
        info!(
            batch_id = %handle,
            "Processing {} roster entries for training '{}'",
            entries.len(),
            validated.training.name
        );

        let pipeline = EntryPipeline {
            request: validated,
            renderer: self.renderer.clone(),
            store: self.store.clone(),
            retry: RetryPolicy::new(self.settings.retry.clone()),
            render_timeout: TimeoutWrapper::new(self.settings.render_timeout),
            store_timeout: TimeoutWrapper::new(self.settings.store_timeout),
        };

        let job = BatchJob {
            run,
            pipeline: Arc::new(pipeline),
            entries,
            max_concurrency: self.settings.max_concurrency.max(1),
            notifier: self.notifier.clone(),
        };

        // An empty roster completes before submit returns
        if job.entries.is_empty() {
            job.run().await;
        } else {
            tokio::spawn(job.run());
        }

        Ok(handle)
    }

    /// Current `(processed_count, total, state)` of a batch
    pub fn get_progress(&self, handle: BatchHandle) -> Result<BatchProgress> {
        Ok(self.run(handle)?.progress())
    }

    /// Final report of a completed batch
    pub fn get_result(&self, handle: BatchHandle) -> Result<Arc<BatchResult>> {
        let run = self.run(handle)?;
        run.completed_result().ok_or_else(|| {
            CertforgeError::not_yet_completed(format!(
                "batch {} is {}",
                handle,
                run.state().name()
            ))
        })
    }

    /// Stop dispatching new entries. Returns whether the request took effect.
    pub fn cancel(&self, handle: BatchHandle) -> Result<bool> {
        let run = self.run(handle)?;
        let accepted = run.request_cancel();
        if accepted {
            info!(batch_id = %handle, "Cancellation requested");
        }
        Ok(accepted)
    }

    /// Progress updates pushed as the batch advances
    pub fn subscribe(&self, handle: BatchHandle) -> Result<watch::Receiver<BatchProgress>> {
        Ok(self.run(handle)?.subscribe())
    }

    /// Wait until the batch is terminal and return its result
    pub async fn wait_for_completion(&self, handle: BatchHandle) -> Result<Arc<BatchResult>> {
        let run = self.run(handle)?;
        let mut progress = run.subscribe();

        let state = progress
            .wait_for(|p| p.state.is_terminal())
            .await
            .map(|p| p.state.clone())
            .map_err(|_| CertforgeError::internal(format!("batch {} was dropped", handle)))?;

        match state {
            BatchState::Failed(failure) => Err(CertforgeError::BatchFailed {
                batch_id: handle.batch_id,
                failure,
            }),
            _ => self.get_result(handle),
        }
    }

    /// Handles of every batch still tracked
    pub fn batch_ids(&self) -> Vec<Uuid> {
        self.evict_expired();
        self.batches.read().keys().copied().collect()
    }

    /// Forget batches that finished more than `retention` ago
    fn evict_expired(&self) {
        let retention = self.settings.retention;
        let mut batches = self.batches.write();
        let before = batches.len();
        batches.retain(|_, run| !run.is_expired(retention));

        let evicted = before - batches.len();
        if evicted > 0 {
            debug!("Evicted {} finished batches past retention", evicted);
        }
    }

    fn run(&self, handle: BatchHandle) -> Result<Arc<BatchRun>> {
        self.batches
            .read()
            .get(&handle.batch_id)
            .cloned()
            .ok_or_else(|| CertforgeError::not_found(format!("Batch {}", handle)))
    }

    fn abort(&self, run: &BatchRun, failure: BatchFailure) -> CertforgeError {
        warn!(batch_id = %run.id(), "Batch failed before processing: {}", failure);
        run.fail(failure.clone());
        CertforgeError::BatchFailed {
            batch_id: run.id(),
            failure,
        }
    }
}

/// Background processing of one batch
struct BatchJob {
    run: Arc<BatchRun>,
    pipeline: Arc<EntryPipeline>,
    entries: Vec<RosterEntry>,
    max_concurrency: usize,
    notifier: Arc<dyn NotificationSink>,
}

impl BatchJob {
    async fn run(self) {
        let started_at = Utc::now();
        let total = self.entries.len();
        let run = self.run;
        let pipeline = self.pipeline;

        let mut outcomes: Vec<(usize, EntryOutcome)> = stream::iter(self.entries)
            .map(|entry| {
                let run = run.clone();
                let pipeline = pipeline.clone();
                async move {
                    // Checked on first poll, which is when the entry is dispatched
                    if run.is_cancelled() {
                        let failure = EntryFailure::cancelled(entry.student_name);
                        return (entry.position, EntryOutcome::Failed(failure));
                    }

                    // Own task per entry so a panicking collaborator only fails its entry
                    let position = entry.position;
                    let student_name = entry.student_name.clone();
                    let task = tokio::spawn(async move { pipeline.process(&entry).await });
                    let outcome = match task.await {
                        Ok(outcome) => outcome,
                        Err(e) => {
                            error!(
                                batch_id = %run.id(),
                                "Certificate task for '{}' aborted: {}",
                                student_name, e
                            );
                            EntryOutcome::Failed(EntryFailure::aborted(student_name, e.to_string()))
                        }
                    };
                    run.record_processed();
                    (position, outcome)
                }
            })
            .buffer_unordered(self.max_concurrency)
            .collect()
            .await;

        outcomes.sort_by_key(|(position, _)| *position);

        let mut succeeded = Vec::new();
        let mut failed = Vec::new();
        for (_, outcome) in outcomes {
            match outcome {
                EntryOutcome::Succeeded(artifact) => succeeded.push(artifact),
                EntryOutcome::Failed(failure) => failed.push(failure),
            }
        }

        let result = Arc::new(BatchResult {
            batch_id: run.id(),
            total,
            succeeded,
            failed,
            started_at,
            finished_at: Utc::now(),
            cancelled: run.is_cancelled(),
        });

        info!(
            batch_id = %run.id(),
            "Batch completed: {} succeeded, {} failed of {}",
            result.succeeded.len(),
            result.failed.len(),
            result.total
        );
        run.complete(result.clone());

        let notifier = self.notifier;
        tokio::spawn(async move {
            if let Err(e) = notifier.notify(&result).await {
                warn!(batch_id = %result.batch_id, "Batch notification failed: {}", e);
            }
        });
    }
}
