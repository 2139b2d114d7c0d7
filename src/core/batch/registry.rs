//! Live bookkeeping of one batch

use crate::core::models::{BatchFailure, BatchProgress, BatchResult, BatchState};
use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock};
use std::time::{Duration, Instant};
use tokio::sync::watch;
use tracing::{debug, warn};
use uuid::Uuid;

/// Shared record of a batch, owned by the coordinator registry
#[derive(Debug)]
pub(super) struct BatchRun {
    id: Uuid,
    state: RwLock<BatchState>,
    total: AtomicUsize,
    processed: AtomicUsize,
    cancel_requested: AtomicBool,
    result: OnceLock<Arc<BatchResult>>,
    finished: OnceLock<Instant>,
    progress_tx: watch::Sender<BatchProgress>,
}

impl BatchRun {
    pub fn new(id: Uuid) -> Arc<Self> {
        let (progress_tx, _) = watch::channel(BatchProgress {
            batch_id: id,
            processed_count: 0,
            total: 0,
            state: BatchState::Validating,
        });

        Arc::new(Self {
            id,
            state: RwLock::new(BatchState::Validating),
            total: AtomicUsize::new(0),
            processed: AtomicUsize::new(0),
            cancel_requested: AtomicBool::new(false),
            result: OnceLock::new(),
            finished: OnceLock::new(),
            progress_tx,
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn state(&self) -> BatchState {
        self.state.read().clone()
    }

    pub fn progress(&self) -> BatchProgress {
        // State first: a later state never pairs with an older count
        let state = self.state();
        BatchProgress {
            batch_id: self.id,
            processed_count: self.processed.load(Ordering::Acquire),
            total: self.total.load(Ordering::Acquire),
            state,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<BatchProgress> {
        self.progress_tx.subscribe()
    }

    /// The frozen result, only once the state reads `Completed`
    pub fn completed_result(&self) -> Option<Arc<BatchResult>> {
        let state = self.state.read();
        match *state {
            BatchState::Completed => self.result.get().cloned(),
            _ => None,
        }
    }

    pub fn set_total(&self, total: usize) {
        self.total.store(total, Ordering::Release);
    }

    /// Count one finished entry and push the new progress
    pub fn record_processed(&self) {
        self.processed.fetch_add(1, Ordering::AcqRel);
        self.publish();
    }

    pub fn request_cancel(&self) -> bool {
        if self.state().is_terminal() {
            return false;
        }
        !self.cancel_requested.swap(true, Ordering::AcqRel)
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel_requested.load(Ordering::Acquire)
    }

    /// Move to `next` if the state machine allows it
    pub fn transition(&self, next: BatchState) -> bool {
        {
            let mut state = self.state.write();
            if !state.can_transition_to(&next) {
                warn!(
                    batch_id = %self.id,
                    "Rejected batch transition {} -> {}",
                    state.name(),
                    next.name()
                );
                return false;
            }
            debug!(batch_id = %self.id, "Batch {} -> {}", state.name(), next.name());
            if next.is_terminal() {
                let _ = self.finished.set(Instant::now());
            }
            *state = next;
        }
        self.publish();
        true
    }

    pub fn fail(&self, failure: BatchFailure) -> bool {
        self.transition(BatchState::Failed(failure))
    }

    /// Freeze the result and move to `Completed` under one state lock
    pub fn complete(&self, result: Arc<BatchResult>) -> bool {
        {
            let mut state = self.state.write();
            if !state.can_transition_to(&BatchState::Completed) {
                warn!(
                    batch_id = %self.id,
                    "Rejected batch completion from {}",
                    state.name()
                );
                return false;
            }
            if self.result.set(result).is_err() {
                warn!(batch_id = %self.id, "Batch result already recorded");
                return false;
            }
            let _ = self.finished.set(Instant::now());
            *state = BatchState::Completed;
        }
        self.publish();
        true
    }

    /// Terminal for at least `retention`
    pub fn is_expired(&self, retention: Duration) -> bool {
        self.finished
            .get()
            .is_some_and(|finished| finished.elapsed() >= retention)
    }

    /// Push the current progress unless a newer one was already sent
    fn publish(&self) {
        let next = self.progress();
        self.progress_tx.send_if_modified(|current| {
            let advances = next.processed_count >= current.processed_count
                && stage(&next.state) >= stage(&current.state);
            if advances && *current != next {
                *current = next;
                true
            } else {
                false
            }
        });
    }
}

fn stage(state: &BatchState) -> u8 {
    match state {
        BatchState::Validating => 0,
        BatchState::ResolvingRoster => 1,
        BatchState::Processing => 2,
        BatchState::Completed | BatchState::Failed(_) => 3,
    }
}
