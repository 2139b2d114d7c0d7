//! Batch lifecycle, progress, and terminal report types

use super::certificate::CertificateArtifact;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Opaque reference to a submitted batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BatchHandle {
    pub batch_id: Uuid,
}

impl BatchHandle {
    pub(crate) fn new() -> Self {
        Self {
            batch_id: Uuid::new_v4(),
        }
    }
}

impl fmt::Display for BatchHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.batch_id)
    }
}

impl From<Uuid> for BatchHandle {
    fn from(batch_id: Uuid) -> Self {
        Self { batch_id }
    }
}

/// Why a batch was aborted before processing started
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BatchFailureKind {
    /// The request failed validation
    InvalidRequest,
    /// The roster could not be fetched or parsed
    RosterUnavailable,
}

/// Whole-batch abort reason
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchFailure {
    pub kind: BatchFailureKind,
    pub message: String,
}

impl BatchFailure {
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self {
            kind: BatchFailureKind::InvalidRequest,
            message: message.into(),
        }
    }

    pub fn roster_unavailable(message: impl Into<String>) -> Self {
        Self {
            kind: BatchFailureKind::RosterUnavailable,
            message: message.into(),
        }
    }
}

impl fmt::Display for BatchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

/// Batch state machine.
///
/// `Validating -> ResolvingRoster -> Processing -> Completed`; `Failed` is only
/// reachable from the first two states.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "reason")]
pub enum BatchState {
    Validating,
    ResolvingRoster,
    Processing,
    Completed,
    Failed(BatchFailure),
}

impl BatchState {
    /// Completed and Failed never change again
    pub fn is_terminal(&self) -> bool {
        matches!(self, BatchState::Completed | BatchState::Failed(_))
    }

    /// Whether moving from `self` to `next` is a legal transition
    pub fn can_transition_to(&self, next: &BatchState) -> bool {
        matches!(
            (self, next),
            (BatchState::Validating, BatchState::ResolvingRoster)
                | (BatchState::Validating, BatchState::Failed(_))
                | (BatchState::ResolvingRoster, BatchState::Processing)
                | (BatchState::ResolvingRoster, BatchState::Failed(_))
                | (BatchState::Processing, BatchState::Completed)
        )
    }

    /// Short state label for logs and API payloads
    pub fn name(&self) -> &'static str {
        match self {
            BatchState::Validating => "validating",
            BatchState::ResolvingRoster => "resolving_roster",
            BatchState::Processing => "processing",
            BatchState::Completed => "completed",
            BatchState::Failed(_) => "failed",
        }
    }
}

/// Point-in-time progress of a batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchProgress {
    pub batch_id: Uuid,
    pub processed_count: usize,
    pub total: usize,
    #[serde(flatten)]
    pub state: BatchState,
}

impl BatchProgress {
    /// Percentage of processed entries; an empty batch counts as fully processed
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            100.0
        } else {
            self.processed_count as f64 * 100.0 / self.total as f64
        }
    }
}

/// Recorded cause of a per-entry failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FailureReason {
    IncompleteFieldSet,
    TemplateMalformed,
    RenderTimeout,
    RenderFailed,
    StoreUnavailable,
    QuotaExceeded,
    Cancelled,
    /// The entry's task ended without an outcome, e.g. a collaborator panicked
    Aborted,
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// A roster entry that did not produce a certificate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryFailure {
    pub student_name: String,
    pub reason: FailureReason,
    /// Last error message reported by the failing collaborator
    pub message: String,
}

impl EntryFailure {
    pub fn cancelled(student_name: impl Into<String>) -> Self {
        Self {
            student_name: student_name.into(),
            reason: FailureReason::Cancelled,
            message: "batch cancelled before this entry was dispatched".to_string(),
        }
    }

    pub fn aborted(student_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            student_name: student_name.into(),
            reason: FailureReason::Aborted,
            message: message.into(),
        }
    }
}

/// Terminal report of a completed batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchResult {
    pub batch_id: Uuid,
    pub total: usize,
    pub succeeded: Vec<CertificateArtifact>,
    pub failed: Vec<EntryFailure>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    /// Whether a cancel request arrived while processing
    pub cancelled: bool,
}

impl BatchResult {
    /// `succeeded + failed == total`
    pub fn is_consistent(&self) -> bool {
        self.succeeded.len() + self.failed.len() == self.total
    }

    /// Number of entries that failed for a given reason
    pub fn failures_with(&self, reason: FailureReason) -> usize {
        self.failed.iter().filter(|f| f.reason == reason).count()
    }
}
