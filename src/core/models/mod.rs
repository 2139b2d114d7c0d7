//! Domain models shared by the certificate pipeline
//!
//! Trainings, generation requests, rendered artifacts, and batch bookkeeping.

pub mod batch;
pub mod certificate;
pub mod request;
pub mod training;

pub use batch::{
    BatchFailure, BatchFailureKind, BatchHandle, BatchProgress, BatchResult, BatchState,
    EntryFailure, FailureReason,
};
pub use certificate::{CertificateArtifact, ExportFormat};
pub use request::{GenerationRequest, RequestSummary, TemplateFile};
pub use training::{NewTraining, Training, TrainingSnapshot, TrainingUpdate};
