//! Certificate batch coordination
//!
//! A batch turns one generation request and one roster into a certificate
//! pair per student. Validation and roster resolution happen on submission;
//! rendering and storage run in the background with bounded concurrency.

mod coordinator;
mod pipeline;
mod registry;
mod settings;
mod validation;


pub use coordinator::BatchCoordinator;
pub use pipeline::artifact_name;
pub use settings::BatchSettings;
pub use validation::ValidatedRequest;
