//! Roster source errors

use thiserror::Error;

/// Failures while resolving a roster reference
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RosterError {
    /// The reference could not be resolved or fetched
    #[error("Roster source unreachable: {0}")]
    UnreachableSource(String),

    /// The document exists but is not a readable single-column name list
    #[error("Malformed roster: {0}")]
    MalformedRoster(String),
}
