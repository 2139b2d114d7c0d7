//! Roster sources
//!
//! A roster is the ordered list of student names driving one batch. Order is
//! preserved and duplicates stay distinct entries.

mod error;
mod parser;
mod sheets;

pub use error::RosterError;
pub use parser::parse_roster_csv;
pub use sheets::{SheetsRosterSource, resolve_export_url};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// One student line of a roster
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    /// Zero-based index in roster order
    pub position: usize,
    /// Trimmed, non-empty student name
    pub student_name: String,
}

/// Ordered roster resolved from a reference
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    entries: Vec<RosterEntry>,
}

impl Roster {
    /// Build a roster from names, trimming them and skipping blanks
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let entries = names
            .into_iter()
            .map(|name| name.as_ref().trim().to_string())
            .filter(|name| !name.is_empty())
            .enumerate()
            .map(|(position, student_name)| RosterEntry {
                position,
                student_name,
            })
            .collect();
        Self { entries }
    }

    pub fn entries(&self) -> &[RosterEntry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<RosterEntry> {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Source of student names for a batch
#[async_trait]
pub trait RosterSource: Send + Sync {
    /// Fetch the roster behind `reference`.
    ///
    /// An existing but empty document yields an empty roster, not an error.
    async fn fetch_roster(&self, reference: &str) -> Result<Roster, RosterError>;
}
