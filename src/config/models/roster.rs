//! Roster source configuration

use super::*;
use serde::{Deserialize, Serialize};

/// Spreadsheet roster configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterConfig {
    /// Fetch timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
    /// Skip the first row of the sheet
    #[serde(default)]
    pub has_header: bool,
    /// Base URL used to build sheet export URLs
    #[serde(default = "default_sheets_base_url")]
    pub export_base_url: String,
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout(),
            has_header: false,
            export_base_url: default_sheets_base_url(),
        }
    }
}
