//! # certforge
//!
//! Bulk training-certificate generation. A batch takes one slide template,
//! one training from the catalog, and a spreadsheet roster of student names,
//! and produces a PNG and a PDF certificate for every student.
//!
//! ## Features
//!
//! - **Roster resolution**: Google Sheets URLs or ids fetched as CSV
//! - **Rendering**: placeholder substitution through an HTTP conversion service
//! - **Storage**: local directory (served under `/artifacts`) or S3
//! - **Batches**: bounded concurrency, per-entry retry, cancellation, progress
//! - **Notifications**: signed webhooks and log summaries on completion
//!
//! ## Service Mode
//!
//! ```rust,no_run
//! use certforge::{Config, server::run_server};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_file("config/certforge.yaml").await?;
//!     run_server(config).await?;
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod config;
pub mod core;
pub mod server;
pub mod storage;
pub mod utils;

// Re-export main types
pub use config::Config;
pub use core::Certforge;
pub use core::batch::BatchCoordinator;
pub use core::models::{
    BatchHandle, BatchProgress, BatchResult, BatchState, CertificateArtifact, EntryFailure,
    FailureReason, GenerationRequest, TemplateFile,
};
pub use utils::error::{CertforgeError, Result};

/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
/// Description of the crate
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Build information
#[derive(Debug, Clone)]
pub struct BuildInfo {
    pub version: &'static str,
    pub build_time: &'static str,
    /// Git commit hash
    pub git_hash: &'static str,
    pub rust_version: &'static str,
}

impl Default for BuildInfo {
    fn default() -> Self {
        Self {
            version: VERSION,
            build_time: env!("BUILD_TIME"),
            git_hash: env!("GIT_HASH"),
            rust_version: env!("RUST_VERSION"),
        }
    }
}

pub fn build_info() -> BuildInfo {
    BuildInfo::default()
}
