//! Storage layer
//!
//! Persistence for rendered certificate artifacts.

/// Artifact storage module
pub mod files;

pub use files::{ArtifactMetadata, ArtifactStore, FileStorage, LocalArtifactStore, StoreError};
