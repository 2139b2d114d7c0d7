//! Integration tests for certforge
//!
//! Batch coordination runs against the in-process collaborators in
//! `common`; HTTP adapters run against `wiremock` servers.

pub mod config_tests;
pub mod notification_tests;
pub mod roster_tests;
pub mod service_tests;
