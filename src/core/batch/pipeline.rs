//! Per-entry render and store pipeline

use super::validation::ValidatedRequest;
use crate::core::models::{CertificateArtifact, EntryFailure, ExportFormat, FailureReason};
use crate::core::renderer::{FieldValues, RenderError, TemplateRenderer};
use crate::core::roster::RosterEntry;
use crate::storage::files::{ArtifactStore, StoreError};
use crate::utils::error::recovery::{RetryPolicy, TimeoutWrapper};
use bytes::Bytes;
use std::sync::Arc;
use tracing::{debug, error, warn};
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Outcome of one roster entry
#[derive(Debug, Clone)]
pub(super) enum EntryOutcome {
    Succeeded(CertificateArtifact),
    Failed(EntryFailure),
}

/// Everything an entry needs; shared by all entries of one batch
pub(super) struct EntryPipeline {
    pub request: Arc<ValidatedRequest>,
    pub renderer: Arc<dyn TemplateRenderer>,
    pub store: Arc<dyn ArtifactStore>,
    pub retry: RetryPolicy,
    pub render_timeout: TimeoutWrapper,
    pub store_timeout: TimeoutWrapper,
}

impl EntryPipeline {
    /// Render and store the image, then the document
    pub async fn process(&self, entry: &RosterEntry) -> EntryOutcome {
        let fields = self.request.fields_for(&entry.student_name);
        if let Err(e) = fields.ensure_complete() {
            return self.failure(entry, e.reason(), e.to_string());
        }

        let image_ref = match self.produce(entry, &fields, ExportFormat::Image).await {
            Ok(url) => url,
            Err((reason, message)) => return self.failure(entry, reason, message),
        };

        let document_ref = match self.produce(entry, &fields, ExportFormat::Document).await {
            Ok(url) => url,
            Err((reason, message)) => {
                warn!(
                    "Orphaned image left in storage for '{}': {}",
                    entry.student_name, image_ref
                );
                return self.failure(entry, reason, message);
            }
        };

        debug!("Certificate generated for '{}'", entry.student_name);
        EntryOutcome::Succeeded(CertificateArtifact {
            student_name: entry.student_name.clone(),
            image_ref,
            document_ref,
        })
    }

    /// Render one format and store it, returning the artifact URL
    async fn produce(
        &self,
        entry: &RosterEntry,
        fields: &FieldValues,
        format: ExportFormat,
    ) -> Result<String, (FailureReason, String)> {
        let bytes = self
            .render(fields, format)
            .await
            .map_err(|e| (e.reason(), e.to_string()))?;

        self.store(bytes, &artifact_name(entry, format))
            .await
            .map_err(|e| (e.reason(), e.to_string()))
    }

    async fn render(
        &self,
        fields: &FieldValues,
        format: ExportFormat,
    ) -> Result<Bytes, RenderError> {
        let template = &self.request.template;
        self.retry
            .call_retryable(|| async move {
                match self
                    .render_timeout
                    .call(self.renderer.render(template, fields, format))
                    .await
                {
                    Ok(rendered) => rendered,
                    Err(elapsed) => Err(RenderError::RenderTimeout(elapsed.to_string())),
                }
            })
            .await
    }

    async fn store(&self, content: Bytes, name: &str) -> Result<String, StoreError> {
        self.retry
            .call_retryable(|| {
                let content = content.clone();
                async move {
                    match self.store_timeout.call(self.store.store(content, name)).await {
                        Ok(stored) => stored,
                        Err(elapsed) => Err(StoreError::StoreUnavailable(elapsed.to_string())),
                    }
                }
            })
            .await
    }

    fn failure(
        &self,
        entry: &RosterEntry,
        reason: FailureReason,
        message: String,
    ) -> EntryOutcome {
        error!(
            "Certificate for '{}' failed ({}): {}",
            entry.student_name, reason, message
        );
        EntryOutcome::Failed(EntryFailure {
            student_name: entry.student_name.clone(),
            reason,
            message,
        })
    }
}

/// Storage name of an artifact: `<position>-<student-slug>.<ext>`, 1-based
pub fn artifact_name(entry: &RosterEntry, format: ExportFormat) -> String {
    format!(
        "{:03}-{}.{}",
        entry.position + 1,
        slugify(&entry.student_name),
        format.extension()
    )
}

/// Lowercase ASCII slug; accented letters fold to their base letter
fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for c in name.nfd().filter(|c| !is_combining_mark(*c)) {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.ends_with('-') && !slug.is_empty() {
            slug.push('-');
        }
    }

    let slug = slug.trim_end_matches('-');
    if slug.is_empty() {
        "certificate".to_string()
    } else {
        slug.to_string()
    }
}
