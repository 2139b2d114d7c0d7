//! Generation request submitted by an operator

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// ZIP local file header; every `.pptx` package starts with it
const ZIP_SIGNATURE: &[u8] = b"PK\x03\x04";

/// Uploaded certificate template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateFile {
    /// Original file name, used for format detection
    pub filename: String,
    /// Raw template bytes
    pub content: Bytes,
}

impl TemplateFile {
    pub fn new(filename: impl Into<String>, content: impl Into<Bytes>) -> Self {
        Self {
            filename: filename.into(),
            content: content.into(),
        }
    }

    /// Lowercased file extension, if any
    pub fn extension(&self) -> Option<String> {
        Path::new(&self.filename)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
    }

    /// Whether the content is a ZIP package (Office Open XML container)
    pub fn is_zip_package(&self) -> bool {
        self.content.starts_with(ZIP_SIGNATURE)
    }

    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

/// One certificate batch request. Immutable once submitted.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub template: TemplateFile,
    pub training_id: String,
    /// Calendar date as `YYYY-MM-DD`
    pub completion_date: String,
    pub location: String,
    pub city: String,
    /// Spreadsheet URL or id holding the student names
    pub roster_reference: String,
}

/// Request metadata echoed back to API clients (the template bytes are omitted)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestSummary {
    pub template_filename: String,
    pub training_id: String,
    pub completion_date: String,
    pub location: String,
    pub city: String,
    pub roster_reference: String,
}

impl From<&GenerationRequest> for RequestSummary {
    fn from(request: &GenerationRequest) -> Self {
        Self {
            template_filename: request.template.filename.clone(),
            training_id: request.training_id.clone(),
            completion_date: request.completion_date.clone(),
            location: request.location.clone(),
            city: request.city.clone(),
            roster_reference: request.roster_reference.clone(),
        }
    }
}
