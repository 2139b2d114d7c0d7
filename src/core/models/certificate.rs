//! Rendered certificate artifacts

use serde::{Deserialize, Serialize};
use std::fmt;

/// Output format of a single render call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// PNG image
    Image,
    /// PDF document
    Document,
}

impl ExportFormat {
    /// Every format produced per student, in render order
    pub const ALL: [ExportFormat; 2] = [ExportFormat::Image, ExportFormat::Document];

    /// File extension of the rendered output
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Image => "png",
            ExportFormat::Document => "pdf",
        }
    }

    /// MIME type of the rendered output
    pub fn content_type(self) -> &'static str {
        match self {
            ExportFormat::Image => "image/png",
            ExportFormat::Document => "application/pdf",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportFormat::Image => write!(f, "image"),
            ExportFormat::Document => write!(f, "document"),
        }
    }
}

/// The stored output pair for one student
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificateArtifact {
    /// Student name as read from the roster
    pub student_name: String,
    /// URL of the PNG rendering
    pub image_ref: String,
    /// URL of the PDF rendering
    pub document_ref: String,
}
