//! Certificate template rendering
//!
//! A renderer fills the placeholders of a presentation template and exports
//! it as a PNG image or a PDF document.

mod error;
mod fields;
mod http;

pub use error::RenderError;
pub use fields::FieldValues;
pub use http::ConversionServiceRenderer;

use crate::core::models::{ExportFormat, TemplateFile};
use async_trait::async_trait;
use bytes::Bytes;

/// Renders one certificate in one export format
#[async_trait]
pub trait TemplateRenderer: Send + Sync {
    /// Render `template` with `fields` into `format`.
    ///
    /// Implementations must reject an incomplete field set before doing any
    /// rendering work.
    async fn render(
        &self,
        template: &TemplateFile,
        fields: &FieldValues,
        format: ExportFormat,
    ) -> Result<Bytes, RenderError>;
}
