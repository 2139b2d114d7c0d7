//! Renderer backed by an external document conversion service

use super::error::RenderError;
use super::fields::FieldValues;
use super::TemplateRenderer;
use crate::config::RendererConfig;
use crate::core::models::{ExportFormat, TemplateFile};
use crate::utils::error::recovery::Bulkhead;
use crate::utils::error::{CertforgeError, Result};
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::debug;

const PPTX_MIME: &str = "application/vnd.openxmlformats-officedocument.presentationml.presentation";

/// Posts the template and its field map to a conversion endpoint and returns
/// the exported bytes
#[derive(Debug, Clone)]
pub struct ConversionServiceRenderer {
    client: Client,
    config: RendererConfig,
    bulkhead: Bulkhead,
}

impl ConversionServiceRenderer {
    /// Create a new renderer
    pub fn new(config: RendererConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| {
                CertforgeError::Config(format!("Failed to create renderer HTTP client: {}", e))
            })?;

        let bulkhead = Bulkhead::new("conversion-service", config.max_concurrent_requests);
        Ok(Self {
            client,
            config,
            bulkhead,
        })
    }

    fn build_form(
        template: &TemplateFile,
        fields: &FieldValues,
        format: ExportFormat,
    ) -> std::result::Result<Form, RenderError> {
        let replacements = serde_json::to_string(&fields.placeholders())
            .map_err(|e| RenderError::RenderFailed(format!("Invalid field map: {}", e)))?;

        let template_part = Part::bytes(template.content.to_vec())
            .file_name(template.filename.clone())
            .mime_str(PPTX_MIME)
            .map_err(|e| RenderError::RenderFailed(format!("Invalid MIME type: {}", e)))?;

        Ok(Form::new()
            .part("template", template_part)
            .text("format", format.extension())
            .text("replacements", replacements))
    }

    async fn send(
        &self,
        template: &TemplateFile,
        fields: &FieldValues,
        format: ExportFormat,
    ) -> std::result::Result<Bytes, RenderError> {
        let form = Self::build_form(template, fields, format)?;
        let mut request = self.client.post(&self.config.endpoint).multipart(form);
        if let Some(api_key) = &self.config.api_key {
            request = request.bearer_auth(api_key);
        }

        debug!(
            "Rendering {} for '{}' via {}",
            format, fields.student_name, self.config.endpoint
        );

        let response = request.send().await.map_err(map_transport_error)?;
        let status = response.status();

        if status.is_success() {
            let body = response.bytes().await.map_err(map_transport_error)?;
            if body.is_empty() {
                return Err(RenderError::RenderFailed(
                    "conversion service returned an empty body".to_string(),
                ));
            }
            return Ok(body);
        }

        let detail = response.text().await.unwrap_or_default();
        Err(map_status(status, detail))
    }
}

#[async_trait]
impl TemplateRenderer for ConversionServiceRenderer {
    async fn render(
        &self,
        template: &TemplateFile,
        fields: &FieldValues,
        format: ExportFormat,
    ) -> std::result::Result<Bytes, RenderError> {
        fields.ensure_complete()?;

        self.bulkhead
            .call(self.send(template, fields, format))
            .await
            .map_err(|e| RenderError::RenderFailed(e.to_string()))?
    }
}

fn map_transport_error(err: reqwest::Error) -> RenderError {
    if err.is_timeout() {
        RenderError::RenderTimeout(err.to_string())
    } else {
        RenderError::RenderFailed(err.to_string())
    }
}

fn map_status(status: StatusCode, detail: String) -> RenderError {
    let message = if detail.is_empty() {
        format!("HTTP {}", status)
    } else {
        format!("HTTP {}: {}", status, detail)
    };

    match status {
        StatusCode::UNPROCESSABLE_ENTITY => RenderError::TemplateMalformed(message),
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            RenderError::RenderTimeout(message)
        }
        _ => RenderError::RenderFailed(message),
    }
}
