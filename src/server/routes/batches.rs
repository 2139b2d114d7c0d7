//! Certificate batch endpoints

use crate::core::models::{
    BatchHandle, BatchProgress, GenerationRequest, RequestSummary, TemplateFile,
};
use crate::server::routes::ApiResponse;
use crate::server::state::AppState;
use crate::utils::error::CertforgeError;
use actix_multipart::{Field, Multipart};
use actix_web::{HttpResponse, web};
use futures::StreamExt;
use serde::Serialize;
use tracing::{debug, info};
use uuid::Uuid;

type HandlerResult = Result<HttpResponse, CertforgeError>;

/// Upper bound for a single text form field
const MAX_TEXT_FIELD: usize = 8 * 1024;

/// Configure batch routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/batches")
            .route("", web::get().to(list_batches))
            .route("", web::post().to(submit_batch))
            .route("/{id}", web::get().to(get_progress))
            .route("/{id}/result", web::get().to(get_result))
            .route("/{id}/cancel", web::post().to(cancel_batch)),
    );
}

#[derive(Debug, Serialize)]
struct BatchAccepted {
    batch_id: Uuid,
    request: RequestSummary,
    progress: BatchProgress,
}

#[derive(Debug, Serialize)]
struct CancelOutcome {
    batch_id: Uuid,
    cancelled: bool,
}

/// Accept a multipart generation request.
///
/// Fields: `template` (file), `training_id`, `completion_date`, `location`,
/// `city`, `roster_url`. Missing fields are left empty and reported by batch
/// validation, so every request problem surfaces as one 422 reason.
async fn submit_batch(state: web::Data<AppState>, mut payload: Multipart) -> HandlerResult {
    let max_body = state.config.server.max_body_size;

    let mut template = TemplateFile::new("", Vec::new());
    let mut training_id = String::new();
    let mut completion_date = String::new();
    let mut location = String::new();
    let mut city = String::new();
    let mut roster_reference = String::new();

    while let Some(item) = payload.next().await {
        let mut field = item.map_err(|e| {
            CertforgeError::BadRequest(format!("Invalid multipart data: {}", e))
        })?;

        let field_name = match field.name() {
            Some(name) => name.to_string(),
            None => continue,
        };

        match field_name.as_str() {
            "template" => {
                let filename = field
                    .content_disposition()
                    .and_then(|cd| cd.get_filename())
                    .unwrap_or_default()
                    .to_string();
                let content = read_field(&mut field, max_body).await?;
                template = TemplateFile::new(filename, content);
            }
            "training_id" => training_id = read_text(&mut field).await?,
            "completion_date" => completion_date = read_text(&mut field).await?,
            "location" => location = read_text(&mut field).await?,
            "city" => city = read_text(&mut field).await?,
            "roster_url" | "roster_reference" => roster_reference = read_text(&mut field).await?,
            other => {
                debug!("Skipping unknown form field '{}'", other);
                while field.next().await.is_some() {}
            }
        }
    }

    let request = GenerationRequest {
        template,
        training_id,
        completion_date,
        location,
        city,
        roster_reference,
    };
    let summary = RequestSummary::from(&request);

    let handle = state.coordinator.submit_batch(request).await?;
    let progress = state.coordinator.get_progress(handle)?;
    info!(batch_id = %handle, "Batch accepted with {} entries", progress.total);

    Ok(HttpResponse::Accepted().json(ApiResponse::success(BatchAccepted {
        batch_id: handle.batch_id,
        request: summary,
        progress,
    })))
}

async fn list_batches(state: web::Data<AppState>) -> HandlerResult {
    let progress: Vec<BatchProgress> = state
        .coordinator
        .batch_ids()
        .into_iter()
        .filter_map(|id| state.coordinator.get_progress(BatchHandle::from(id)).ok())
        .collect();
    Ok(HttpResponse::Ok().json(ApiResponse::success(progress)))
}

async fn get_progress(state: web::Data<AppState>, id: web::Path<Uuid>) -> HandlerResult {
    let progress = state.coordinator.get_progress(BatchHandle::from(*id))?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(progress)))
}

async fn get_result(state: web::Data<AppState>, id: web::Path<Uuid>) -> HandlerResult {
    let result = state.coordinator.get_result(BatchHandle::from(*id))?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(result.as_ref())))
}

async fn cancel_batch(state: web::Data<AppState>, id: web::Path<Uuid>) -> HandlerResult {
    let handle = BatchHandle::from(*id);
    let cancelled = state.coordinator.cancel(handle)?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(CancelOutcome {
        batch_id: handle.batch_id,
        cancelled,
    })))
}

async fn read_field(field: &mut Field, limit: usize) -> Result<Vec<u8>, CertforgeError> {
    let mut data = Vec::new();
    while let Some(chunk) = field.next().await {
        let bytes = chunk
            .map_err(|e| CertforgeError::BadRequest(format!("Error reading form field: {}", e)))?;
        if data.len() + bytes.len() > limit {
            return Err(CertforgeError::BadRequest(format!(
                "Form field exceeds {} bytes",
                limit
            )));
        }
        data.extend_from_slice(&bytes);
    }
    Ok(data)
}

async fn read_text(field: &mut Field) -> Result<String, CertforgeError> {
    let data = read_field(field, MAX_TEXT_FIELD).await?;
    String::from_utf8(data)
        .map(|text| text.trim().to_string())
        .map_err(|_| CertforgeError::BadRequest("Form field is not valid UTF-8".to_string()))
}
