//! Training catalog endpoints

use crate::core::models::{NewTraining, TrainingUpdate};
use crate::server::routes::ApiResponse;
use crate::server::state::AppState;
use crate::utils::error::CertforgeError;
use actix_web::{HttpResponse, web};
use tracing::info;

type HandlerResult = Result<HttpResponse, CertforgeError>;

/// Configure training routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/trainings")
            .route("", web::get().to(list_trainings))
            .route("", web::post().to(create_training))
            .route("/{id}", web::get().to(get_training))
            .route("/{id}", web::put().to(update_training))
            .route("/{id}", web::delete().to(delete_training)),
    );
}

async fn list_trainings(state: web::Data<AppState>) -> HandlerResult {
    let trainings = state.catalog.list().await;
    Ok(HttpResponse::Ok().json(ApiResponse::success(trainings)))
}

async fn get_training(state: web::Data<AppState>, id: web::Path<String>) -> HandlerResult {
    let training = state.catalog.get(&id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(training)))
}

async fn create_training(
    state: web::Data<AppState>,
    payload: web::Json<NewTraining>,
) -> HandlerResult {
    let training = state.catalog.create(payload.into_inner()).await?;
    info!(training_id = %training.id, "Training '{}' created", training.name);
    Ok(HttpResponse::Created().json(ApiResponse::success(training)))
}

async fn update_training(
    state: web::Data<AppState>,
    id: web::Path<String>,
    payload: web::Json<TrainingUpdate>,
) -> HandlerResult {
    let training = state.catalog.update(&id, payload.into_inner()).await?;
    info!(training_id = %training.id, "Training updated");
    Ok(HttpResponse::Ok().json(ApiResponse::success(training)))
}

async fn delete_training(state: web::Data<AppState>, id: web::Path<String>) -> HandlerResult {
    state.catalog.delete(&id).await?;
    info!(training_id = %id, "Training deleted");
    Ok(HttpResponse::NoContent().finish())
}
