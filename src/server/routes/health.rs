//! Health check and version endpoints

use crate::core::health_report;
use crate::server::routes::ApiResponse;
use crate::server::state::AppState;
use actix_web::{HttpResponse, Result as ActixResult, web};
use serde::Serialize;
use tracing::debug;

/// Configure health check routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/version", web::get().to(version_info));
}

/// Health of storage plus the number of tracked batches.
///
/// Responds 503 when any component is unhealthy.
pub async fn health_check(state: web::Data<AppState>) -> ActixResult<HttpResponse> {
    debug!("Health check requested");

    let status = health_report(
        state.storage.as_deref(),
        state.coordinator.batch_ids().len(),
    )
    .await;

    if status.is_healthy() {
        Ok(HttpResponse::Ok().json(ApiResponse::success(status)))
    } else {
        Ok(HttpResponse::ServiceUnavailable().json(ApiResponse::success(status)))
    }
}

#[derive(Debug, Serialize)]
struct VersionInfo {
    name: &'static str,
    version: &'static str,
    git_hash: &'static str,
    build_time: &'static str,
    rust_version: &'static str,
}

/// Build metadata
pub async fn version_info() -> ActixResult<HttpResponse> {
    let info = VersionInfo {
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        git_hash: env!("GIT_HASH"),
        build_time: env!("BUILD_TIME"),
        rust_version: env!("RUST_VERSION"),
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(info)))
}
