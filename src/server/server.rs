//! HTTP server core implementation

use crate::config::{Config, ServerConfig, StorageBackend};
use crate::core::Certforge;
use crate::server::routes;
use crate::server::state::AppState;
use crate::utils::error::{CertforgeError, Result};
use actix_web::{
    App, HttpServer as ActixHttpServer,
    middleware::{DefaultHeaders, Logger},
    web,
};
use std::time::Duration;
use tracing::info;

/// HTTP server
pub struct HttpServer {
    config: ServerConfig,
    state: AppState,
}

impl HttpServer {
    /// Wire the service and wrap it in server state
    pub async fn new(config: &Config) -> Result<Self> {
        info!("Creating HTTP server");
        let service = Certforge::new(config.clone()).await?;
        Ok(Self::from_service(&service))
    }

    pub fn from_service(service: &Certforge) -> Self {
        Self {
            config: service.config().server.clone(),
            state: AppState::from_service(service),
        }
    }

    /// Create the Actix-web application
    fn create_app(
        state: web::Data<AppState>,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        let max_body = state.config.server.max_body_size;
        let local = &state.config.storage.local;
        let serve_artifacts = (state.config.storage.backend == StorageBackend::Local
            && local.serve)
            .then(|| local.path.clone());

        let mut app = App::new()
            .app_data(state)
            .app_data(web::PayloadConfig::new(max_body))
            .app_data(web::JsonConfig::default().limit(max_body))
            .wrap(Logger::default())
            .wrap(DefaultHeaders::new().add(("Server", "certforge")))
            .configure(routes::configure_routes);

        if let Some(path) = serve_artifacts {
            app = app.service(actix_files::Files::new("/artifacts", path));
        }

        app
    }

    /// Start the HTTP server
    pub async fn start(self) -> Result<()> {
        let bind_addr = self.config.address();
        info!("Starting HTTP server on {}", bind_addr);

        let state = web::Data::new(self.state);

        let mut server = ActixHttpServer::new(move || Self::create_app(state.clone()))
            .client_request_timeout(Duration::from_secs(self.config.timeout));
        if let Some(workers) = self.config.workers {
            server = server.workers(workers);
        }

        let server = server
            .bind(&bind_addr)
            .map_err(|e| {
                CertforgeError::Config(format!("Failed to bind {}: {}", bind_addr, e))
            })?
            .run();

        info!("HTTP server listening on {}", bind_addr);

        server
            .await
            .map_err(|e| CertforgeError::internal(format!("Server error: {}", e)))?;

        info!("HTTP server stopped");
        Ok(())
    }

    /// Get server configuration
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Get application state
    pub fn state(&self) -> &AppState {
        &self.state
    }
}
