//! Server builder and run_server function

use crate::config::Config;
use crate::server::server::HttpServer;
use crate::utils::error::{CertforgeError, Result};
use tracing::info;

/// Server builder for easier configuration
#[derive(Default)]
pub struct ServerBuilder {
    config: Option<Config>,
}

impl ServerBuilder {
    /// Create a new server builder
    pub fn new() -> Self {
        Self { config: None }
    }

    /// Set configuration
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Build the HTTP server
    pub async fn build(self) -> Result<HttpServer> {
        let config = self
            .config
            .ok_or_else(|| CertforgeError::Config("Configuration is required".to_string()))?;

        HttpServer::new(&config).await
    }
}

/// Build the server from `config` and serve until shutdown
pub async fn run_server(config: Config) -> Result<()> {
    info!("Starting certforge");

    let server = ServerBuilder::new().with_config(config).build().await?;
    info!("Server starting at: http://{}", server.config().address());
    info!("API Endpoints:");
    info!("   GET  /health - Health check");
    info!("   GET  /v1/trainings - Training catalog");
    info!("   POST /v1/batches - Submit certificate batch");
    info!("   GET  /v1/batches/{{id}} - Batch progress");
    info!("   GET  /v1/batches/{{id}}/result - Batch result");

    server.start().await
}
