//! Server builder and run_server function

use crate::config::Config;
use crate::server::server::HttpServer;
use crate::utils::error::{GatewayError, Result};
use tracing::info;

/// Server builder for easier configuration
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
    pub fn build(self) -> Result<HttpServer> {
        let config = self
            .config
            .ok_or_else(|| GatewayError::Config("Configuration is required".to_string()))?;

        HttpServer::new(&config)
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Run the server with automatic configuration loading
///
/// The tracing subscriber is initialized here rather than in `main`:
/// the filter level is itself a configuration option, so configuration
/// has to load first.
pub async fn run_server() -> Result<()> {
    let config_path = "config/gateway.yaml";
    let config = match Config::from_file(config_path).await {
        Ok(config) => {
            crate::logging::init_tracing(&config.gateway.log.level);
            info!("Configuration loaded from {}", config_path);
            config
        }
        Err(e) => {
            let config = Config::from_env()?;
            crate::logging::init_tracing(&config.gateway.log.level);
            info!(
                "No usable configuration file ({}), using defaults with environment overrides",
                e
            );
            config
        }
    };

    info!("Starting errbeacon gateway");

    let server = HttpServer::new(&config)?;
    info!(
        "Server starting at http://{}:{}",
        config.server().host,
        config.server().port
    );
    info!("   GET  /health      - Health check");
    info!("   POST /client-logs - Client error ingestion");

    server.start().await
}
