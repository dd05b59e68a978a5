//! HTTP server core implementation

use crate::config::{Config, ServerConfig};
use crate::server::handlers::{health_check, report_client_error};
use crate::server::middleware::{RequestIdMiddleware, RequestLoggingMiddleware};
use crate::server::state::AppState;
use crate::utils::error::{GatewayError, Result};
use actix_web::{web, App, HttpServer as ActixHttpServer};
use tracing::info;

/// HTTP server
pub struct HttpServer {
    /// Server configuration
    config: ServerConfig,
    /// Application state
    state: AppState,
}

impl HttpServer {
    /// Create a new HTTP server
    pub fn new(config: &Config) -> Result<Self> {
        info!("Creating HTTP server");

        let state = AppState::new(config)?;

        Ok(Self {
            config: config.gateway.server.clone(),
            state,
        })
    }

    /// Start the HTTP server
    pub async fn start(self) -> Result<()> {
        let state = web::Data::new(self.state);

        // Bounds rate-limit memory for keys that stop sending
        state.rate_limiter.clone().start_cleanup_task();

        let bind_addr = (self.config.host.clone(), self.config.port);
        info!("Binding server to {}:{}", bind_addr.0, bind_addr.1);

        let mut server = ActixHttpServer::new(move || {
            App::new()
                .app_data(state.clone())
                .wrap(RequestLoggingMiddleware)
                .wrap(RequestIdMiddleware)
                .route("/health", web::get().to(health_check))
                .route("/client-logs", web::post().to(report_client_error))
        })
        .bind(bind_addr)
        .map_err(|e| GatewayError::Config(format!("Failed to bind server: {}", e)))?;

        if let Some(workers) = self.config.workers {
            server = server.workers(workers);
        }

        server
            .run()
            .await
            .map_err(|e| GatewayError::Internal(format!("Server error: {}", e)))
    }
}
