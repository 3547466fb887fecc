//! docsum HTTP Server
//!
//! Actix-web REST API: `/summarize`, `/upload`, `/health` and the static
//! front-end.

mod error;
mod routes;
mod state;
mod types;

pub use error::ApiError;
pub use state::AppState;
pub use types::{ErrorResponse, HealthResponse, SummarizeRequest, SummarizeResponse, UploadResponse};

use actix_files::Files;
use actix_web::{web, App, HttpServer};
use docsum_common::{AppConfig, DocsumError, Result};
use std::sync::Arc;
use tracing::info;
use tracing_actix_web::TracingLogger;

/// Register routes and shared state
pub fn configure(cfg: &mut web::ServiceConfig, state: Arc<AppState>) {
    let static_dir = state.config.static_dir.clone();
    let json_config = web::JsonConfig::default()
        .limit(state.config.max_upload_bytes)
        .error_handler(|err, _req| {
            ApiError(DocsumError::invalid_input(format!("Invalid JSON payload: {}", err))).into()
        });

    cfg.app_data(web::Data::new(state))
        .app_data(json_config)
        .service(routes::summarize)
        .service(routes::upload)
        .service(routes::health);

    if static_dir.is_dir() {
        cfg.service(Files::new("/", static_dir).index_file("index.html"));
    }
}

/// Start the HTTP server and run until shutdown
pub async fn start_server(config: AppConfig) -> Result<()> {
    let bind_addr = config.server_bind_address();
    let state = Arc::new(AppState::new(config));

    info!("Starting HTTP server on {}", bind_addr);

    HttpServer::new(move || {
        let state = state.clone();
        App::new()
            .wrap(TracingLogger::default())
            .configure(|cfg| configure(cfg, state))
    })
    .bind(&bind_addr)
    .map_err(|e| DocsumError::config(format!("Failed to bind {}: {}", bind_addr, e)))?
    .run()
    .await?;

    info!("HTTP server stopped");
    Ok(())
}
