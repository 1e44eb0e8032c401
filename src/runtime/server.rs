//! HTTP server

use std::time::Duration;

use actix_web::middleware::Compress;
use actix_web::{App, HttpServer};
use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::api::middleware::RequestIdMiddleware;
use crate::config::StaticConfig;

use super::startup::prepare_server_startup;

/// Run until SIGINT / SIGTERM, then drain in-flight requests for
/// `server.shutdown_timeout_secs`.
///
/// Logging must already be initialized.
pub async fn run_server(config: &'static StaticConfig) -> Result<()> {
    let context = prepare_server_startup(config).await.inspect_err(|e| {
        tracing::error!("Server startup failed: {:#}", e);
    })?;

    let server_config = &config.server;
    let workers = server_config.workers.clamp(1, 32);
    let bind_address = format!("{}:{}", server_config.host, server_config.port);

    let server = HttpServer::new(move || {
        let context = context.clone();
        App::new()
            .wrap(Compress::default())
            .wrap(RequestIdMiddleware)
            .configure(move |cfg| context.register(cfg))
    })
    .client_request_timeout(Duration::from_secs(server_config.request_timeout_secs))
    .keep_alive(Duration::from_secs(server_config.idle_timeout_secs))
    .shutdown_timeout(server_config.shutdown_timeout_secs)
    .workers(workers)
    .bind(&bind_address)
    .with_context(|| format!("Failed to bind {}", bind_address))?
    .run();

    warn!("Starting server at http://{} with {} workers", bind_address, workers);

    // actix 自带 SIGINT/SIGTERM 处理，并在 shutdown_timeout 内等待请求结束
    server.await.context("HTTP server terminated abnormally")?;
    info!("Server stopped");
    Ok(())
}
