mod core;
mod features;
mod shared;

use crate::core::config::{CatalogConfig, Config};
use crate::core::middleware;
use crate::core::openapi::{ApiDoc, SwaggerInfoModifier};
use crate::features::offices::{OfficeDirectory, OfficeDirectoryError};
use crate::features::reports::models::{CatalogError, ChargeCatalog};
use crate::features::reports::{routes as reports_routes, DraftService, MailRenderer};
use crate::shared::templates::TemplateEngine;
use axum::{extract::DefaultBodyLimit, middleware::from_fn, Router};
use std::sync::Arc;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::Modify;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

fn main() -> anyhow::Result<()> {
    // Build Tokio runtime with configurable worker threads
    let worker_threads = worker_threads(std::env::var("TOKIO_WORKER_THREADS").ok().as_deref());

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(worker_threads)
        .enable_all()
        .build()?;

    runtime.block_on(async_main(worker_threads))
}

async fn async_main(worker_threads: usize) -> anyhow::Result<()> {
    // Load .env file BEFORE initializing logger so RUST_LOG is available
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;

    tracing::info!(
        "System info: tokio_worker_threads={}, pid={}",
        worker_threads,
        std::process::id()
    );
    tracing::info!("Configuration loaded successfully");

    let catalog = load_charge_catalog(&config.catalog)
        .map_err(|e| anyhow::anyhow!("Failed to load charge catalog: {}", e))?;
    let offices = load_office_directory(&config.catalog)
        .map_err(|e| anyhow::anyhow!("Failed to load office directory: {}", e))?;
    if offices.is_empty() {
        tracing::warn!("Office directory is empty; no report can be submitted");
    }
    tracing::info!(
        "Charge catalog loaded: {} charges, {} durations",
        catalog.charges().len(),
        catalog.durations().len()
    );
    tracing::info!("Office directory loaded: {} offices", offices.len());

    let templates = TemplateEngine::bundled()
        .map_err(|e| anyhow::anyhow!("Failed to load mail templates: {}", e))?;

    let draft_service = Arc::new(DraftService::new(
        Arc::new(catalog),
        Arc::new(offices),
        MailRenderer::new(templates).with_timezone(config.reports.mail_timezone),
    )
    .with_max_drafts(config.reports.max_drafts));
    tracing::info!(
        "Draft service initialized: max_drafts={}, mail_timezone={}",
        config.reports.max_drafts,
        config.reports.mail_timezone
    );

    // Build application router with dynamic swagger config
    let swagger_modifier = SwaggerInfoModifier {
        title: config.swagger.title.clone(),
        version: config.swagger.version.clone(),
        description: config.swagger.description.clone(),
    };

    let mut openapi = ApiDoc::openapi();
    swagger_modifier.modify(&mut openapi);

    let swagger = if let Some(credentials) = config.swagger.credentials() {
        tracing::info!("Swagger UI basic auth enabled");
        Router::new()
            .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
            .layer(from_fn(middleware::basic_auth_middleware(Arc::new(
                credentials,
            ))))
    } else {
        tracing::info!("Swagger UI basic auth disabled (no credentials configured)");
        Router::new().merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
    };

    async fn health_check() -> axum::http::StatusCode {
        axum::http::StatusCode::OK
    }
    let health_route = Router::new().route("/health", axum::routing::get(health_check));

    let app = Router::new()
        .merge(swagger)
        .merge(reports_routes::routes(draft_service))
        .merge(health_route)
        .layer(DefaultBodyLimit::max(config.app.max_request_body_size))
        .layer(middleware::cors_layer(
            config.app.cors_allowed_origins.clone(),
        ))
        // Propagate X-Request-Id to response headers
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(middleware::MakeSpanWithRequestId)
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // Generate X-Request-Id using UUID v7 (or use client-provided one)
        .layer(SetRequestIdLayer::x_request_id(middleware::MakeRequestUuid));

    let addr = config.app.server_address();
    let socket_addr: std::net::SocketAddr = addr
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid address: {}", e))?;

    // Use socket2 for TCP listener configuration
    let socket = socket2::Socket::new(
        socket2::Domain::for_address(socket_addr),
        socket2::Type::STREAM,
        Some(socket2::Protocol::TCP),
    )?;
    socket.set_reuse_address(true)?;
    socket.set_nodelay(true)?;

    #[cfg(target_os = "linux")]
    {
        let keepalive = socket2::TcpKeepalive::new()
            .with_time(std::time::Duration::from_secs(60))
            .with_interval(std::time::Duration::from_secs(10))
            .with_retries(3);
        socket.set_tcp_keepalive(&keepalive)?;
    }
    #[cfg(not(target_os = "linux"))]
    {
        let keepalive = socket2::TcpKeepalive::new().with_time(std::time::Duration::from_secs(60));
        socket.set_tcp_keepalive(&keepalive)?;
    }

    socket.set_nonblocking(true)?;
    socket.bind(&socket_addr.into())?;
    socket.listen(1024)?;

    let listener = tokio::net::TcpListener::from_std(socket.into())?;
    tracing::info!("Server listening on {}", format!("http://{}", addr));
    tracing::info!(
        "Swagger UI available at {}",
        format!("http://{}/swagger-ui/", addr)
    );

    axum::serve(listener, app).await?;

    Ok(())
}

/// Worker thread count; zero or unparsable values fall back to the CPU count
fn worker_threads(configured: Option<&str>) -> usize {
    configured
        .and_then(|s| s.trim().parse::<usize>().ok())
        .filter(|&n| n > 0)
        .unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|p| p.get())
                .unwrap_or(4)
        })
}

/// Load the charge catalog, preferring the configured file
fn load_charge_catalog(config: &CatalogConfig) -> Result<ChargeCatalog, CatalogError> {
    match &config.charges_path {
        Some(path) => {
            tracing::info!("Loading charge catalog from {}", path.display());
            ChargeCatalog::from_path(path)
        }
        None => ChargeCatalog::bundled(),
    }
}

/// Load the office directory, preferring the configured file
fn load_office_directory(config: &CatalogConfig) -> Result<OfficeDirectory, OfficeDirectoryError> {
    match &config.offices_path {
        Some(path) => {
            tracing::info!("Loading office directory from {}", path.display());
            OfficeDirectory::from_path(path)
        }
        None => OfficeDirectory::bundled(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_worker_threads_ignores_zero() {
        assert_eq!(worker_threads(Some("3")), 3);
        assert!(worker_threads(Some("0")) > 0);
        assert!(worker_threads(Some("lots")) > 0);
        assert!(worker_threads(None) > 0);
    }
}
