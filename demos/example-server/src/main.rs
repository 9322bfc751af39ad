use anyhow::Context;
use axum::{Router, routing::get};
use exception_status::prelude::*;
use tower_http::trace::TraceLayer;

mod errors;

use errors::{BadRequestError, NotFoundError, TimeoutError};

async fn throw_bad_request() -> Result<&'static str, Exception> {
    Err(BadRequestError("missing query".to_string()).into())
}

async fn throw_not_found() -> Result<&'static str, Exception> {
    Err(NotFoundError("user 42".to_string()).into())
}

async fn throw_timeout() -> Result<&'static str, Exception> {
    Err(TimeoutError(3000).into())
}

fn layer_config() -> anyhow::Result<ExceptionLayerConfig> {
    match std::env::var("EXCEPTION_LAYER_CONFIG") {
        Ok(raw) => serde_json::from_str(&raw).context("EXCEPTION_LAYER_CONFIG is not valid JSON"),
        Err(_) => Ok(ExceptionLayerConfig::default()),
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    tracing::info!("Starting Example Server...");

    // 1. Declare transformations
    let transformations = TransformationCollectionBuilder::new()
        .declare_status(404)
        .map_type::<NotFoundError>()
        .declare_status(400)
        .map_type::<BadRequestError>()
        .transformations();

    // 2. Build the filter chain
    let filter = StatusCodeExceptionFilter::new(Some(transformations))?;
    let exceptions = ExceptionFilterLayer::new()
        .filter(filter)
        .with_config(layer_config()?);

    // 3. Create Router
    let router = Router::new()
        .route("/throw-bad-request", get(throw_bad_request))
        .route("/throw-not-found", get(throw_not_found))
        .route("/throw-timeout", get(throw_timeout))
        .layer(exceptions)
        .layer(TraceLayer::new_for_http());

    // 4. Start server with graceful shutdown
    let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("{}:{}", host, port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("Server running on http://{}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}
