//! Route configuration, service wiring, and server startup.

use crate::handlers;
use crate::state::AppState;
use anyhow::Result;
use axum::{http::Method, routing::post, Router};
use intake_core::{AdmissionPolicy, Config};
use intake_storage::S3CredentialIssuer;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Build the application state: admission policy plus the S3 issuer.
pub async fn initialize_state(config: &Config) -> Result<Arc<AppState>> {
    let issuer = S3CredentialIssuer::new(
        config.upload_bucket.clone(),
        config.s3_region.clone(),
        config.s3_endpoint.clone(),
    )
    .await
    .map_err(|e| anyhow::anyhow!("Failed to initialize credential issuer: {}", e))?;

    tracing::info!(
        bucket = %config.upload_bucket,
        region = %config.s3_region,
        endpoint = ?config.s3_endpoint,
        "Credential issuer initialized"
    );

    Ok(Arc::new(AppState {
        policy: AdmissionPolicy::from_config(config),
        issuer: Arc::new(issuer),
    }))
}

/// Setup all application routes
///
/// The CORS layer answers OPTIONS preflight requests itself with the fixed
/// header set; preflights never reach a handler.
pub fn setup_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/uploads", post(handlers::upload::request_upload_urls))
        .route("/uploads/confirm", post(handlers::confirm::confirm_upload))
        .layer(setup_cors())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn setup_cors() -> CorsLayer {
    // Wildcard origin is the contract here: callers are static frontends on
    // arbitrary hosts and the shared secret is the actual gate.
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers(Any)
}

/// Start the server with graceful shutdown
pub async fn start_server(config: &Config, app: Router) -> Result<()> {
    let addr = format!("0.0.0.0:{}", config.server_port);
    tracing::info!(addr = %addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!(
        max_files = config.max_files_per_request,
        url_expiration_secs = config.url_expiration_secs,
        allowed_extensions = %config.allowed_extensions.join(","),
        "Server ready and accepting connections"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Signal handler for graceful shutdown
///
/// Listens for Ctrl+C (SIGINT) and SIGTERM signals to initiate graceful
/// shutdown.
///
/// # Panics
/// Panics if a signal handler cannot be installed (unrecoverable system
/// error).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            tracing::info!("Received terminate signal");
        },
    }

    tracing::info!("Shutting down gracefully...");
}
