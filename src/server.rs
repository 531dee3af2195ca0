//! HTTP server

use std::net::SocketAddr;

use anyhow::Result;
use axum::{
    http::{header, HeaderValue, Method},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::routes;
use crate::state::SharedState;

/// Assemble every route with CORS and request tracing.
pub fn build_router(state: SharedState) -> Router {
    let cors = cors_layer(&state.config.allowed_origins);

    Router::new()
        .merge(routes::health_routes())
        .merge(routes::auth_routes())
        .merge(routes::profile_routes())
        .merge(routes::chat_routes(state.config.max_upload_bytes))
        .merge(routes::subject_routes())
        .merge(routes::cache_routes())
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("[Server] Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
}

/// Bind and serve until ctrl-c.
pub async fn serve(state: SharedState) -> Result<()> {
    let addr: SocketAddr = state.config.bind_address.parse()?;
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("[Server] Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("[Server] Shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("[Server] Failed to listen for ctrl-c: {}", e);
        std::future::pending::<()>().await;
    }
}
