//! HTTP/WebSocket API for the hangman server.
//!
//! # Endpoints
//!
//! - `GET /ws` - Establish a WebSocket connection; one game session per connection
//! - `GET /health` - Server health status
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use hangman::{SessionConfig, SessionManager};
//! use hm_server::api::{AppState, create_router};
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let session_manager = Arc::new(SessionManager::new(SessionConfig::default(), 100)?);
//! let app = create_router(AppState { session_manager });
//!
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:4000").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # CORS
//!
//! CORS is configured permissively so a page served from another origin can
//! open the socket.

pub mod rate_limiter;
pub mod request_id;
pub mod websocket;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
};
use hangman::SessionManager;
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

/// Application state shared across all HTTP handlers and WebSocket connections.
#[derive(Clone)]
pub struct AppState {
    pub session_manager: Arc<SessionManager>,
}

/// Create the API router with all endpoints and middleware.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/ws", get(websocket::websocket_handler))
        .layer(axum::middleware::from_fn(request_id::request_id_middleware))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check endpoint for monitoring and load balancers.
///
/// Returns `503 Service Unavailable` once the session limit is reached, since
/// new connections would be turned away.
///
/// ```bash
/// curl http://localhost:4000/health
/// # {"status":"healthy","sessions":{"active":0,"max":1000},"timestamp":"..."}
/// ```
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let active = state.session_manager.session_count().await;
    let max = state.session_manager.max_sessions();
    let healthy = active < max;

    let status_code = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let response = json!({
        "status": if healthy { "healthy" } else { "full" },
        "version": env!("CARGO_PKG_VERSION"),
        "sessions": {
            "active": active,
            "max": max,
        },
        "timestamp": chrono::Utc::now().to_rfc3339(),
    });

    (status_code, Json(response))
}
