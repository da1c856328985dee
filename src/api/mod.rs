//! API module
//!
//! HTTP endpoints consumed by the dashboard frontend. Authentication is
//! handled by an external provider in front of this service; no auth
//! middleware lives here.

pub mod routes;

pub use routes::{create_router, AppState};

use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Build the full application router.
// Axum layers run bottom-up: trace wraps CORS wraps the handlers.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", axum::routing::get(health_check))
        .nest("/api/v1", routes::create_router())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
