pub mod auth;
pub mod presentations;

use std::time::Duration;

use axum::routing::get;
use axum::Json;
use axum::Router;
use serde_json::json;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Generation can sit on two sequential provider calls, so the request
/// budget is generous; anything past it fails rather than hanging.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Assemble the full application router. Shared by `main` and the
/// integration tests.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(auth::router())
        .merge(presentations::router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
        .with_state(state)
}

/// GET /health — liveness probe
async fn health() -> Json<serde_json::Value> {
    Json(json!({
        "status": "healthy",
        "service": "slidecraft",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
