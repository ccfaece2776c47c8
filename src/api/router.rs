//! Router setup and configuration.

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::api::handlers::{health, identifier, schema};
use crate::api::state::AppState;

/// Create the main application router.
pub fn create_router(state: AppState) -> Router {
    // Health and metrics routes
    let health_routes = Router::new()
        .route("/health", get(health::health))
        .route("/ready", get(health::ready))
        .route("/metrics", get(health::metrics));

    // Generation routes
    let generation_routes = Router::new()
        .route("/catalog", get(identifier::catalog))
        .route("/identifier/{name}", get(identifier::generate_identifier))
        .route("/schema", post(schema::create_schema));

    Router::new()
        .merge(health_routes)
        .nest("/v1", generation_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
