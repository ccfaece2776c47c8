//! Health check handlers.

use axum::{Json, extract::State, http::StatusCode};
use serde_json::{Value, json};

use crate::api::state::AppState;
use crate::error::{AppError, ErrorCode, Result};
use crate::service::Person;

/// Liveness probe - always returns 200 if the service is running.
pub async fn health() -> Json<Value> {
    Json(json!({
        "code": 0,
        "message": "success",
        "data": {
            "status": "healthy",
            "version": env!("CARGO_PKG_VERSION")
        }
    }))
}

/// Readiness probe - checks that the default locale's datasets load.
pub async fn ready(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let locale = state.config.generator.default_locale;
    let datasets_ok = state.loader.load(locale, Person::DATASET).is_ok();

    let status_code = if datasets_ok {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let response = Json(json!({
        "code": if datasets_ok { 0 } else { ErrorCode::SERVICE_UNAVAILABLE.as_i32() },
        "message": if datasets_ok { "success" } else { "service unavailable" },
        "data": {
            "ready": datasets_ok,
            "components": {
                "datasets": datasets_ok
            }
        }
    }));

    (status_code, response)
}

/// Prometheus metrics endpoint.
///
/// # Errors
///
/// Returns [`AppError::NotFound`] when metrics are disabled.
pub async fn metrics(State(state): State<AppState>) -> Result<String> {
    if !state.config.observability.metrics_enabled {
        return Err(AppError::NotFound("metrics are disabled".to_string()));
    }
    Ok(state.metrics.render())
}
