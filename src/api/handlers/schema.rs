//! Schema handlers.

use std::sync::Arc;

use axum::{Json, extract::State};
use tracing::debug;

use crate::api::state::AppState;
use crate::domain::{ApiResponse, SchemaRequest, SchemaResponse};
use crate::error::{AppError, Result};
use crate::locale::Locale;
use crate::service::{FieldSpec, Schema, Session};

/// Generate records from a list of fields.
///
/// # Errors
///
/// Returns a bad request for an invalid body or unknown field names, and
/// generation errors.
pub async fn create_schema(
    State(state): State<AppState>,
    Json(req): Json<SchemaRequest>,
) -> Result<Json<ApiResponse<SchemaResponse>>> {
    let generator = &state.config.generator;
    req.validate(generator.max_count)
        .map_err(AppError::BadRequest)?;

    let locale = req
        .locale
        .as_deref()
        .map(str::parse::<Locale>)
        .transpose()?
        .unwrap_or(generator.default_locale);
    let iterations = usize::try_from(req.iterations)
        .map_err(|_| AppError::BadRequest("iterations out of range".to_string()))?;

    let field_names: Vec<String> = req.fields.iter().map(|f| f.field.clone()).collect();
    let fields: Vec<FieldSpec> = req.fields.into_iter().map(FieldSpec::from).collect();
    let schema = Schema::new(&state.registry, fields)?;

    let mut session = Session::new(
        req.seed,
        locale,
        Arc::clone(&state.loader),
        generator.checksum_max_attempts,
    );
    let records = schema.create(&mut session, iterations)?;

    debug!(%locale, records = records.len(), seed = ?req.seed, "Schema generated");
    for field in &field_names {
        state.record_generated(field, records.len());
    }

    Ok(Json(ApiResponse::success(SchemaResponse {
        seed: req.seed,
        records,
    })))
}
