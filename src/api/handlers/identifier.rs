//! Identifier catalog handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use tracing::debug;

use crate::api::state::AppState;
use crate::domain::{
    ApiResponse, CatalogEntry, CatalogResponse, IdentifierQuery, IdentifierResponse,
};
use crate::error::{AppError, GenResult, Result};
use crate::random::RandomSource;
use crate::service::catalog::{self, CATALOG, IdentifierKind};

/// List the identifier catalog and every schema field name.
pub async fn catalog(State(state): State<AppState>) -> Json<ApiResponse<CatalogResponse>> {
    let identifiers = CATALOG.iter().map(CatalogEntry::from).collect();
    let fields = state.registry.names().map(ToString::to_string).collect();

    Json(ApiResponse::success(CatalogResponse {
        identifiers,
        fields,
    }))
}

/// Generate identifiers of one catalog kind.
///
/// # Errors
///
/// Returns [`AppError::NotFound`] for a name outside the catalog, a bad
/// request for invalid query options, and generation errors.
pub async fn generate_identifier(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Query(query): Query<IdentifierQuery>,
) -> Result<Json<ApiResponse<IdentifierResponse>>> {
    let kind: IdentifierKind = name
        .parse()
        .map_err(|_| AppError::NotFound(format!("identifier '{name}'")))?;

    let generator = &state.config.generator;
    query
        .validate(generator.max_count)
        .map_err(AppError::BadRequest)?;
    let options = query.to_options(
        kind,
        generator.default_locale,
        generator.checksum_max_attempts,
    )?;

    let mut rng = RandomSource::new(query.seed);
    let values = (0..query.count)
        .map(|_| catalog::generate(kind, &mut rng, &options))
        .collect::<GenResult<Vec<_>>>()?;

    debug!(kind = %kind, count = values.len(), seed = ?query.seed, "Identifiers generated");
    state.record_generated(kind.name(), values.len());

    Ok(Json(ApiResponse::success(IdentifierResponse {
        name: kind.name().to_string(),
        seed: query.seed,
        values,
    })))
}
