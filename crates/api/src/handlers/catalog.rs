//! Handlers for the flat named catalogs and the combined snapshot.
//!
//! The `{kind}` path segment selects the catalog table; unknown kinds are
//! rejected before touching the database.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use oppboard_core::catalog::CatalogKind;
use oppboard_core::error::CoreError;
use oppboard_core::types::DbId;
use oppboard_db::models::catalog::SaveNamedEntry;
use oppboard_db::repositories::{CatalogSnapshotRepo, NamedCatalogRepo};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

fn parse_kind(slug: &str) -> AppResult<CatalogKind> {
    slug.parse().map_err(AppError::BadRequest)
}

fn not_found(kind: CatalogKind, id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: kind.entity(),
        id,
    })
}

/// GET /api/v1/catalogs
///
/// Every catalog in one payload, inactive entries included so existing
/// references keep resolving.
pub async fn snapshot(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let snapshot = CatalogSnapshotRepo::load(&state.pool).await?;
    Ok(Json(DataResponse { data: snapshot }))
}

/// GET /api/v1/catalogs/{kind}
pub async fn list(
    State(state): State<AppState>,
    Path(kind): Path<String>,
) -> AppResult<impl IntoResponse> {
    let kind = parse_kind(&kind)?;
    let entries = NamedCatalogRepo::list(&state.pool, kind).await?;
    Ok(Json(DataResponse { data: entries }))
}

/// POST /api/v1/catalogs/{kind}
pub async fn create(
    State(state): State<AppState>,
    Path(kind): Path<String>,
    Json(input): Json<SaveNamedEntry>,
) -> AppResult<impl IntoResponse> {
    let kind = parse_kind(&kind)?;
    input.validate()?;
    let entry = NamedCatalogRepo::create(&state.pool, kind, &input).await?;

    tracing::info!(%kind, id = entry.id, name = %entry.name, "Catalog entry created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: entry })))
}

/// PUT /api/v1/catalogs/{kind}/{id}
pub async fn update(
    State(state): State<AppState>,
    Path((kind, id)): Path<(String, DbId)>,
    Json(input): Json<SaveNamedEntry>,
) -> AppResult<impl IntoResponse> {
    let kind = parse_kind(&kind)?;
    input.validate()?;
    let entry = NamedCatalogRepo::update(&state.pool, kind, id, &input)
        .await?
        .ok_or_else(|| not_found(kind, id))?;

    tracing::info!(%kind, id, name = %entry.name, "Catalog entry renamed");

    Ok(Json(DataResponse { data: entry }))
}

/// DELETE /api/v1/catalogs/{kind}/{id}
///
/// Opportunities pointing at a removed entry keep the dangling id and
/// render a stale label. Statuses still in use are refused by the store.
pub async fn delete(
    State(state): State<AppState>,
    Path((kind, id)): Path<(String, DbId)>,
) -> AppResult<StatusCode> {
    let kind = parse_kind(&kind)?;
    if !NamedCatalogRepo::delete(&state.pool, kind, id).await? {
        return Err(not_found(kind, id));
    }

    tracing::info!(%kind, id, "Catalog entry deleted");

    Ok(StatusCode::NO_CONTENT)
}
