//! Route definitions for catalogs, mounted at `/catalogs`.
//!
//! `{kind}` is one of `statuses`, `document-types`, `opportunity-types`,
//! `job-roles` or `motives`.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::catalog;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(catalog::snapshot))
        .route("/{kind}", get(catalog::list).post(catalog::create))
        .route("/{kind}/{id}", put(catalog::update).delete(catalog::delete))
}
