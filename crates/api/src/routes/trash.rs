//! Route definitions for the trash bin, mounted at `/trash`.
//!
//! ```text
//! GET    /                list
//! DELETE /                empty
//! DELETE /{id}            purge_one
//! POST   /{id}/restore    restore
//! ```

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::trash;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(trash::list).delete(trash::empty))
        .route("/{id}", delete(trash::purge_one))
        .route("/{id}/restore", post(trash::restore))
}
