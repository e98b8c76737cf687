//! Route definitions for opportunities.
//!
//! Mounted at `/opportunities`.
//!
//! ```text
//! GET    /                                list
//! POST   /                                create
//! POST   /validate                        validate_color
//! POST   /archive-sweep                   archive_sweep
//! GET    /{id}                            get_by_id
//! PUT    /{id}                            update
//! DELETE /{id}                            trash
//! POST   /{id}/archive                    archive
//! POST   /{id}/unarchive                  unarchive
//! POST   /{id}/observations               add_observation
//! DELETE /{id}/observations/{index}       remove_observation
//! ```

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::opportunity;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(opportunity::list).post(opportunity::create))
        .route("/validate", post(opportunity::validate_color))
        .route("/archive-sweep", post(opportunity::archive_sweep))
        .route(
            "/{id}",
            get(opportunity::get_by_id)
                .put(opportunity::update)
                .delete(opportunity::trash),
        )
        .route("/{id}/archive", post(opportunity::archive))
        .route("/{id}/unarchive", post(opportunity::unarchive))
        .route("/{id}/observations", post(opportunity::add_observation))
        .route(
            "/{id}/observations/{index}",
            delete(opportunity::remove_observation),
        )
}
