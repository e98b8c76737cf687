use axum::routing::get;
use axum::Router;

use crate::handlers::employee;
use crate::state::AppState;

/// Employee routes, mounted at `/employees`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(employee::list).post(employee::create))
        .route("/{id}", get(employee::get_by_id).put(employee::update))
}
