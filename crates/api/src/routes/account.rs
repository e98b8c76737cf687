//! Route definitions for accounts, mounted at `/accounts`.

use axum::routing::get;
use axum::Router;

use crate::handlers::account;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(account::list).post(account::create))
        .route("/{id}", get(account::get_by_id).put(account::update))
}
