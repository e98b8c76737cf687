pub mod account;
pub mod catalog;
pub mod employee;
pub mod health;
pub mod opportunity;
pub mod trash;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /opportunities                                  list (view + filters), create
/// /opportunities/validate                         color / percentage check (POST)
/// /opportunities/archive-sweep                    auto-archive sweep (POST, confirm)
/// /opportunities/{id}                             get, update, trash (DELETE, confirm)
/// /opportunities/{id}/archive                     move to history (POST, confirm)
/// /opportunities/{id}/unarchive                   back to active (POST, confirm)
/// /opportunities/{id}/observations                append note (POST)
/// /opportunities/{id}/observations/{index}        remove note (DELETE)
///
/// /trash                                          list, empty (DELETE, confirm)
/// /trash/{id}                                     permanent delete (DELETE, confirm)
/// /trash/{id}/restore                             restore to active (POST, confirm)
///
/// /catalogs                                       snapshot of every catalog
/// /catalogs/{kind}                                list, create
/// /catalogs/{kind}/{id}                           rename, delete
///
/// /accounts                                       list, create
/// /accounts/{id}                                  get, update
///
/// /employees                                      list, create
/// /employees/{id}                                 get, update
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/opportunities", opportunity::router())
        .nest("/trash", trash::router())
        .nest("/catalogs", catalog::router())
        .nest("/accounts", account::router())
        .nest("/employees", employee::router())
}
