pub mod admin;
pub mod enquiries;
pub mod health;
pub mod programs;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /programs                          list active (public)
/// /programs/popular                  ranked by enquiries (public)
///
/// /enquiries                         create (public), list (admin)
/// /enquiries/{id}/status             update status (admin)
///
/// /admin/login                       login (public)
/// /admin/logout                      logout
/// /admin/user                        current session user (admin)
/// /admin/programs                    list, create (admin)
/// /admin/programs/{id}               replace, soft delete (admin)
/// /admin/upload/program-image        multipart image upload (admin)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/programs", programs::router())
        .nest("/enquiries", enquiries::router())
        .nest("/admin", admin::router())
}
