//! Route definitions for the `/admin` area.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post, put};
use axum::Router;
use imi_core::program_image::MAX_UPLOAD_BYTES;

use crate::handlers::{admin_auth, admin_programs, uploads};
use crate::state::AppState;

/// Headroom over [`MAX_UPLOAD_BYTES`] for multipart framing.
const MULTIPART_OVERHEAD_BYTES: usize = 1024 * 1024;

/// Routes mounted at `/admin`.
///
/// ```text
/// POST   /login                  -> login
/// POST   /logout                 -> logout
/// GET    /user                   -> current_user
/// GET    /programs               -> list_all
/// POST   /programs               -> create
/// PUT    /programs/{id}          -> update
/// DELETE /programs/{id}          -> delete
/// POST   /upload/program-image   -> upload_program_image
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(admin_auth::login))
        .route("/logout", post(admin_auth::logout))
        .route("/user", get(admin_auth::current_user))
        .route(
            "/programs",
            get(admin_programs::list_all).post(admin_programs::create),
        )
        .route(
            "/programs/{id}",
            put(admin_programs::update).delete(admin_programs::delete),
        )
        .route(
            "/upload/program-image",
            post(uploads::upload_program_image)
                .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES + MULTIPART_OVERHEAD_BYTES)),
        )
}
