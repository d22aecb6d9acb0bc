//! Route definitions for the `/enquiries` resource.

use axum::routing::{get, patch};
use axum::Router;

use crate::handlers::enquiries;
use crate::state::AppState;

/// Routes mounted at `/enquiries`.
///
/// ```text
/// POST  /                -> create (public)
/// GET   /                -> list (admin)
/// PATCH /{id}/status     -> update_status (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(enquiries::list).post(enquiries::create))
        .route("/{id}/status", patch(enquiries::update_status))
}
