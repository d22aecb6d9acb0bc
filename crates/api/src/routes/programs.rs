//! Route definitions for the public `/programs` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::programs;
use crate::state::AppState;

/// Routes mounted at `/programs`.
///
/// ```text
/// GET /          -> list
/// GET /popular   -> popular
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(programs::list))
        .route("/popular", get(programs::popular))
}
