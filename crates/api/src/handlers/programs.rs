//! Handlers for the public `/programs` resource.

use axum::extract::{Query, State};
use axum::Json;
use axum_extra::extract::WithRejection;
use imi_core::program::clamp_popular_limit;
use imi_db::models::program::{PopularProgram, Program};
use imi_db::repositories::ProgramRepo;

use crate::error::{AppError, AppResult};
use crate::query::PopularParams;
use crate::state::AppState;

/// GET /api/programs
///
/// Active programs ordered by `display_order`.
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Program>>> {
    let programs = ProgramRepo::list_active(&state.pool).await?;
    Ok(Json(programs))
}

/// GET /api/programs/popular?limit=N
///
/// Active programs ranked by the number of enquiries naming them.
pub async fn popular(
    State(state): State<AppState>,
    WithRejection(Query(params), _): WithRejection<Query<PopularParams>, AppError>,
) -> AppResult<Json<Vec<PopularProgram>>> {
    let limit = clamp_popular_limit(params.limit);
    let programs = ProgramRepo::list_popular(&state.pool, limit).await?;
    Ok(Json(programs))
}
