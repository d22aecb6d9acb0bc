//! Admin handlers for the `/admin/programs` resource.
//!
//! Update is a full replacement. Delete is a soft delete (`is_active =
//! false`). Both remove the managed image file that the program stops
//! referencing.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use axum_extra::extract::WithRejection;
use imi_core::error::CoreError;
use imi_core::program::ProgramInput;
use imi_core::types::DbId;
use imi_db::models::program::Program;
use imi_db::repositories::ProgramRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::RequireAdmin;
use crate::query::IncludeInactiveParams;
use crate::response::SuccessResponse;
use crate::state::AppState;

/// GET /api/admin/programs?include_inactive=true
pub async fn list_all(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    WithRejection(Query(params), _): WithRejection<Query<IncludeInactiveParams>, AppError>,
) -> AppResult<Json<Vec<Program>>> {
    let programs = ProgramRepo::list(&state.pool, params.include_inactive).await?;
    Ok(Json(programs))
}

/// POST /api/admin/programs
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    WithRejection(Json(input), _): WithRejection<Json<ProgramInput>, AppError>,
) -> AppResult<(StatusCode, Json<Program>)> {
    let new_program = input.into_new_program()?;
    let id = ProgramRepo::create(&state.pool, &new_program).await?;
    let program = find_program(&state, id).await?;

    tracing::info!(program_id = id, title = %program.title, admin = %admin.username, "Program created");
    Ok((StatusCode::CREATED, Json(program)))
}

/// PUT /api/admin/programs/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    WithRejection(Path(id), _): WithRejection<Path<DbId>, AppError>,
    WithRejection(Json(input), _): WithRejection<Json<ProgramInput>, AppError>,
) -> AppResult<Json<Program>> {
    let new_program = input.into_new_program()?;
    let existing = find_program(&state, id).await?;

    if !ProgramRepo::replace(&state.pool, id, &new_program).await? {
        return Err(not_found(id));
    }

    if let Some(old_image) = existing.image.as_deref() {
        if new_program.image.as_deref() != Some(old_image) {
            state.images.remove_by_url(old_image).await;
        }
    }

    let program = find_program(&state, id).await?;
    tracing::info!(program_id = id, admin = %admin.username, "Program updated");
    Ok(Json(program))
}

/// DELETE /api/admin/programs/{id}
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    WithRejection(Path(id), _): WithRejection<Path<DbId>, AppError>,
) -> AppResult<Json<SuccessResponse>> {
    let existing = find_program(&state, id).await?;

    if !ProgramRepo::deactivate(&state.pool, id).await? {
        return Err(not_found(id));
    }
    if let Some(image) = existing.image.as_deref() {
        state.images.remove_by_url(image).await;
    }

    tracing::info!(program_id = id, admin = %admin.username, "Program deactivated");
    Ok(Json(SuccessResponse::ok()))
}

async fn find_program(state: &AppState, id: DbId) -> AppResult<Program> {
    ProgramRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Program",
        id,
    })
}
