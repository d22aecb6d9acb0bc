//! Handlers for the `/enquiries` resource.
//!
//! Creation is public (the website contact form); listing and status changes
//! require an admin session.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use axum_extra::extract::WithRejection;
use imi_core::enquiry::{EnquiryInput, StatusUpdateInput};
use imi_core::error::CoreError;
use imi_core::types::DbId;
use imi_db::models::enquiry::Enquiry;
use imi_db::repositories::EnquiryRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::RequireAdmin;
use crate::state::AppState;

/// POST /api/enquiries
///
/// Validate and store a contact-form submission, then notify the admissions
/// team in the background.
pub async fn create(
    State(state): State<AppState>,
    WithRejection(Json(input), _): WithRejection<Json<EnquiryInput>, AppError>,
) -> AppResult<(StatusCode, Json<Enquiry>)> {
    let new_enquiry = input.into_new_enquiry()?;
    let id = EnquiryRepo::create(&state.pool, &new_enquiry).await?;
    let enquiry = find_enquiry(&state, id).await?;

    tracing::info!(
        enquiry_id = enquiry.id,
        program = %enquiry.program,
        "New enquiry recorded"
    );
    state.notifier.notify(enquiry.clone());

    Ok((StatusCode::CREATED, Json(enquiry)))
}

/// GET /api/enquiries
///
/// All enquiries, newest first.
pub async fn list(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<Vec<Enquiry>>> {
    let enquiries = EnquiryRepo::list(&state.pool).await?;
    Ok(Json(enquiries))
}

/// PATCH /api/enquiries/{id}/status
pub async fn update_status(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    WithRejection(Path(id), _): WithRejection<Path<DbId>, AppError>,
    WithRejection(Json(input), _): WithRejection<Json<StatusUpdateInput>, AppError>,
) -> AppResult<Json<Enquiry>> {
    let status = input.into_status()?;

    if !EnquiryRepo::update_status(&state.pool, id, status).await? {
        return Err(not_found(id));
    }
    tracing::info!(enquiry_id = id, %status, admin = %admin.username, "Enquiry status updated");

    let enquiry = find_enquiry(&state, id).await?;
    Ok(Json(enquiry))
}

async fn find_enquiry(state: &AppState, id: DbId) -> AppResult<Enquiry> {
    EnquiryRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Enquiry",
        id,
    })
}
