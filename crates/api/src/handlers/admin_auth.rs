//! Handlers for admin login, logout and the current session user.

use axum::extract::State;
use axum::Json;
use axum_extra::extract::cookie::CookieJar;
use axum_extra::extract::WithRejection;
use chrono::Utc;
use imi_core::error::CoreError;
use imi_core::types::DbId;
use imi_db::models::session::CreateSession;
use imi_db::repositories::{AdminRepo, SessionRepo};
use serde::{Deserialize, Serialize};

use crate::auth::password::{check_password, hash_password, verify_against_dummy, PasswordCheck};
use crate::auth::session::{
    generate_session_token, hash_session_token, removal_cookie, session_cookie, SESSION_COOKIE,
};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::RequireAdmin;
use crate::response::SuccessResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /admin/login`.
#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// The signed-in admin as exposed to the client.
#[derive(Debug, Serialize)]
pub struct AdminUserInfo {
    pub username: String,
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub user: AdminUserInfo,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/admin/login
///
/// Verify credentials, open a session and set the session cookie.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    WithRejection(Json(input), _): WithRejection<Json<LoginRequest>, AppError>,
) -> AppResult<(CookieJar, Json<LoginResponse>)> {
    let username = input.username.unwrap_or_default();
    let password = input.password.unwrap_or_default();
    if username.trim().is_empty() || password.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Username and password required".into(),
        )));
    }

    let Some(admin) = AdminRepo::find_by_username(&state.pool, username.trim()).await? else {
        // Same bcrypt cost as a wrong password, so response time does not
        // reveal which usernames exist.
        let _ = tokio::task::spawn_blocking(move || verify_against_dummy(&password)).await;
        tracing::info!("Admin login rejected: unknown username");
        return Err(invalid_credentials());
    };

    let stored = admin.password.clone();
    let candidate = password.clone();
    let check = tokio::task::spawn_blocking(move || check_password(&candidate, &stored))
        .await
        .map_err(|e| AppError::InternalError(format!("Password check task failed: {e}")))?
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    match check {
        PasswordCheck::Mismatch => {
            tracing::info!(username = %admin.username, "Admin login rejected");
            return Err(invalid_credentials());
        }
        PasswordCheck::LegacyPlaintext => {
            upgrade_plaintext_password(&state, admin.id, password).await;
        }
        PasswordCheck::Hashed => {}
    }

    // A browser re-using an old cookie gets a fresh session.
    if let Some(old) = jar.get(SESSION_COOKIE) {
        SessionRepo::delete_by_token_hash(&state.pool, &hash_session_token(old.value())).await?;
    }

    let (token, token_hash) = generate_session_token();
    let session = SessionRepo::create(
        &state.pool,
        &CreateSession {
            token_hash,
            admin_id: admin.id,
            username: admin.username.clone(),
            name: admin.name.clone(),
            expires_at: Utc::now() + chrono::Duration::hours(state.config.session.ttl_hours),
        },
    )
    .await?;

    tracing::info!(
        admin_id = admin.id,
        username = %admin.username,
        expires_at = %session.expires_at,
        "Admin logged in"
    );

    let cookie = session_cookie(&token, &state.config.session)?;
    Ok((
        jar.add(cookie),
        Json(LoginResponse {
            success: true,
            user: AdminUserInfo {
                username: session.username,
                name: session.name,
            },
        }),
    ))
}

/// POST /api/admin/logout
///
/// Drop the session behind the cookie, if any, and clear the cookie.
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> AppResult<(CookieJar, Json<SuccessResponse>)> {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        let removed =
            SessionRepo::delete_by_token_hash(&state.pool, &hash_session_token(cookie.value()))
                .await?;
        if removed {
            tracing::info!("Admin logged out");
        }
    }

    Ok((jar.remove(removal_cookie()), Json(SuccessResponse::ok())))
}

/// GET /api/admin/user
pub async fn current_user(RequireAdmin(admin): RequireAdmin) -> Json<AdminUserInfo> {
    Json(AdminUserInfo {
        username: admin.username,
        name: admin.name,
    })
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn invalid_credentials() -> AppError {
    AppError::Core(CoreError::Unauthorized("Invalid credentials".into()))
}

/// Replace a plaintext password column with its bcrypt hash.
///
/// Failures are logged only; the login itself has already succeeded.
async fn upgrade_plaintext_password(state: &AppState, admin_id: DbId, password: String) {
    let hashed = match tokio::task::spawn_blocking(move || hash_password(&password)).await {
        Ok(Ok(hash)) => hash,
        Ok(Err(e)) => {
            tracing::warn!(admin_id, error = %e, "Failed to hash legacy password");
            return;
        }
        Err(e) => {
            tracing::warn!(admin_id, error = %e, "Password hashing task failed");
            return;
        }
    };

    match AdminRepo::update_password(&state.pool, admin_id, &hashed).await {
        Ok(_) => tracing::info!(admin_id, "Upgraded plaintext admin password to bcrypt"),
        Err(e) => tracing::warn!(admin_id, error = %e, "Failed to store upgraded password hash"),
    }
}
