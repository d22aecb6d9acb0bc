//! Session-cookie authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::cookie::CookieJar;
use imi_core::error::CoreError;
use imi_core::types::DbId;
use imi_db::repositories::SessionRepo;

use crate::auth::session::{hash_session_token, SESSION_COOKIE};
use crate::error::AppError;
use crate::state::AppState;

/// The admin behind an active session.
#[derive(Debug, Clone)]
pub struct SessionUser {
    pub admin_id: DbId,
    pub username: String,
    pub name: String,
    /// SHA-256 hash of the cookie token, used to revoke the session.
    pub token_hash: String,
}

/// Requires an active admin session.
///
/// Resolves the `imi_session` cookie against `admin_sessions`; a missing,
/// unknown or expired token is rejected with 401.
///
/// ```ignore
/// async fn admin_only(RequireAdmin(admin): RequireAdmin) -> AppResult<Json<()>> {
///     tracing::info!(username = %admin.username, "admin action");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct RequireAdmin(pub SessionUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let token = jar
            .get(SESSION_COOKIE)
            .map(|c| c.value().to_string())
            .filter(|v| !v.is_empty())
            .ok_or_else(unauthenticated)?;

        let token_hash = hash_session_token(&token);
        let session = SessionRepo::find_active(&state.pool, &token_hash)
            .await?
            .ok_or_else(unauthenticated)?;

        Ok(RequireAdmin(SessionUser {
            admin_id: session.admin_id,
            username: session.username,
            name: session.name,
            token_hash,
        }))
    }
}

fn unauthenticated() -> AppError {
    AppError::Core(CoreError::Unauthorized("Authentication required".into()))
}
