//! Opaque admin session tokens and the cookie that carries them.
//!
//! The plaintext token only ever lives in the browser cookie; the database
//! stores its SHA-256 hash so a leaked table cannot be replayed.

use axum_extra::extract::cookie::Cookie;
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::config::SessionConfig;
use crate::error::{AppError, AppResult};

/// Name of the admin session cookie.
pub const SESSION_COOKIE: &str = "imi_session";

/// Generate a random session token.
///
/// Returns a tuple of `(plaintext_token, sha256_hex_hash)`.
pub fn generate_session_token() -> (String, String) {
    let plaintext = format!("{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple());
    let hash = hash_session_token(&plaintext);
    (plaintext, hash)
}

/// Compute the SHA-256 hex digest of a session token.
pub fn hash_session_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Build the `Set-Cookie` value that installs a session token.
pub fn session_cookie(token: &str, config: &SessionConfig) -> AppResult<Cookie<'static>> {
    let secure = if config.cookie_secure { "; Secure" } else { "" };
    let raw = format!(
        "{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}{secure}",
        config.max_age_secs()
    );
    Cookie::parse(raw).map_err(|e| AppError::InternalError(format!("Session cookie error: {e}")))
}

/// A cookie matching the session cookie's name and path, for removal.
pub fn removal_cookie() -> Cookie<'static> {
    let mut cookie = Cookie::from(SESSION_COOKIE);
    cookie.set_path("/");
    cookie
}
