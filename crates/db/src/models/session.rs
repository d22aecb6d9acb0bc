//! Admin session model and DTOs.

use imi_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `admin_sessions` table.
#[derive(Debug, Clone, FromRow)]
pub struct AdminSession {
    pub id: DbId,
    pub token_hash: String,
    pub admin_id: DbId,
    pub username: String,
    pub name: String,
    pub expires_at: Timestamp,
    pub created_at: Timestamp,
}

/// DTO for creating a new admin session.
pub struct CreateSession {
    pub token_hash: String,
    pub admin_id: DbId,
    pub username: String,
    pub name: String,
    pub expires_at: Timestamp,
}
