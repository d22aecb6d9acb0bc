//! Admin credential model and DTOs.

use imi_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `admins` table. Never serialized: it carries the
/// password column.
#[derive(Debug, Clone, FromRow)]
pub struct Admin {
    pub id: DbId,
    pub username: String,
    /// bcrypt hash, or plaintext for rows that predate hashing.
    pub password: String,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new admin.
#[derive(Debug, Clone)]
pub struct CreateAdmin {
    pub username: String,
    pub password_hash: String,
    pub name: String,
}
