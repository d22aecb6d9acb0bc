//! First-run admin account creation from the environment.

use imi_db::models::admin::CreateAdmin;
use imi_db::repositories::AdminRepo;
use sqlx::PgPool;

use crate::auth::password::hash_password;
use crate::error::{AppError, AppResult};

/// Display name used when `ADMIN_NAME` is not set.
pub const DEFAULT_ADMIN_NAME: &str = "Administrator";

/// Admin account requested through the environment.
#[derive(Debug, Clone)]
pub struct AdminBootstrap {
    pub username: String,
    pub password: String,
    pub name: String,
}

impl AdminBootstrap {
    /// Read the bootstrap account.
    ///
    /// | Env Var          | Default         |
    /// |------------------|-----------------|
    /// | `ADMIN_USERNAME` | none (skip)     |
    /// | `ADMIN_PASSWORD` | none (skip)     |
    /// | `ADMIN_NAME`     | `Administrator` |
    pub fn from_env() -> Option<Self> {
        let username = std::env::var("ADMIN_USERNAME")
            .ok()
            .map(|u| u.trim().to_string())
            .filter(|u| !u.is_empty())?;
        let password = std::env::var("ADMIN_PASSWORD")
            .ok()
            .filter(|p| !p.is_empty())?;
        let name = std::env::var("ADMIN_NAME").unwrap_or_else(|_| DEFAULT_ADMIN_NAME.to_string());
        Some(Self {
            username,
            password,
            name,
        })
    }

    /// Create the account unless the username is already taken.
    ///
    /// Returns `true` when a new admin row was inserted.
    pub async fn ensure(&self, pool: &PgPool) -> AppResult<bool> {
        if AdminRepo::find_by_username(pool, &self.username).await?.is_some() {
            tracing::debug!(username = %self.username, "Bootstrap admin already exists");
            return Ok(false);
        }

        let password = self.password.clone();
        let password_hash = tokio::task::spawn_blocking(move || hash_password(&password))
            .await
            .map_err(|e| AppError::InternalError(format!("Password hashing task failed: {e}")))?
            .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

        let admin = AdminRepo::create(
            pool,
            &CreateAdmin {
                username: self.username.clone(),
                password_hash,
                name: self.name.clone(),
            },
        )
        .await?;

        tracing::info!(admin_id = admin.id, username = %admin.username, "Bootstrap admin created");
        Ok(true)
    }
}

/// Run [`AdminBootstrap::ensure`] when the environment requests an account.
pub async fn ensure_admin_from_env(pool: &PgPool) -> AppResult<bool> {
    match AdminBootstrap::from_env() {
        Some(bootstrap) => bootstrap.ensure(pool).await,
        None => {
            tracing::debug!("ADMIN_USERNAME/ADMIN_PASSWORD not set, skipping admin bootstrap");
            Ok(false)
        }
    }
}
