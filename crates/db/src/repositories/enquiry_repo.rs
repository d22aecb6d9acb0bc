//! Repository for the `enquiries` table.

use imi_core::enquiry::{EnquiryStatus, NewEnquiry};
use imi_core::types::DbId;
use sqlx::PgPool;

use crate::models::enquiry::Enquiry;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, email, phone, program, message, status, created_at";

/// Provides CRUD operations for enquiries.
pub struct EnquiryRepo;

impl EnquiryRepo {
    /// Insert a new enquiry with status `pending`, returning its id.
    pub async fn create(pool: &PgPool, input: &NewEnquiry) -> Result<DbId, sqlx::Error> {
        sqlx::query_scalar(
            "INSERT INTO enquiries (name, email, phone, program, message, status) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING id",
        )
        .bind(&input.name)
        .bind(&input.email)
        .bind(&input.phone)
        .bind(&input.program)
        .bind(&input.message)
        .bind(EnquiryStatus::Pending.as_str())
        .fetch_one(pool)
        .await
    }

    /// Find an enquiry by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Enquiry>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM enquiries WHERE id = $1");
        sqlx::query_as::<_, Enquiry>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all enquiries, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Enquiry>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM enquiries ORDER BY created_at DESC, id DESC");
        sqlx::query_as::<_, Enquiry>(&query).fetch_all(pool).await
    }

    /// Set the follow-up status. Returns `false` if the id does not exist.
    pub async fn update_status(
        pool: &PgPool,
        id: DbId,
        status: EnquiryStatus,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE enquiries SET status = $2 WHERE id = $1")
            .bind(id)
            .bind(status.as_str())
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
