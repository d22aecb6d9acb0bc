//! Enquiry entity model.

use imi_core::enquiry::EnquiryStatus;
use imi_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `enquiries` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Enquiry {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub program: String,
    pub message: Option<String>,
    #[sqlx(try_from = "String")]
    pub status: EnquiryStatus,
    pub created_at: Timestamp,
}
