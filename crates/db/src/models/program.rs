//! Program entity model.
//!
//! `features` and `for_whom` are stored as JSON text, so the raw
//! [`ProgramRow`] is decoded into [`Program`] before it leaves the
//! repository layer.

use imi_core::error::CoreError;
use imi_core::program::{decode_list, DeliveryMode};
use imi_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A raw row from the `programs` table.
#[derive(Debug, Clone, FromRow)]
pub struct ProgramRow {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub icon: String,
    pub image: Option<String>,
    pub features: String,
    pub duration: Option<String>,
    pub delivery_mode: Option<String>,
    pub for_whom: Option<String>,
    pub price: Option<f64>,
    pub is_active: bool,
    pub display_order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A program as returned by the API.
#[derive(Debug, Clone, Serialize)]
pub struct Program {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub icon: String,
    pub image: Option<String>,
    pub features: Vec<String>,
    pub duration: Option<String>,
    pub delivery_mode: Option<DeliveryMode>,
    pub for_whom: Option<Vec<String>>,
    pub price: Option<f64>,
    pub is_active: bool,
    pub display_order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl TryFrom<ProgramRow> for Program {
    type Error = CoreError;

    fn try_from(row: ProgramRow) -> Result<Self, Self::Error> {
        let delivery_mode = row
            .delivery_mode
            .as_deref()
            .map(str::parse::<DeliveryMode>)
            .transpose()?;
        let for_whom = row.for_whom.as_deref().map(decode_list).transpose()?;

        Ok(Program {
            id: row.id,
            title: row.title,
            description: row.description,
            icon: row.icon,
            image: row.image,
            features: decode_list(&row.features)?,
            duration: row.duration,
            delivery_mode,
            for_whom,
            price: row.price,
            is_active: row.is_active,
            display_order: row.display_order,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// A program row joined with its matching-title enquiry count.
#[derive(Debug, Clone, FromRow)]
pub struct PopularProgramRow {
    #[sqlx(flatten)]
    pub program: ProgramRow,
    pub enquiry_count: i64,
}

/// A program plus the number of enquiries naming it.
#[derive(Debug, Clone, Serialize)]
pub struct PopularProgram {
    #[serde(flatten)]
    pub program: Program,
    pub enquiry_count: i64,
}

impl TryFrom<PopularProgramRow> for PopularProgram {
    type Error = CoreError;

    fn try_from(row: PopularProgramRow) -> Result<Self, Self::Error> {
        Ok(PopularProgram {
            program: row.program.try_into()?,
            enquiry_count: row.enquiry_count,
        })
    }
}
