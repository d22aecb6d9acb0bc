//! Repository for the `programs` table.

use imi_core::program::{encode_list, NewProgram};
use imi_core::types::DbId;
use sqlx::PgPool;

use crate::models::program::{PopularProgram, PopularProgramRow, Program, ProgramRow};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, description, icon, image, features, duration, delivery_mode, \
                       for_whom, price, is_active, display_order, created_at, updated_at";

/// Same columns, qualified with the `p` alias for joined queries.
const P_COLUMNS: &str = "p.id, p.title, p.description, p.icon, p.image, p.features, p.duration, \
                         p.delivery_mode, p.for_whom, p.price, p.is_active, p.display_order, \
                         p.created_at, p.updated_at";

/// Provides CRUD operations for programs.
pub struct ProgramRepo;

impl ProgramRepo {
    /// Insert a new program, returning its id.
    ///
    /// Callers re-read the canonical row with [`ProgramRepo::find_by_id`].
    pub async fn create(pool: &PgPool, input: &NewProgram) -> Result<DbId, sqlx::Error> {
        sqlx::query_scalar(
            "INSERT INTO programs \
                (title, description, icon, image, features, duration, delivery_mode, \
                 for_whom, price, display_order, is_active) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) \
             RETURNING id",
        )
        .bind(&input.title)
        .bind(&input.description)
        .bind(&input.icon)
        .bind(&input.image)
        .bind(encode_list(&input.features))
        .bind(&input.duration)
        .bind(input.delivery_mode.map(|m| m.as_str()))
        .bind(input.for_whom.as_deref().map(encode_list))
        .bind(input.price)
        .bind(input.display_order)
        .bind(input.is_active)
        .fetch_one(pool)
        .await
    }

    /// Find a program by id, active or not.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Program>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM programs WHERE id = $1");
        let row = sqlx::query_as::<_, ProgramRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        row.map(decode).transpose()
    }

    /// List active programs in public display order.
    pub async fn list_active(pool: &PgPool) -> Result<Vec<Program>, sqlx::Error> {
        Self::list(pool, false).await
    }

    /// List programs, optionally including soft-deleted ones.
    ///
    /// Ordered by display_order, then id.
    pub async fn list(pool: &PgPool, include_inactive: bool) -> Result<Vec<Program>, sqlx::Error> {
        let query = if include_inactive {
            format!("SELECT {COLUMNS} FROM programs ORDER BY display_order ASC, id ASC")
        } else {
            format!(
                "SELECT {COLUMNS} FROM programs WHERE is_active = true \
                 ORDER BY display_order ASC, id ASC"
            )
        };
        let rows = sqlx::query_as::<_, ProgramRow>(&query)
            .fetch_all(pool)
            .await?;
        rows.into_iter().map(decode).collect()
    }

    /// Rank active programs by the number of enquiries whose `program`
    /// text equals the program title exactly.
    ///
    /// Ties are broken by display_order ascending, then id.
    pub async fn list_popular(
        pool: &PgPool,
        limit: i64,
    ) -> Result<Vec<PopularProgram>, sqlx::Error> {
        let query = format!(
            "SELECT {P_COLUMNS}, COUNT(e.id) AS enquiry_count \
             FROM programs p \
             LEFT JOIN enquiries e ON e.program = p.title \
             WHERE p.is_active = true \
             GROUP BY p.id \
             ORDER BY enquiry_count DESC, p.display_order ASC, p.id ASC \
             LIMIT $1"
        );
        let rows = sqlx::query_as::<_, PopularProgramRow>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await?;
        rows.into_iter()
            .map(|row| PopularProgram::try_from(row).map_err(decode_error))
            .collect()
    }

    /// Overwrite every editable column of a program.
    ///
    /// Returns `false` if no row with the given `id` exists.
    pub async fn replace(pool: &PgPool, id: DbId, input: &NewProgram) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE programs SET \
                title = $2, description = $3, icon = $4, image = $5, features = $6, \
                duration = $7, delivery_mode = $8, for_whom = $9, price = $10, \
                display_order = $11, is_active = $12 \
             WHERE id = $1",
        )
        .bind(id)
        .bind(&input.title)
        .bind(&input.description)
        .bind(&input.icon)
        .bind(&input.image)
        .bind(encode_list(&input.features))
        .bind(&input.duration)
        .bind(input.delivery_mode.map(|m| m.as_str()))
        .bind(input.for_whom.as_deref().map(encode_list))
        .bind(input.price)
        .bind(input.display_order)
        .bind(input.is_active)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Soft-delete a program (set is_active = false).
    pub async fn deactivate(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE programs SET is_active = false WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

fn decode(row: ProgramRow) -> Result<Program, sqlx::Error> {
    Program::try_from(row).map_err(decode_error)
}

fn decode_error(err: imi_core::error::CoreError) -> sqlx::Error {
    tracing::error!(error = %err, "Failed to decode program row");
    sqlx::Error::Decode(Box::new(err))
}
