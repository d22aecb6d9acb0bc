//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// Query parameters for `GET /api/programs/popular` (`?limit=`).
///
/// The value is defaulted and clamped by `imi_core::program::clamp_popular_limit`.
#[derive(Debug, Deserialize)]
pub struct PopularParams {
    pub limit: Option<i64>,
}

/// Query parameters for list endpoints that support an `include_inactive` flag.
#[derive(Debug, Deserialize)]
pub struct IncludeInactiveParams {
    #[serde(default)]
    pub include_inactive: bool,
}
