use std::sync::Arc;

use crate::config::ServerConfig;
use crate::notifications::EnquiryNotifier;
use crate::storage::ImageStore;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: imi_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Best-effort email notifications for new enquiries.
    pub notifier: Arc<EnquiryNotifier>,
    /// On-disk store for uploaded program images.
    pub images: Arc<ImageStore>,
}
