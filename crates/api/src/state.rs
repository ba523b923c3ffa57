use std::sync::Arc;

use coursehub_notifications::Notifier;
use coursehub_storage::BlobStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
/// External capabilities are injected here rather than held in globals, so
/// tests can substitute their own.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: coursehub_db::DbPool,
    /// Server configuration (JWT settings are read by the auth extractors).
    pub config: Arc<ServerConfig>,
    /// Blob gateway for course covers and lesson videos.
    pub blob_store: Arc<dyn BlobStore>,
    /// Administrator notification gateway.
    pub notifier: Arc<dyn Notifier>,
}
