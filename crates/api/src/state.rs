use std::sync::Arc;

use belva_events::NotificationDispatcher;
use belva_storage::ObjectStorage;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: everything is behind an `Arc` or is already a handle.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: belva_db::DbPool,
    pub config: Arc<ServerConfig>,
    /// Blog image storage.
    pub storage: Arc<dyn ObjectStorage>,
    /// Outbound email, both best-effort notifications and direct sends.
    pub notifier: Arc<NotificationDispatcher>,
}
