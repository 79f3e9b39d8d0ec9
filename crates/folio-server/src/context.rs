//! Application context shared by all request handlers.

use std::sync::Arc;

use folio_core::config::Config;
use folio_db::pool::DbPool;

use crate::media::LocalMediaStore;

/// Application context shared by all request handlers (via Axum state).
///
/// This is cheaply cloneable because it only holds `Arc`s.
#[derive(Clone)]
pub struct AppContext {
    /// Database connection pool.
    pub db: DbPool,
    /// Immutable application configuration snapshot.
    pub config: Arc<Config>,
    /// Image files owned by profiles and projects.
    pub media: Arc<LocalMediaStore>,
}

impl AppContext {
    /// Build a context whose media store is rooted at `config.media.root`.
    pub fn new(db: DbPool, config: Config) -> Self {
        let media = Arc::new(LocalMediaStore::new(config.media.root.clone()));
        Self {
            db,
            config: Arc::new(config),
            media,
        }
    }
}
