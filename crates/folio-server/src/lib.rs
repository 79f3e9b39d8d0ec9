//! folio-server: HTTP API for the portfolio content backend.
//!
//! This crate ties the storage layer to an Axum application. It provides:
//!
//! - The public aggregate read used by the portfolio frontend
//! - An authenticated admin API for editing, reordering, and image upload
//! - Local image storage served back under the media URL prefix
//! - Graceful shutdown via signal handling

pub mod context;
pub mod error;
pub mod media;
pub mod middleware;
pub mod router;
pub mod routes;
pub mod validation;

use chrono::Utc;
use folio_core::config::Config;

use crate::context::AppContext;

/// Start the folio server.
///
/// Opens (or creates) the database, prepares the media root, builds the
/// [`AppContext`], and serves HTTP until a shutdown signal is received.
pub async fn start(config: Config) -> folio_core::Result<()> {
    check_exposure(&config)?;
    for warning in config.validate() {
        tracing::warn!("Config warning: {warning}");
    }

    let db_path = &config.server.db_path;
    let existed = db_path.exists();
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
            tracing::info!("Created database directory {}", parent.display());
        }
    }
    let db_str = db_path.to_string_lossy();
    let db = folio_db::pool::init_pool(&db_str)?;
    if existed {
        tracing::info!("Database opened (existing) at {db_str}");
    } else {
        tracing::info!("Database created (new) at {db_str}");
    }

    {
        let conn = folio_db::pool::get_conn(&db)?;
        let purged = folio_db::queries::sessions::delete_expired_sessions(&conn, Utc::now())?;
        if purged > 0 {
            tracing::debug!("Purged {purged} expired admin session(s)");
        }
    }

    let media_root = &config.media.root;
    if !media_root.exists() {
        std::fs::create_dir_all(media_root)?;
        tracing::info!("Created media directory {}", media_root.display());
    }

    let addr = format!("{}:{}", config.server.host, config.server.port);

    let ctx = AppContext::new(db, config);
    let app = router::build_router(ctx);

    let listener = tokio::net::TcpListener::bind(addr.as_str())
        .await
        .map_err(|e| folio_core::Error::Internal(format!("Failed to bind to {addr}: {e}")))?;

    tracing::info!("Starting server on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Refuse to serve an unauthenticated admin API beyond the local machine.
pub fn check_exposure(config: &Config) -> folio_core::Result<()> {
    if config.auth.enabled || config.server.is_loopback() {
        return Ok(());
    }
    Err(folio_core::Error::Validation(format!(
        "auth is disabled; refusing to bind non-loopback host '{}' (enable auth or use 127.0.0.1)",
        config.server.host
    )))
}

/// Wait for a shutdown signal (SIGINT or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }

    tracing::info!("Shutdown signal received");
}
