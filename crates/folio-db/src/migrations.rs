//! Embedded SQL migrations and runner.
//!
//! Migrations are stored as `&str` constants and executed in order.  A
//! `schema_migrations` table tracks which versions have been applied.

use folio_core::{Error, Result};
use rusqlite::Connection;

/// V1: portfolio content tables.
///
/// `order` is a reserved word in SQL, so the display sort key lives in
/// `sort_order`. Lists are read with `ORDER BY sort_order, id`.
const V1_CONTENT: &str = r#"
CREATE TABLE profiles (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    name          TEXT NOT NULL DEFAULT 'John Doe',
    tagline       TEXT NOT NULL DEFAULT 'Full Stack Developer | Animation Enthusiast',
    bio           TEXT NOT NULL DEFAULT '',
    profile_image TEXT
);

CREATE TABLE skills (
    id         INTEGER PRIMARY KEY AUTOINCREMENT,
    name       TEXT NOT NULL,
    sort_order INTEGER NOT NULL DEFAULT 0 CHECK (sort_order >= 0)
);

CREATE TABLE projects (
    id              INTEGER PRIMARY KEY AUTOINCREMENT,
    title           TEXT NOT NULL,
    description     TEXT NOT NULL,
    technologies    TEXT NOT NULL,
    image           TEXT,
    live_demo_url   TEXT,
    github_repo_url TEXT,
    sort_order      INTEGER NOT NULL DEFAULT 0 CHECK (sort_order >= 0)
);

CREATE TABLE social_links (
    id         INTEGER PRIMARY KEY AUTOINCREMENT,
    name       TEXT NOT NULL,
    url        TEXT NOT NULL,
    icon_name  TEXT NOT NULL,
    sort_order INTEGER NOT NULL DEFAULT 0 CHECK (sort_order >= 0)
);

CREATE INDEX idx_skills_order ON skills(sort_order, id);
CREATE INDEX idx_projects_order ON projects(sort_order, id);
CREATE INDEX idx_social_links_order ON social_links(sort_order, id);
"#;

/// V2: admin login sessions.
const V2_ADMIN_SESSIONS: &str = r#"
CREATE TABLE admin_sessions (
    token      TEXT PRIMARY KEY,
    created_at TEXT NOT NULL,
    expires_at TEXT NOT NULL
);

CREATE INDEX idx_admin_sessions_expires ON admin_sessions(expires_at);
"#;

const MIGRATIONS: &[(i64, &str)] = &[(1, V1_CONTENT), (2, V2_ADMIN_SESSIONS)];

/// Run all pending migrations, returning how many were applied.
pub fn run_migrations(conn: &Connection) -> Result<usize> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_migrations (
            version    INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        )",
    )
    .map_err(|e| Error::database(format!("Failed to create schema_migrations: {e}")))?;

    let mut applied = 0;
    for &(version, sql) in MIGRATIONS {
        let already: bool = conn
            .query_row(
                "SELECT COUNT(*) > 0 FROM schema_migrations WHERE version = ?1",
                [version],
                |row| row.get(0),
            )
            .map_err(|e| Error::database(e.to_string()))?;

        if already {
            continue;
        }

        let tx = conn
            .unchecked_transaction()
            .map_err(|e| Error::database(e.to_string()))?;

        tx.execute_batch(sql)
            .map_err(|e| Error::database(format!("Migration V{version} failed: {e}")))?;

        tx.execute(
            "INSERT INTO schema_migrations (version) VALUES (?1)",
            [version],
        )
        .map_err(|e| Error::database(e.to_string()))?;

        tx.commit().map_err(|e| Error::database(e.to_string()))?;

        tracing::debug!("Applied migration V{version}");
        applied += 1;
    }

    Ok(applied)
}

/// Latest schema version known to this binary.
pub fn latest_version() -> i64 {
    MIGRATIONS.last().map(|&(v, _)| v).unwrap_or(0)
}
