//! Admin login session operations.
//!
//! Timestamps are stored as second-precision RFC 3339 UTC strings
//! (`2026-01-01T00:00:00Z`), which sort lexicographically in time order.

use chrono::{DateTime, SecondsFormat, Utc};
use folio_core::{Error, Result};
use rusqlite::{Connection, OptionalExtension};

fn timestamp(t: DateTime<Utc>) -> String {
    t.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Store a new session token that expires at `expires_at`.
pub fn create_session(conn: &Connection, token: &str, expires_at: DateTime<Utc>) -> Result<()> {
    conn.execute(
        "INSERT INTO admin_sessions (token, created_at, expires_at) VALUES (?1, ?2, ?3)",
        rusqlite::params![token, timestamp(Utc::now()), timestamp(expires_at)],
    )
    .map_err(|e| Error::database(e.to_string()))?;
    Ok(())
}

/// Whether `token` names a session that has not expired at `now`.
pub fn session_is_valid(conn: &Connection, token: &str, now: DateTime<Utc>) -> Result<bool> {
    let found: Option<String> = conn
        .query_row(
            "SELECT token FROM admin_sessions WHERE token = ?1 AND expires_at > ?2",
            rusqlite::params![token, timestamp(now)],
            |row| row.get(0),
        )
        .optional()
        .map_err(|e| Error::database(e.to_string()))?;
    Ok(found.is_some())
}

/// Delete a session token. Returns whether it existed.
pub fn delete_session(conn: &Connection, token: &str) -> Result<bool> {
    let n = conn
        .execute("DELETE FROM admin_sessions WHERE token = ?1", [token])
        .map_err(|e| Error::database(e.to_string()))?;
    Ok(n > 0)
}

/// Purge every session that has expired at `now`. Returns how many were removed.
pub fn delete_expired_sessions(conn: &Connection, now: DateTime<Utc>) -> Result<usize> {
    conn.execute(
        "DELETE FROM admin_sessions WHERE expires_at <= ?1",
        [timestamp(now)],
    )
    .map_err(|e| Error::database(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::init_memory_pool;
    use chrono::Duration;

    #[test]
    fn live_session_is_valid() {
        let pool = init_memory_pool().unwrap();
        let conn = pool.get().unwrap();
        let now = Utc::now();

        create_session(&conn, "tok-1", now + Duration::hours(1)).unwrap();
        assert!(session_is_valid(&conn, "tok-1", now).unwrap());
        assert!(!session_is_valid(&conn, "tok-2", now).unwrap());
    }

    #[test]
    fn expired_session_is_invalid() {
        let pool = init_memory_pool().unwrap();
        let conn = pool.get().unwrap();
        let now = Utc::now();

        create_session(&conn, "old", now - Duration::minutes(5)).unwrap();
        assert!(!session_is_valid(&conn, "old", now).unwrap());
    }

    #[test]
    fn delete_session_works() {
        let pool = init_memory_pool().unwrap();
        let conn = pool.get().unwrap();
        let now = Utc::now();

        create_session(&conn, "tok", now + Duration::hours(1)).unwrap();
        assert!(delete_session(&conn, "tok").unwrap());
        assert!(!delete_session(&conn, "tok").unwrap());
        assert!(!session_is_valid(&conn, "tok", now).unwrap());
    }

    #[test]
    fn purge_expired() {
        let pool = init_memory_pool().unwrap();
        let conn = pool.get().unwrap();
        let now = Utc::now();

        create_session(&conn, "old", now - Duration::hours(2)).unwrap();
        create_session(&conn, "new", now + Duration::hours(2)).unwrap();

        assert_eq!(delete_expired_sessions(&conn, now).unwrap(), 1);
        assert!(session_is_valid(&conn, "new", now).unwrap());
    }
}
