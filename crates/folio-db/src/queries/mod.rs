//! Database query modules.

pub mod profiles;
pub mod projects;
pub mod sessions;
pub mod skills;
pub mod social_links;

use folio_core::{Error, Result};
use rusqlite::Connection;

/// Set `sort_order` for each `(id, order)` pair in one transaction.
///
/// Any id that does not exist in `table` rolls the whole batch back and
/// yields [`Error::NotFound`].
pub(crate) fn reorder(
    conn: &Connection,
    table: &str,
    entity: &str,
    updates: &[(i64, u32)],
) -> Result<()> {
    let tx = conn
        .unchecked_transaction()
        .map_err(|e| Error::database(e.to_string()))?;

    let sql = format!("UPDATE {table} SET sort_order = ?1 WHERE id = ?2");
    {
        let mut stmt = tx
            .prepare(&sql)
            .map_err(|e| Error::database(e.to_string()))?;
        for &(id, order) in updates {
            let n = stmt
                .execute(rusqlite::params![order, id])
                .map_err(|e| Error::database(e.to_string()))?;
            if n == 0 {
                // Dropping `tx` rolls back.
                return Err(Error::not_found(entity, id));
            }
        }
    }

    tx.commit().map_err(|e| Error::database(e.to_string()))?;
    Ok(())
}
