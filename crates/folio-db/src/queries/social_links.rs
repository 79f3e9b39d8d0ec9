//! Social link CRUD operations.

use folio_core::{Error, Result, SocialLinkId};
use rusqlite::Connection;

use crate::models::{SocialLink, SocialLinkFields};

const COLS: &str = "id, name, url, icon_name, sort_order";

/// Create a new social link.
pub fn create_social_link(conn: &Connection, fields: &SocialLinkFields) -> Result<SocialLink> {
    conn.execute(
        "INSERT INTO social_links (name, url, icon_name, sort_order) VALUES (?1, ?2, ?3, ?4)",
        rusqlite::params![fields.name, fields.url, fields.icon_name, fields.order],
    )
    .map_err(|e| Error::database(e.to_string()))?;

    Ok(SocialLink {
        id: SocialLinkId::from(conn.last_insert_rowid()),
        name: fields.name.clone(),
        url: fields.url.clone(),
        icon_name: fields.icon_name.clone(),
        order: fields.order,
    })
}

/// Get a social link by ID.
pub fn get_social_link(conn: &Connection, id: SocialLinkId) -> Result<Option<SocialLink>> {
    let q = format!("SELECT {COLS} FROM social_links WHERE id = ?1");
    match conn.query_row(&q, [id.get()], SocialLink::from_row) {
        Ok(l) => Ok(Some(l)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(Error::database(e.to_string())),
    }
}

/// List all social links in display order.
pub fn list_social_links(conn: &Connection) -> Result<Vec<SocialLink>> {
    let q = format!("SELECT {COLS} FROM social_links ORDER BY sort_order, id");
    let mut stmt = conn
        .prepare(&q)
        .map_err(|e| Error::database(e.to_string()))?;
    let rows = stmt
        .query_map([], SocialLink::from_row)
        .map_err(|e| Error::database(e.to_string()))?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| Error::database(e.to_string()))?;
    Ok(rows)
}

/// Overwrite every column of a social link.
pub fn update_social_link(
    conn: &Connection,
    id: SocialLinkId,
    fields: &SocialLinkFields,
) -> Result<Option<SocialLink>> {
    let n = conn
        .execute(
            "UPDATE social_links SET name = ?1, url = ?2, icon_name = ?3, sort_order = ?4 \
             WHERE id = ?5",
            rusqlite::params![fields.name, fields.url, fields.icon_name, fields.order, id.get()],
        )
        .map_err(|e| Error::database(e.to_string()))?;
    if n == 0 {
        return Ok(None);
    }
    get_social_link(conn, id)
}

/// Delete a social link.
pub fn delete_social_link(conn: &Connection, id: SocialLinkId) -> Result<bool> {
    let n = conn
        .execute("DELETE FROM social_links WHERE id = ?1", [id.get()])
        .map_err(|e| Error::database(e.to_string()))?;
    Ok(n > 0)
}

/// Apply a batch of `order` edits atomically.
pub fn reorder_social_links(conn: &Connection, updates: &[(SocialLinkId, u32)]) -> Result<()> {
    let updates: Vec<(i64, u32)> = updates.iter().map(|&(id, o)| (id.get(), o)).collect();
    super::reorder(conn, "social_links", "social link", &updates)
}
