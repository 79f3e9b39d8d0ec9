//! Profile CRUD operations.

use folio_core::{Error, MediaStore, ProfileId, Result};
use rusqlite::{Connection, OptionalExtension};

use crate::hooks;
use crate::models::{Profile, ProfileFields};

const COLS: &str = "id, name, tagline, bio, profile_image";

/// Create a new profile.
pub fn create_profile(conn: &Connection, fields: &ProfileFields) -> Result<Profile> {
    conn.execute(
        "INSERT INTO profiles (name, tagline, bio, profile_image) VALUES (?1, ?2, ?3, ?4)",
        rusqlite::params![fields.name, fields.tagline, fields.bio, fields.profile_image],
    )
    .map_err(|e| Error::database(e.to_string()))?;

    Ok(Profile {
        id: ProfileId::from(conn.last_insert_rowid()),
        name: fields.name.clone(),
        tagline: fields.tagline.clone(),
        bio: fields.bio.clone(),
        profile_image: fields.profile_image.clone(),
    })
}

/// Get a profile by ID.
pub fn get_profile(conn: &Connection, id: ProfileId) -> Result<Option<Profile>> {
    let q = format!("SELECT {COLS} FROM profiles WHERE id = ?1");
    match conn.query_row(&q, [id.get()], Profile::from_row) {
        Ok(p) => Ok(Some(p)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(Error::database(e.to_string())),
    }
}

/// The profile shown on the public site: the earliest one created.
pub fn first_profile(conn: &Connection) -> Result<Option<Profile>> {
    let q = format!("SELECT {COLS} FROM profiles ORDER BY id LIMIT 1");
    conn.query_row(&q, [], Profile::from_row)
        .optional()
        .map_err(|e| Error::database(e.to_string()))
}

/// List all profiles by ID.
pub fn list_profiles(conn: &Connection) -> Result<Vec<Profile>> {
    let q = format!("SELECT {COLS} FROM profiles ORDER BY id");
    let mut stmt = conn
        .prepare(&q)
        .map_err(|e| Error::database(e.to_string()))?;
    let rows = stmt
        .query_map([], Profile::from_row)
        .map_err(|e| Error::database(e.to_string()))?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| Error::database(e.to_string()))?;
    Ok(rows)
}

/// Overwrite the editable columns of a profile.
///
/// `profile_image` is left as stored, whatever `fields.profile_image` holds.
/// Returns the stored row, or `None` if the profile does not exist.
pub fn update_profile(
    conn: &Connection,
    id: ProfileId,
    fields: &ProfileFields,
) -> Result<Option<Profile>> {
    let tx = conn
        .unchecked_transaction()
        .map_err(|e| Error::database(e.to_string()))?;

    let changed = tx
        .execute(
            "UPDATE profiles SET name = ?1, tagline = ?2, bio = ?3 WHERE id = ?4",
            rusqlite::params![fields.name, fields.tagline, fields.bio, id.get()],
        )
        .map_err(|e| Error::database(e.to_string()))?;
    if changed == 0 {
        return Ok(None);
    }

    let updated = get_profile(&tx, id)?;
    tx.commit().map_err(|e| Error::database(e.to_string()))?;
    Ok(updated)
}

/// Point a profile at `image` (or none).
///
/// Once the write commits, a replaced or cleared image is released from
/// `media`. Returns `None` if the profile does not exist.
pub fn set_profile_image(
    conn: &Connection,
    media: &dyn MediaStore,
    id: ProfileId,
    image: Option<&str>,
) -> Result<Option<Profile>> {
    let tx = conn
        .unchecked_transaction()
        .map_err(|e| Error::database(e.to_string()))?;

    let Some(old) = get_profile(&tx, id)? else {
        return Ok(None);
    };

    tx.execute(
        "UPDATE profiles SET profile_image = ?1 WHERE id = ?2",
        rusqlite::params![image, id.get()],
    )
    .map_err(|e| Error::database(e.to_string()))?;

    tx.commit().map_err(|e| Error::database(e.to_string()))?;

    let new = Profile {
        profile_image: image.map(String::from),
        ..old.clone()
    };
    hooks::after_update(media, &old, &new);
    Ok(Some(new))
}

/// Delete a profile and release its image.
pub fn delete_profile(conn: &Connection, media: &dyn MediaStore, id: ProfileId) -> Result<bool> {
    let tx = conn
        .unchecked_transaction()
        .map_err(|e| Error::database(e.to_string()))?;

    let Some(old) = get_profile(&tx, id)? else {
        return Ok(false);
    };

    tx.execute("DELETE FROM profiles WHERE id = ?1", [id.get()])
        .map_err(|e| Error::database(e.to_string()))?;
    tx.commit().map_err(|e| Error::database(e.to_string()))?;

    hooks::after_delete(media, &old);
    Ok(true)
}
