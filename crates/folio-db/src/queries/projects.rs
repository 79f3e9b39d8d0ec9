//! Project CRUD operations.

use folio_core::{Error, MediaStore, ProjectId, Result};
use rusqlite::Connection;

use crate::hooks;
use crate::models::{Project, ProjectFields};

const COLS: &str =
    "id, title, description, technologies, image, live_demo_url, github_repo_url, sort_order";

/// Create a new project.
pub fn create_project(conn: &Connection, fields: &ProjectFields) -> Result<Project> {
    conn.execute(
        "INSERT INTO projects (title, description, technologies, image, live_demo_url, \
         github_repo_url, sort_order) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        rusqlite::params![
            fields.title,
            fields.description,
            fields.technologies,
            fields.image,
            fields.live_demo_url,
            fields.github_repo_url,
            fields.order,
        ],
    )
    .map_err(|e| Error::database(e.to_string()))?;

    Ok(project_from_fields(
        ProjectId::from(conn.last_insert_rowid()),
        fields,
    ))
}

/// Get a project by ID.
pub fn get_project(conn: &Connection, id: ProjectId) -> Result<Option<Project>> {
    let q = format!("SELECT {COLS} FROM projects WHERE id = ?1");
    match conn.query_row(&q, [id.get()], Project::from_row) {
        Ok(p) => Ok(Some(p)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(Error::database(e.to_string())),
    }
}

/// List all projects in display order.
pub fn list_projects(conn: &Connection) -> Result<Vec<Project>> {
    let q = format!("SELECT {COLS} FROM projects ORDER BY sort_order, id");
    let mut stmt = conn
        .prepare(&q)
        .map_err(|e| Error::database(e.to_string()))?;
    let rows = stmt
        .query_map([], Project::from_row)
        .map_err(|e| Error::database(e.to_string()))?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| Error::database(e.to_string()))?;
    Ok(rows)
}

/// Overwrite the editable columns of a project.
///
/// `image` is left as stored, whatever `fields.image` holds. Returns the
/// stored row, or `None` if the project does not exist.
pub fn update_project(
    conn: &Connection,
    id: ProjectId,
    fields: &ProjectFields,
) -> Result<Option<Project>> {
    let tx = conn
        .unchecked_transaction()
        .map_err(|e| Error::database(e.to_string()))?;

    let changed = tx
        .execute(
            "UPDATE projects SET title = ?1, description = ?2, technologies = ?3, \
             live_demo_url = ?4, github_repo_url = ?5, sort_order = ?6 WHERE id = ?7",
            rusqlite::params![
                fields.title,
                fields.description,
                fields.technologies,
                fields.live_demo_url,
                fields.github_repo_url,
                fields.order,
                id.get(),
            ],
        )
        .map_err(|e| Error::database(e.to_string()))?;
    if changed == 0 {
        return Ok(None);
    }

    let updated = get_project(&tx, id)?;
    tx.commit().map_err(|e| Error::database(e.to_string()))?;
    Ok(updated)
}

/// Point a project at `image` (or none).
///
/// Only the image column is written. Once the write commits, a replaced or
/// cleared image is released from `media`. Returns `None` if the project
/// does not exist.
pub fn set_project_image(
    conn: &Connection,
    media: &dyn MediaStore,
    id: ProjectId,
    image: Option<&str>,
) -> Result<Option<Project>> {
    let tx = conn
        .unchecked_transaction()
        .map_err(|e| Error::database(e.to_string()))?;

    let Some(old) = get_project(&tx, id)? else {
        return Ok(None);
    };

    tx.execute(
        "UPDATE projects SET image = ?1 WHERE id = ?2",
        rusqlite::params![image, id.get()],
    )
    .map_err(|e| Error::database(e.to_string()))?;

    tx.commit().map_err(|e| Error::database(e.to_string()))?;

    let new = Project {
        image: image.map(String::from),
        ..old.clone()
    };
    hooks::after_update(media, &old, &new);
    Ok(Some(new))
}

/// Delete a project and release its image.
pub fn delete_project(conn: &Connection, media: &dyn MediaStore, id: ProjectId) -> Result<bool> {
    let tx = conn
        .unchecked_transaction()
        .map_err(|e| Error::database(e.to_string()))?;

    let Some(old) = get_project(&tx, id)? else {
        return Ok(false);
    };

    tx.execute("DELETE FROM projects WHERE id = ?1", [id.get()])
        .map_err(|e| Error::database(e.to_string()))?;
    tx.commit().map_err(|e| Error::database(e.to_string()))?;

    hooks::after_delete(media, &old);
    Ok(true)
}

/// Apply a batch of `order` edits atomically.
pub fn reorder_projects(conn: &Connection, updates: &[(ProjectId, u32)]) -> Result<()> {
    let updates: Vec<(i64, u32)> = updates.iter().map(|&(id, o)| (id.get(), o)).collect();
    super::reorder(conn, "projects", "project", &updates)
}

fn project_from_fields(id: ProjectId, fields: &ProjectFields) -> Project {
    Project {
        id,
        title: fields.title.clone(),
        description: fields.description.clone(),
        technologies: fields.technologies.clone(),
        image: fields.image.clone(),
        live_demo_url: fields.live_demo_url.clone(),
        github_repo_url: fields.github_repo_url.clone(),
        order: fields.order,
    }
}
