//! Skill CRUD operations.

use folio_core::{Error, Result, SkillId};
use rusqlite::Connection;

use crate::models::{Skill, SkillFields};

const COLS: &str = "id, name, sort_order";

/// Create a new skill.
pub fn create_skill(conn: &Connection, fields: &SkillFields) -> Result<Skill> {
    conn.execute(
        "INSERT INTO skills (name, sort_order) VALUES (?1, ?2)",
        rusqlite::params![fields.name, fields.order],
    )
    .map_err(|e| Error::database(e.to_string()))?;

    Ok(Skill {
        id: SkillId::from(conn.last_insert_rowid()),
        name: fields.name.clone(),
        order: fields.order,
    })
}

/// Get a skill by ID.
pub fn get_skill(conn: &Connection, id: SkillId) -> Result<Option<Skill>> {
    let q = format!("SELECT {COLS} FROM skills WHERE id = ?1");
    match conn.query_row(&q, [id.get()], Skill::from_row) {
        Ok(s) => Ok(Some(s)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(Error::database(e.to_string())),
    }
}

/// List all skills in display order (ties by insertion).
pub fn list_skills(conn: &Connection) -> Result<Vec<Skill>> {
    let q = format!("SELECT {COLS} FROM skills ORDER BY sort_order, id");
    let mut stmt = conn
        .prepare(&q)
        .map_err(|e| Error::database(e.to_string()))?;
    let rows = stmt
        .query_map([], Skill::from_row)
        .map_err(|e| Error::database(e.to_string()))?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| Error::database(e.to_string()))?;
    Ok(rows)
}

/// Overwrite every column of a skill. Returns `None` if it does not exist.
pub fn update_skill(conn: &Connection, id: SkillId, fields: &SkillFields) -> Result<Option<Skill>> {
    let n = conn
        .execute(
            "UPDATE skills SET name = ?1, sort_order = ?2 WHERE id = ?3",
            rusqlite::params![fields.name, fields.order, id.get()],
        )
        .map_err(|e| Error::database(e.to_string()))?;
    if n == 0 {
        return Ok(None);
    }
    get_skill(conn, id)
}

/// Delete a skill.
pub fn delete_skill(conn: &Connection, id: SkillId) -> Result<bool> {
    let n = conn
        .execute("DELETE FROM skills WHERE id = ?1", [id.get()])
        .map_err(|e| Error::database(e.to_string()))?;
    Ok(n > 0)
}

/// Apply a batch of `order` edits atomically.
pub fn reorder_skills(conn: &Connection, updates: &[(SkillId, u32)]) -> Result<()> {
    let updates: Vec<(i64, u32)> = updates.iter().map(|&(id, o)| (id.get(), o)).collect();
    super::reorder(conn, "skills", "skill", &updates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::init_memory_pool;

    fn skill(name: &str, order: u32) -> SkillFields {
        SkillFields {
            name: name.into(),
            order,
        }
    }

    #[test]
    fn crud() {
        let pool = init_memory_pool().unwrap();
        let conn = pool.get().unwrap();

        let s = create_skill(&conn, &skill("Rust", 3)).unwrap();
        assert_eq!(s.name, "Rust");

        let found = get_skill(&conn, s.id).unwrap().unwrap();
        assert_eq!(found, s);

        let updated = update_skill(&conn, s.id, &skill("Rust 2024", 1))
            .unwrap()
            .unwrap();
        assert_eq!(updated.name, "Rust 2024");
        assert_eq!(updated.order, 1);

        assert!(delete_skill(&conn, s.id).unwrap());
        assert!(get_skill(&conn, s.id).unwrap().is_none());
        assert!(!delete_skill(&conn, s.id).unwrap());
    }

    #[test]
    fn update_missing_returns_none() {
        let pool = init_memory_pool().unwrap();
        let conn = pool.get().unwrap();
        assert!(update_skill(&conn, SkillId::from(99), &skill("x", 0))
            .unwrap()
            .is_none());
    }

    #[test]
    fn list_sorted_by_order_then_insertion() {
        let pool = init_memory_pool().unwrap();
        let conn = pool.get().unwrap();

        create_skill(&conn, &skill("C", 2)).unwrap();
        create_skill(&conn, &skill("A", 0)).unwrap();
        create_skill(&conn, &skill("B1", 1)).unwrap();
        create_skill(&conn, &skill("B2", 1)).unwrap();

        let names: Vec<String> = list_skills(&conn)
            .unwrap()
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, vec!["A", "B1", "B2", "C"]);
    }

    #[test]
    fn reorder_applies_batch() {
        let pool = init_memory_pool().unwrap();
        let conn = pool.get().unwrap();

        let a = create_skill(&conn, &skill("A", 0)).unwrap();
        let b = create_skill(&conn, &skill("B", 1)).unwrap();

        reorder_skills(&conn, &[(a.id, 5), (b.id, 0)]).unwrap();

        let names: Vec<String> = list_skills(&conn)
            .unwrap()
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, vec!["B", "A"]);
    }

    #[test]
    fn reorder_unknown_id_rolls_back() {
        let pool = init_memory_pool().unwrap();
        let conn = pool.get().unwrap();

        let a = create_skill(&conn, &skill("A", 0)).unwrap();
        let err = reorder_skills(&conn, &[(a.id, 9), (SkillId::from(404), 1)]).unwrap_err();
        assert!(matches!(err, Error::NotFound { .. }));

        assert_eq!(get_skill(&conn, a.id).unwrap().unwrap().order, 0);
    }
}
