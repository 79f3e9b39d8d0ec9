//! folio-db: database access and persistence layer.
//!
//! This crate provides SQLite-backed storage with connection pooling,
//! embedded migrations, typed models, and query modules for the portfolio
//! records. Full updates never touch image columns; the image-setting and
//! delete queries run the cleanup in [`hooks`] themselves, so every write
//! path releases files it stops referencing.
//!
//! # Example
//!
//! ```
//! use folio_db::pool::{init_memory_pool, get_conn};
//! use folio_db::models::SkillFields;
//! use folio_db::queries::skills;
//!
//! let pool = init_memory_pool().unwrap();
//! let conn = get_conn(&pool).unwrap();
//!
//! let skill = skills::create_skill(&conn, &SkillFields { name: "Rust".into(), order: 0 }).unwrap();
//! assert_eq!(skills::list_skills(&conn).unwrap()[0].name, skill.name);
//! ```

pub mod hooks;
pub mod migrations;
pub mod models;
pub mod pool;
pub mod queries;
