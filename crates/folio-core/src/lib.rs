//! folio-core: shared types, IDs, errors, and configuration.
//!
//! This crate is the foundational dependency for the other folio crates,
//! providing typed record identifiers, a unified error type, the TOML
//! configuration model, and the [`MediaStore`] seam used by the database
//! layer to release image files it no longer references.

pub mod config;
pub mod error;
pub mod ids;
pub mod media;

// Re-export the most commonly used items at the crate root.
pub use error::{Error, Result};
pub use ids::*;
pub use media::MediaStore;
