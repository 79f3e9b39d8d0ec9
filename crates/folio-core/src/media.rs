//! Seam between record storage and the file area holding owned images.
//!
//! Image columns store a relative key (e.g. `project_images/site_1a2b.png`).
//! The database layer only ever needs to release keys it stopped
//! referencing; writing new files is the server's concern.

use std::io;

/// A file area addressed by relative keys.
pub trait MediaStore: Send + Sync {
    /// Delete the file behind `key`.
    ///
    /// Implementations return the raw I/O error; callers decide whether a
    /// missing file matters.
    fn remove(&self, key: &str) -> io::Result<()>;
}

impl<T: MediaStore + ?Sized> MediaStore for std::sync::Arc<T> {
    fn remove(&self, key: &str) -> io::Result<()> {
        (**self).remove(key)
    }
}
