//! Filesystem-backed image storage with content-hash naming.
//!
//! Uploaded bytes are validated as an image and written under
//! `{root}/{folder}/{owner}_{hash}.{ext}`, where `hash` is the first 16 hex
//! characters of the SHA-256 of the bytes. The returned key is the path
//! relative to `root`, which is what the database stores and what
//! [`MediaConfig::url_for`](folio_core::config::MediaConfig::url_for) turns
//! into a public URL.

use std::io;
use std::path::{Component, Path, PathBuf};

use folio_core::{Error, MediaStore, Result};
use image::ImageFormat;
use sha2::{Digest, Sha256};

/// Folder for profile pictures.
pub const PROFILE_IMAGES: &str = "profile_images";

/// Folder for project screenshots.
pub const PROJECT_IMAGES: &str = "project_images";

/// Formats accepted for upload.
const ACCEPTED_FORMATS: &[ImageFormat] = &[
    ImageFormat::Png,
    ImageFormat::Jpeg,
    ImageFormat::Gif,
    ImageFormat::WebP,
    ImageFormat::Bmp,
];

/// Image files on local disk, addressed by keys relative to `root`.
#[derive(Debug, Clone)]
pub struct LocalMediaStore {
    root: PathBuf,
}

impl LocalMediaStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Validate `data` as an image and store it for `owner` under `folder`.
    ///
    /// Returns the media key. Storing identical bytes for the same owner
    /// yields the same key and leaves the existing file untouched.
    pub fn store(&self, folder: &str, owner: &str, data: &[u8]) -> Result<String> {
        if data.is_empty() {
            return Err(Error::Media("empty upload".into()));
        }

        let format = image::guess_format(data)
            .map_err(|_| Error::Media("unrecognized image format".into()))?;
        if !ACCEPTED_FORMATS.contains(&format) {
            return Err(Error::Media(format!(
                "unsupported image format: {format:?}"
            )));
        }
        image::load_from_memory_with_format(data, format)
            .map_err(|e| Error::Media(format!("failed to decode image: {e}")))?;

        let ext = format.extensions_str().first().copied().unwrap_or("img");
        let key = format!("{folder}/{owner}_{}.{ext}", compute_hash(data));
        let path = self.resolve(&key)?;

        if path.exists() {
            tracing::debug!(key = %key, "Image already stored");
            return Ok(key);
        }

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, data)?;
        tracing::info!(key = %key, bytes = data.len(), "Stored image");

        Ok(key)
    }

    /// Absolute path for a key. Keys that escape the root are rejected.
    pub fn resolve(&self, key: &str) -> io::Result<PathBuf> {
        let relative = Path::new(key);
        let is_plain = relative
            .components()
            .all(|c| matches!(c, Component::Normal(_)));
        if key.is_empty() || !is_plain {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("invalid media key: {key}"),
            ));
        }
        Ok(self.root.join(relative))
    }
}

impl MediaStore for LocalMediaStore {
    fn remove(&self, key: &str) -> io::Result<()> {
        std::fs::remove_file(self.resolve(key)?)
    }
}

/// First 16 hex characters of the SHA-256 of `data`.
fn compute_hash(data: &[u8]) -> String {
    let digest = Sha256::digest(data);
    hex::encode(&digest[..8])
}
