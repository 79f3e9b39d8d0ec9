//! Route handlers for the HTTP API.

pub mod auth;
pub mod health;
pub mod portfolio;
pub mod profiles;
pub mod projects;
pub mod skills;
pub mod social_links;

use std::fmt;
use std::io::ErrorKind;

use axum::extract::Path;
use axum::Json;
use axum_extra::extract::WithRejection;
use folio_core::MediaStore;
use serde::Deserialize;

use crate::error::AppError;

/// JSON body whose rejections render as `validation_error`.
pub type JsonBody<T> = WithRejection<Json<T>, AppError>;

/// Record id path parameter whose rejections render as `validation_error`.
pub type PathId<T> = WithRejection<Path<T>, AppError>;

/// One entry of a reorder request.
#[derive(Debug, Clone, Copy, Deserialize, utoipa::ToSchema)]
pub struct OrderUpdate {
    pub id: i64,
    pub order: u32,
}

/// Upload size limit for image bodies.
pub const MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;

/// Finish an image upload whose file is already stored under `key`.
///
/// If the record write did not take (record gone or database error), the
/// new file is released unless the record already referenced it.
pub(crate) fn settle_upload<T>(
    media: &dyn MediaStore,
    key: &str,
    previous: Option<&str>,
    saved: folio_core::Result<Option<T>>,
    entity: &str,
    id: impl fmt::Display,
) -> Result<T, AppError> {
    let err = match saved {
        Ok(Some(record)) => return Ok(record),
        Ok(None) => folio_core::Error::not_found(entity, id),
        Err(e) => e,
    };

    if previous != Some(key) {
        match media.remove(key) {
            Ok(()) => tracing::debug!(entity, key, "Released unused upload"),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => tracing::warn!(entity, key, error = %e, "Failed to release unused upload"),
        }
    }
    Err(err.into())
}
