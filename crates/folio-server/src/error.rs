//! Error-to-HTTP response conversion.
//!
//! Implements `IntoResponse` for [`folio_core::Error`] so that route handlers
//! can return `Result<T, AppError>` and use `?` on query results.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Wrapper so we can implement `IntoResponse` for an external type.
pub struct AppError {
    inner: folio_core::Error,
    request_id: Option<String>,
}

impl AppError {
    pub fn new(inner: folio_core::Error) -> Self {
        Self {
            inner,
            request_id: None,
        }
    }

    pub fn with_request_id(mut self, id: String) -> Self {
        self.request_id = Some(id);
        self
    }
}

impl From<folio_core::Error> for AppError {
    fn from(e: folio_core::Error) -> Self {
        Self::new(e)
    }
}

/// Malformed or mistyped JSON bodies are validation failures.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::new(folio_core::Error::Validation(rejection.body_text()))
    }
}

/// Unparseable path parameters (e.g. a non-numeric id) are validation failures.
impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        Self::new(folio_core::Error::Validation(rejection.body_text()))
    }
}

/// Rendered error body, kept on the response so the request-id middleware
/// can re-render it with the id once one is known.
#[derive(Debug, Clone)]
pub(crate) struct ErrorBody {
    pub error: String,
    pub code: &'static str,
}

impl ErrorBody {
    pub(crate) fn render(&self, status: StatusCode, request_id: Option<&str>) -> Response {
        let body = json!({
            "error": self.error,
            "code": self.code,
            "request_id": request_id,
        });
        (status, axum::Json(body)).into_response()
    }
}

fn error_code(err: &folio_core::Error) -> &'static str {
    match err {
        folio_core::Error::NotFound { .. } => "not_found",
        folio_core::Error::Unauthorized(_) => "unauthorized",
        folio_core::Error::Validation(_) => "validation_error",
        folio_core::Error::Database { .. } => "database_error",
        folio_core::Error::Io { .. } => "io_error",
        folio_core::Error::Media(_) => "media_error",
        folio_core::Error::Internal(_) => "internal_error",
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.inner.http_status())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status.is_server_error() {
            tracing::error!(
                status = %status,
                error = %self.inner,
                "Server error in API handler"
            );
        }

        let body = ErrorBody {
            error: self.inner.to_string(),
            code: error_code(&self.inner),
        };

        let mut response = body.render(status, self.request_id.as_deref());
        if self.request_id.is_none() {
            response.extensions_mut().insert(body);
        }
        response
    }
}
