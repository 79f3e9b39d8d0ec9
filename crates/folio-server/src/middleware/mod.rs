//! HTTP middleware: request ID and authentication.

pub mod auth;
pub mod request_id;
