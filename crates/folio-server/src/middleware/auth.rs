//! Authentication middleware.
//!
//! Validates a bearer token or session cookie against the configured API key
//! and the `admin_sessions` table. Applied to `/api/admin/*` only; every
//! request passes when auth is disabled in config.

use axum::extract::State;
use axum::http::{header, HeaderMap, Request};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum_extra::extract::cookie::CookieJar;
use chrono::Utc;
use folio_core::config::AuthConfig;
use folio_db::pool::DbPool;

use crate::context::AppContext;
use crate::error::AppError;

/// Cookie name for browser sessions.
pub const SESSION_COOKIE: &str = "folio_session";

/// Extract the presented token.
///
/// Resolution order:
/// 1. `Authorization: Bearer <token>`
/// 2. Cookie `folio_session=<token>`
pub fn extract_token(headers: &HeaderMap) -> Option<String> {
    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(|t| t.trim().to_string());
    if bearer.is_some() {
        return bearer;
    }

    CookieJar::from_headers(headers)
        .get(SESSION_COOKIE)
        .map(|c| c.value().to_string())
}

/// Whether `token` is the configured API key or a live session.
pub fn validate_token(auth_config: &AuthConfig, db: &DbPool, token: &str) -> bool {
    if token.is_empty() {
        return false;
    }

    if auth_config.api_key.as_deref() == Some(token) {
        return true;
    }

    match folio_db::pool::get_conn(db) {
        Ok(conn) => {
            folio_db::queries::sessions::session_is_valid(&conn, token, Utc::now())
                .unwrap_or_else(|e| {
                    tracing::warn!(error = %e, "Session lookup failed");
                    false
                })
        }
        Err(e) => {
            tracing::warn!(error = %e, "No connection for session lookup");
            false
        }
    }
}

/// Whether a request with these headers may use the admin API.
pub fn is_authorized(auth_config: &AuthConfig, db: &DbPool, headers: &HeaderMap) -> bool {
    if !auth_config.enabled {
        return true;
    }
    extract_token(headers).is_some_and(|token| validate_token(auth_config, db, &token))
}

/// Authentication middleware. Applied to protected routes only.
pub async fn auth_middleware(
    State(ctx): State<AppContext>,
    request: Request<axum::body::Body>,
    next: Next,
) -> Response {
    if is_authorized(&ctx.config.auth, &ctx.db, request.headers()) {
        next.run(request).await
    } else {
        tracing::debug!(path = %request.uri().path(), "Rejected unauthenticated request");
        AppError::new(folio_core::Error::Unauthorized(
            "Authentication required".into(),
        ))
        .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use chrono::Duration;
    use folio_db::pool::init_memory_pool;

    fn enabled(api_key: Option<&str>) -> AuthConfig {
        AuthConfig {
            enabled: true,
            api_key: api_key.map(String::from),
            ..AuthConfig::default()
        }
    }

    fn headers(name: header::HeaderName, value: &str) -> HeaderMap {
        let mut h = HeaderMap::new();
        h.insert(name, HeaderValue::from_str(value).unwrap());
        h
    }

    #[test]
    fn bearer_token_extracted() {
        let h = headers(header::AUTHORIZATION, "Bearer abc");
        assert_eq!(extract_token(&h).as_deref(), Some("abc"));
    }

    #[test]
    fn cookie_token_extracted() {
        let h = headers(header::COOKIE, "theme=dark; folio_session=xyz");
        assert_eq!(extract_token(&h).as_deref(), Some("xyz"));
    }

    #[test]
    fn no_token() {
        assert!(extract_token(&HeaderMap::new()).is_none());
        let h = headers(header::AUTHORIZATION, "Basic Zm9vOmJhcg==");
        assert!(extract_token(&h).is_none());
    }

    #[test]
    fn disabled_auth_allows_everything() {
        let pool = init_memory_pool().unwrap();
        assert!(is_authorized(&AuthConfig::default(), &pool, &HeaderMap::new()));
    }

    #[test]
    fn api_key_grants_access() {
        let pool = init_memory_pool().unwrap();
        let cfg = enabled(Some("secret"));
        assert!(is_authorized(
            &cfg,
            &pool,
            &headers(header::AUTHORIZATION, "Bearer secret")
        ));
        assert!(!is_authorized(
            &cfg,
            &pool,
            &headers(header::AUTHORIZATION, "Bearer wrong")
        ));
        assert!(!is_authorized(&cfg, &pool, &HeaderMap::new()));
    }

    #[test]
    fn session_token_grants_access() {
        let pool = init_memory_pool().unwrap();
        let conn = pool.get().unwrap();
        folio_db::queries::sessions::create_session(
            &conn,
            "sess-1",
            Utc::now() + Duration::hours(1),
        )
        .unwrap();
        folio_db::queries::sessions::create_session(
            &conn,
            "sess-old",
            Utc::now() - Duration::hours(1),
        )
        .unwrap();

        let cfg = enabled(None);
        assert!(validate_token(&cfg, &pool, "sess-1"));
        assert!(!validate_token(&cfg, &pool, "sess-old"));
        assert!(is_authorized(
            &cfg,
            &pool,
            &headers(header::COOKIE, "folio_session=sess-1")
        ));
    }

    #[test]
    fn empty_token_never_matches() {
        let pool = init_memory_pool().unwrap();
        let cfg = enabled(Some(""));
        assert!(!validate_token(&cfg, &pool, ""));
    }
}
