//! Authentication route handlers: login, logout, status.

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use axum_extra::extract::WithRejection;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::context::AppContext;
use crate::error::AppError;
use crate::middleware::auth::{extract_token, validate_token, SESSION_COOKIE};
use crate::routes::JsonBody;

/// Upper bound on session lifetime (ten years).
const MAX_SESSION_HOURS: i64 = 24 * 365 * 10;

/// Login request payload.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Login response.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct AuthResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

/// Auth status response.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct AuthStatusResponse {
    pub auth_enabled: bool,
    pub authenticated: bool,
}

/// POST /api/auth/login
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(ctx): State<AppContext>,
    jar: CookieJar,
    WithRejection(Json(payload), _): JsonBody<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let auth_config = &ctx.config.auth;

    if !auth_config.enabled {
        return Ok((
            jar,
            Json(AuthResponse {
                success: true,
                message: "Auth disabled".into(),
                token: None,
            }),
        ));
    }

    let password_valid = match (&auth_config.username, &auth_config.password_hash) {
        (Some(expected_user), Some(hash)) if payload.username == *expected_user => {
            bcrypt::verify(&payload.password, hash).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Configured password_hash is not a valid bcrypt hash");
                false
            })
        }
        _ => false,
    };

    if !password_valid {
        tracing::info!(username = %payload.username, "Rejected login");
        return Err(folio_core::Error::Unauthorized("Invalid credentials".into()).into());
    }

    let conn = folio_db::pool::get_conn(&ctx.db)?;
    let now = Utc::now();
    let removed = folio_db::queries::sessions::delete_expired_sessions(&conn, now)?;
    if removed > 0 {
        tracing::debug!("Purged {removed} expired session(s)");
    }

    let hours = i64::try_from(auth_config.session_timeout_hours)
        .unwrap_or(MAX_SESSION_HOURS)
        .min(MAX_SESSION_HOURS);
    let token = uuid::Uuid::new_v4().to_string();
    folio_db::queries::sessions::create_session(&conn, &token, now + Duration::hours(hours))?;

    let cookie = Cookie::build((SESSION_COOKIE, token.clone()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::hours(hours));

    tracing::info!(username = %payload.username, "Admin logged in");

    Ok((
        jar.add(cookie),
        Json(AuthResponse {
            success: true,
            message: "Login successful".into(),
            token: Some(token),
        }),
    ))
}

/// POST /api/auth/logout
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses(
        (status = 200, description = "Logged out")
    )
)]
pub async fn logout(
    State(ctx): State<AppContext>,
    headers: HeaderMap,
    jar: CookieJar,
) -> impl IntoResponse {
    if let Some(token) = extract_token(&headers) {
        if let Ok(conn) = folio_db::pool::get_conn(&ctx.db) {
            if let Err(e) = folio_db::queries::sessions::delete_session(&conn, &token) {
                tracing::warn!(error = %e, "Failed to delete session");
            }
        }
    }

    let jar = jar.remove(Cookie::build(SESSION_COOKIE).path("/"));
    (jar, StatusCode::OK)
}

/// GET /api/auth/status
#[utoipa::path(
    get,
    path = "/api/auth/status",
    responses(
        (status = 200, description = "Auth status", body = AuthStatusResponse)
    )
)]
pub async fn auth_status(
    State(ctx): State<AppContext>,
    headers: HeaderMap,
) -> Json<AuthStatusResponse> {
    let auth_config = &ctx.config.auth;

    if !auth_config.enabled {
        return Json(AuthStatusResponse {
            auth_enabled: false,
            authenticated: true,
        });
    }

    let authenticated = extract_token(&headers)
        .is_some_and(|token| validate_token(auth_config, &ctx.db, &token));

    Json(AuthStatusResponse {
        auth_enabled: true,
        authenticated,
    })
}
