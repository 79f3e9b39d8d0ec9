//! Profile admin route handlers, including image upload.

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use axum_extra::extract::WithRejection;
use folio_core::config::MediaConfig;
use folio_core::ProfileId;
use folio_db::models::{Profile, ProfileFields, DEFAULT_PROFILE_NAME, DEFAULT_PROFILE_TAGLINE};
use folio_db::pool::PooledConnection;
use serde::{Deserialize, Serialize};

use crate::context::AppContext;
use crate::error::AppError;
use crate::media::PROFILE_IMAGES;
use crate::routes::{settle_upload, JsonBody, PathId};
use crate::validation;

/// Create/update payload. Omitted fields take the schema defaults.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
#[serde(default)]
pub struct ProfileRequest {
    pub name: String,
    pub tagline: String,
    pub bio: String,
}

impl Default for ProfileRequest {
    fn default() -> Self {
        Self {
            name: DEFAULT_PROFILE_NAME.into(),
            tagline: DEFAULT_PROFILE_TAGLINE.into(),
            bio: String::new(),
        }
    }
}

impl ProfileRequest {
    fn into_fields(self) -> Result<ProfileFields, AppError> {
        validation::required("name", &self.name, validation::NAME_MAX)?;
        validation::required("tagline", &self.tagline, validation::TAGLINE_MAX)?;
        Ok(ProfileFields {
            name: self.name.trim().to_string(),
            tagline: self.tagline.trim().to_string(),
            bio: self.bio,
            profile_image: None,
        })
    }
}

/// Profile response.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ProfileResponse {
    pub id: ProfileId,
    pub name: String,
    pub tagline: String,
    pub bio: String,
    /// Image URL, or null.
    pub profile_image: Option<String>,
}

impl ProfileResponse {
    fn from_model(p: Profile, media: &MediaConfig) -> Self {
        Self {
            id: p.id,
            profile_image: p.profile_image.as_deref().map(|k| media.url_for(k)),
            name: p.name,
            tagline: p.tagline,
            bio: p.bio,
        }
    }
}

/// GET /api/admin/profiles
#[utoipa::path(
    get,
    path = "/api/admin/profiles",
    responses(
        (status = 200, description = "All profiles by ID; the first is the public one", body = Vec<ProfileResponse>)
    )
)]
pub async fn list_profiles(
    State(ctx): State<AppContext>,
) -> Result<Json<Vec<ProfileResponse>>, AppError> {
    let conn = folio_db::pool::get_conn(&ctx.db)?;
    let profiles = folio_db::queries::profiles::list_profiles(&conn)?;
    Ok(Json(
        profiles
            .into_iter()
            .map(|p| ProfileResponse::from_model(p, &ctx.config.media))
            .collect(),
    ))
}

/// POST /api/admin/profiles
#[utoipa::path(
    post,
    path = "/api/admin/profiles",
    request_body = ProfileRequest,
    responses(
        (status = 201, description = "Profile created", body = ProfileResponse),
        (status = 400, description = "Invalid payload")
    )
)]
pub async fn create_profile(
    State(ctx): State<AppContext>,
    WithRejection(Json(payload), _): JsonBody<ProfileRequest>,
) -> Result<impl IntoResponse, AppError> {
    let fields = payload.into_fields()?;
    let conn = folio_db::pool::get_conn(&ctx.db)?;
    let profile = folio_db::queries::profiles::create_profile(&conn, &fields)?;
    tracing::info!(id = %profile.id, name = %profile.name, "Created profile");
    Ok((
        StatusCode::CREATED,
        Json(ProfileResponse::from_model(profile, &ctx.config.media)),
    ))
}

/// GET /api/admin/profiles/:id
#[utoipa::path(
    get,
    path = "/api/admin/profiles/{id}",
    params(("id" = i64, Path, description = "Profile ID")),
    responses(
        (status = 200, description = "Profile", body = ProfileResponse),
        (status = 404, description = "Profile not found")
    )
)]
pub async fn get_profile(
    State(ctx): State<AppContext>,
    WithRejection(Path(id), _): PathId<ProfileId>,
) -> Result<Json<ProfileResponse>, AppError> {
    let conn = folio_db::pool::get_conn(&ctx.db)?;
    let profile = find(&conn, id)?;
    Ok(Json(ProfileResponse::from_model(profile, &ctx.config.media)))
}

/// PUT /api/admin/profiles/:id
#[utoipa::path(
    put,
    path = "/api/admin/profiles/{id}",
    params(("id" = i64, Path, description = "Profile ID")),
    request_body = ProfileRequest,
    responses(
        (status = 200, description = "Profile updated", body = ProfileResponse),
        (status = 400, description = "Invalid payload"),
        (status = 404, description = "Profile not found")
    )
)]
pub async fn update_profile(
    State(ctx): State<AppContext>,
    WithRejection(Path(id), _): PathId<ProfileId>,
    WithRejection(Json(payload), _): JsonBody<ProfileRequest>,
) -> Result<Json<ProfileResponse>, AppError> {
    let fields = payload.into_fields()?;
    let conn = folio_db::pool::get_conn(&ctx.db)?;
    let profile = folio_db::queries::profiles::update_profile(&conn, id, &fields)?
        .ok_or_else(|| folio_core::Error::not_found("profile", id))?;
    Ok(Json(ProfileResponse::from_model(profile, &ctx.config.media)))
}

/// DELETE /api/admin/profiles/:id
#[utoipa::path(
    delete,
    path = "/api/admin/profiles/{id}",
    params(("id" = i64, Path, description = "Profile ID")),
    responses(
        (status = 204, description = "Profile and its image deleted"),
        (status = 404, description = "Profile not found")
    )
)]
pub async fn delete_profile(
    State(ctx): State<AppContext>,
    WithRejection(Path(id), _): PathId<ProfileId>,
) -> Result<impl IntoResponse, AppError> {
    let conn = folio_db::pool::get_conn(&ctx.db)?;
    if !folio_db::queries::profiles::delete_profile(&conn, ctx.media.as_ref(), id)? {
        return Err(folio_core::Error::not_found("profile", id).into());
    }
    tracing::info!(%id, "Deleted profile");
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/admin/profiles/:id/image
#[utoipa::path(
    put,
    path = "/api/admin/profiles/{id}/image",
    params(("id" = i64, Path, description = "Profile ID")),
    request_body(content = Vec<u8>, content_type = "application/octet-stream"),
    responses(
        (status = 200, description = "Image replaced", body = ProfileResponse),
        (status = 400, description = "Body is not an accepted image"),
        (status = 404, description = "Profile not found")
    )
)]
pub async fn upload_image(
    State(ctx): State<AppContext>,
    WithRejection(Path(id), _): PathId<ProfileId>,
    body: Bytes,
) -> Result<Json<ProfileResponse>, AppError> {
    let conn = folio_db::pool::get_conn(&ctx.db)?;
    let current = find(&conn, id)?;

    let key = ctx.media.store(PROFILE_IMAGES, &id.to_string(), &body)?;
    let saved = folio_db::queries::profiles::set_profile_image(
        &conn,
        ctx.media.as_ref(),
        id,
        Some(key.as_str()),
    );
    let profile = settle_upload(
        ctx.media.as_ref(),
        &key,
        current.profile_image.as_deref(),
        saved,
        "profile",
        id,
    )?;
    Ok(Json(ProfileResponse::from_model(profile, &ctx.config.media)))
}

/// DELETE /api/admin/profiles/:id/image
#[utoipa::path(
    delete,
    path = "/api/admin/profiles/{id}/image",
    params(("id" = i64, Path, description = "Profile ID")),
    responses(
        (status = 200, description = "Image cleared", body = ProfileResponse),
        (status = 404, description = "Profile not found")
    )
)]
pub async fn clear_image(
    State(ctx): State<AppContext>,
    WithRejection(Path(id), _): PathId<ProfileId>,
) -> Result<Json<ProfileResponse>, AppError> {
    let conn = folio_db::pool::get_conn(&ctx.db)?;
    let profile =
        folio_db::queries::profiles::set_profile_image(&conn, ctx.media.as_ref(), id, None)?
            .ok_or_else(|| folio_core::Error::not_found("profile", id))?;
    Ok(Json(ProfileResponse::from_model(profile, &ctx.config.media)))
}

fn find(conn: &PooledConnection, id: ProfileId) -> Result<Profile, AppError> {
    folio_db::queries::profiles::get_profile(conn, id)?
        .ok_or_else(|| folio_core::Error::not_found("profile", id).into())
}
