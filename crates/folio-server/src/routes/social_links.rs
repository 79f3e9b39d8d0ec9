//! Social link admin route handlers.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use axum_extra::extract::WithRejection;
use folio_core::SocialLinkId;
use folio_db::models::{SocialLink, SocialLinkFields};
use serde::{Deserialize, Serialize};

use crate::context::AppContext;
use crate::error::AppError;
use crate::routes::{JsonBody, OrderUpdate, PathId};
use crate::validation;

/// Create/update payload.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct SocialLinkRequest {
    pub name: String,
    pub url: String,
    /// Icon name from the frontend's icon set, e.g. `Github`.
    pub icon_name: String,
    #[serde(default)]
    pub order: u32,
}

impl SocialLinkRequest {
    fn into_fields(self) -> Result<SocialLinkFields, AppError> {
        validation::required("name", &self.name, validation::SHORT_MAX)?;
        validation::http_url("url", self.url.trim())?;
        validation::required("icon_name", &self.icon_name, validation::SHORT_MAX)?;
        Ok(SocialLinkFields {
            name: self.name.trim().to_string(),
            url: self.url.trim().to_string(),
            icon_name: self.icon_name.trim().to_string(),
            order: self.order,
        })
    }
}

/// Social link response.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct SocialLinkResponse {
    pub id: SocialLinkId,
    pub name: String,
    pub url: String,
    pub icon_name: String,
    pub order: u32,
}

impl From<SocialLink> for SocialLinkResponse {
    fn from(l: SocialLink) -> Self {
        Self {
            id: l.id,
            name: l.name,
            url: l.url,
            icon_name: l.icon_name,
            order: l.order,
        }
    }
}

/// GET /api/admin/social-links
#[utoipa::path(
    get,
    path = "/api/admin/social-links",
    responses(
        (status = 200, description = "All social links in display order", body = Vec<SocialLinkResponse>)
    )
)]
pub async fn list_social_links(
    State(ctx): State<AppContext>,
) -> Result<Json<Vec<SocialLinkResponse>>, AppError> {
    let conn = folio_db::pool::get_conn(&ctx.db)?;
    let links = folio_db::queries::social_links::list_social_links(&conn)?;
    Ok(Json(links.into_iter().map(SocialLinkResponse::from).collect()))
}

/// POST /api/admin/social-links
#[utoipa::path(
    post,
    path = "/api/admin/social-links",
    request_body = SocialLinkRequest,
    responses(
        (status = 201, description = "Social link created", body = SocialLinkResponse),
        (status = 400, description = "Invalid payload")
    )
)]
pub async fn create_social_link(
    State(ctx): State<AppContext>,
    WithRejection(Json(payload), _): JsonBody<SocialLinkRequest>,
) -> Result<impl IntoResponse, AppError> {
    let fields = payload.into_fields()?;
    let conn = folio_db::pool::get_conn(&ctx.db)?;
    let link = folio_db::queries::social_links::create_social_link(&conn, &fields)?;
    tracing::info!(id = %link.id, name = %link.name, "Created social link");
    Ok((StatusCode::CREATED, Json(SocialLinkResponse::from(link))))
}

/// GET /api/admin/social-links/:id
#[utoipa::path(
    get,
    path = "/api/admin/social-links/{id}",
    params(("id" = i64, Path, description = "Social link ID")),
    responses(
        (status = 200, description = "Social link", body = SocialLinkResponse),
        (status = 404, description = "Social link not found")
    )
)]
pub async fn get_social_link(
    State(ctx): State<AppContext>,
    WithRejection(Path(id), _): PathId<SocialLinkId>,
) -> Result<Json<SocialLinkResponse>, AppError> {
    let conn = folio_db::pool::get_conn(&ctx.db)?;
    let link = folio_db::queries::social_links::get_social_link(&conn, id)?
        .ok_or_else(|| folio_core::Error::not_found("social link", id))?;
    Ok(Json(link.into()))
}

/// PUT /api/admin/social-links/:id
#[utoipa::path(
    put,
    path = "/api/admin/social-links/{id}",
    params(("id" = i64, Path, description = "Social link ID")),
    request_body = SocialLinkRequest,
    responses(
        (status = 200, description = "Social link updated", body = SocialLinkResponse),
        (status = 400, description = "Invalid payload"),
        (status = 404, description = "Social link not found")
    )
)]
pub async fn update_social_link(
    State(ctx): State<AppContext>,
    WithRejection(Path(id), _): PathId<SocialLinkId>,
    WithRejection(Json(payload), _): JsonBody<SocialLinkRequest>,
) -> Result<Json<SocialLinkResponse>, AppError> {
    let fields = payload.into_fields()?;
    let conn = folio_db::pool::get_conn(&ctx.db)?;
    let link = folio_db::queries::social_links::update_social_link(&conn, id, &fields)?
        .ok_or_else(|| folio_core::Error::not_found("social link", id))?;
    Ok(Json(link.into()))
}

/// DELETE /api/admin/social-links/:id
#[utoipa::path(
    delete,
    path = "/api/admin/social-links/{id}",
    params(("id" = i64, Path, description = "Social link ID")),
    responses(
        (status = 204, description = "Social link deleted"),
        (status = 404, description = "Social link not found")
    )
)]
pub async fn delete_social_link(
    State(ctx): State<AppContext>,
    WithRejection(Path(id), _): PathId<SocialLinkId>,
) -> Result<impl IntoResponse, AppError> {
    let conn = folio_db::pool::get_conn(&ctx.db)?;
    if !folio_db::queries::social_links::delete_social_link(&conn, id)? {
        return Err(folio_core::Error::not_found("social link", id).into());
    }
    tracing::info!(%id, "Deleted social link");
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/admin/social-links/order
#[utoipa::path(
    put,
    path = "/api/admin/social-links/order",
    request_body = Vec<OrderUpdate>,
    responses(
        (status = 200, description = "Social links reordered", body = Vec<SocialLinkResponse>),
        (status = 404, description = "Unknown social link ID; nothing changed")
    )
)]
pub async fn reorder_social_links(
    State(ctx): State<AppContext>,
    WithRejection(Json(updates), _): JsonBody<Vec<OrderUpdate>>,
) -> Result<Json<Vec<SocialLinkResponse>>, AppError> {
    let updates: Vec<(SocialLinkId, u32)> = updates
        .iter()
        .map(|u| (SocialLinkId::from(u.id), u.order))
        .collect();

    let conn = folio_db::pool::get_conn(&ctx.db)?;
    folio_db::queries::social_links::reorder_social_links(&conn, &updates)?;
    let links = folio_db::queries::social_links::list_social_links(&conn)?;
    Ok(Json(links.into_iter().map(SocialLinkResponse::from).collect()))
}
