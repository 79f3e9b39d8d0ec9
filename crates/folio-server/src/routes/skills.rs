//! Skill admin route handlers.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use axum_extra::extract::WithRejection;
use folio_core::SkillId;
use folio_db::models::{Skill, SkillFields};
use serde::{Deserialize, Serialize};

use crate::context::AppContext;
use crate::error::AppError;
use crate::routes::{JsonBody, OrderUpdate, PathId};
use crate::validation;

/// Create/update payload.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct SkillRequest {
    pub name: String,
    #[serde(default)]
    pub order: u32,
}

impl SkillRequest {
    fn into_fields(self) -> Result<SkillFields, AppError> {
        validation::required("name", &self.name, validation::NAME_MAX)?;
        Ok(SkillFields {
            name: self.name.trim().to_string(),
            order: self.order,
        })
    }
}

/// Skill response.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct SkillResponse {
    pub id: SkillId,
    pub name: String,
    pub order: u32,
}

impl From<Skill> for SkillResponse {
    fn from(s: Skill) -> Self {
        Self {
            id: s.id,
            name: s.name,
            order: s.order,
        }
    }
}

/// GET /api/admin/skills
#[utoipa::path(
    get,
    path = "/api/admin/skills",
    responses(
        (status = 200, description = "All skills in display order", body = Vec<SkillResponse>)
    )
)]
pub async fn list_skills(
    State(ctx): State<AppContext>,
) -> Result<Json<Vec<SkillResponse>>, AppError> {
    let conn = folio_db::pool::get_conn(&ctx.db)?;
    let skills = folio_db::queries::skills::list_skills(&conn)?;
    Ok(Json(skills.into_iter().map(SkillResponse::from).collect()))
}

/// POST /api/admin/skills
#[utoipa::path(
    post,
    path = "/api/admin/skills",
    request_body = SkillRequest,
    responses(
        (status = 201, description = "Skill created", body = SkillResponse),
        (status = 400, description = "Invalid payload")
    )
)]
pub async fn create_skill(
    State(ctx): State<AppContext>,
    WithRejection(Json(payload), _): JsonBody<SkillRequest>,
) -> Result<impl IntoResponse, AppError> {
    let fields = payload.into_fields()?;
    let conn = folio_db::pool::get_conn(&ctx.db)?;
    let skill = folio_db::queries::skills::create_skill(&conn, &fields)?;
    tracing::info!(id = %skill.id, name = %skill.name, "Created skill");
    Ok((StatusCode::CREATED, Json(SkillResponse::from(skill))))
}

/// GET /api/admin/skills/:id
#[utoipa::path(
    get,
    path = "/api/admin/skills/{id}",
    params(("id" = i64, Path, description = "Skill ID")),
    responses(
        (status = 200, description = "Skill", body = SkillResponse),
        (status = 404, description = "Skill not found")
    )
)]
pub async fn get_skill(
    State(ctx): State<AppContext>,
    WithRejection(Path(id), _): PathId<SkillId>,
) -> Result<Json<SkillResponse>, AppError> {
    let conn = folio_db::pool::get_conn(&ctx.db)?;
    let skill = folio_db::queries::skills::get_skill(&conn, id)?
        .ok_or_else(|| folio_core::Error::not_found("skill", id))?;
    Ok(Json(skill.into()))
}

/// PUT /api/admin/skills/:id
#[utoipa::path(
    put,
    path = "/api/admin/skills/{id}",
    params(("id" = i64, Path, description = "Skill ID")),
    request_body = SkillRequest,
    responses(
        (status = 200, description = "Skill updated", body = SkillResponse),
        (status = 400, description = "Invalid payload"),
        (status = 404, description = "Skill not found")
    )
)]
pub async fn update_skill(
    State(ctx): State<AppContext>,
    WithRejection(Path(id), _): PathId<SkillId>,
    WithRejection(Json(payload), _): JsonBody<SkillRequest>,
) -> Result<Json<SkillResponse>, AppError> {
    let fields = payload.into_fields()?;
    let conn = folio_db::pool::get_conn(&ctx.db)?;
    let skill = folio_db::queries::skills::update_skill(&conn, id, &fields)?
        .ok_or_else(|| folio_core::Error::not_found("skill", id))?;
    Ok(Json(skill.into()))
}

/// DELETE /api/admin/skills/:id
#[utoipa::path(
    delete,
    path = "/api/admin/skills/{id}",
    params(("id" = i64, Path, description = "Skill ID")),
    responses(
        (status = 204, description = "Skill deleted"),
        (status = 404, description = "Skill not found")
    )
)]
pub async fn delete_skill(
    State(ctx): State<AppContext>,
    WithRejection(Path(id), _): PathId<SkillId>,
) -> Result<impl IntoResponse, AppError> {
    let conn = folio_db::pool::get_conn(&ctx.db)?;
    if !folio_db::queries::skills::delete_skill(&conn, id)? {
        return Err(folio_core::Error::not_found("skill", id).into());
    }
    tracing::info!(%id, "Deleted skill");
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/admin/skills/order
#[utoipa::path(
    put,
    path = "/api/admin/skills/order",
    request_body = Vec<OrderUpdate>,
    responses(
        (status = 200, description = "Skills reordered", body = Vec<SkillResponse>),
        (status = 404, description = "Unknown skill ID; nothing changed")
    )
)]
pub async fn reorder_skills(
    State(ctx): State<AppContext>,
    WithRejection(Json(updates), _): JsonBody<Vec<OrderUpdate>>,
) -> Result<Json<Vec<SkillResponse>>, AppError> {
    let updates: Vec<(SkillId, u32)> = updates
        .iter()
        .map(|u| (SkillId::from(u.id), u.order))
        .collect();

    let conn = folio_db::pool::get_conn(&ctx.db)?;
    folio_db::queries::skills::reorder_skills(&conn, &updates)?;
    let skills = folio_db::queries::skills::list_skills(&conn)?;
    Ok(Json(skills.into_iter().map(SkillResponse::from).collect()))
}
