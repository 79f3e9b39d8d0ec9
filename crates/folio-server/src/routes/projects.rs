//! Project admin route handlers, including image upload.

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use axum_extra::extract::WithRejection;
use folio_core::config::MediaConfig;
use folio_core::ProjectId;
use folio_db::models::{Project, ProjectFields};
use folio_db::pool::PooledConnection;
use serde::{Deserialize, Serialize};

use crate::context::AppContext;
use crate::error::AppError;
use crate::media::PROJECT_IMAGES;
use crate::routes::{settle_upload, JsonBody, OrderUpdate, PathId};
use crate::validation;

/// Create/update payload. The image is managed through the image endpoints
/// and is left unchanged by a full update.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct ProjectRequest {
    pub title: String,
    pub description: String,
    /// Comma-separated technology names.
    pub technologies: String,
    #[serde(default, alias = "liveDemo")]
    pub live_demo_url: Option<String>,
    #[serde(default, alias = "githubRepo")]
    pub github_repo_url: Option<String>,
    #[serde(default)]
    pub order: u32,
}

impl ProjectRequest {
    fn into_fields(self) -> Result<ProjectFields, AppError> {
        validation::required("title", &self.title, validation::TITLE_MAX)?;
        validation::required("description", &self.description, usize::MAX)?;
        validation::required("technologies", &self.technologies, validation::TECHNOLOGIES_MAX)?;
        let live_demo_url =
            validation::optional_url("live_demo_url", self.live_demo_url.as_deref())?;
        let github_repo_url =
            validation::optional_url("github_repo_url", self.github_repo_url.as_deref())?;

        Ok(ProjectFields {
            title: self.title.trim().to_string(),
            description: self.description,
            technologies: self.technologies,
            image: None,
            live_demo_url,
            github_repo_url,
            order: self.order,
        })
    }
}

/// Project response.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ProjectResponse {
    pub id: ProjectId,
    pub title: String,
    pub description: String,
    pub technologies: String,
    /// Image URL, or null.
    pub image: Option<String>,
    pub live_demo_url: Option<String>,
    pub github_repo_url: Option<String>,
    pub order: u32,
}

impl ProjectResponse {
    fn from_model(p: Project, media: &MediaConfig) -> Self {
        Self {
            id: p.id,
            image: p.image.as_deref().map(|k| media.url_for(k)),
            title: p.title,
            description: p.description,
            technologies: p.technologies,
            live_demo_url: p.live_demo_url,
            github_repo_url: p.github_repo_url,
            order: p.order,
        }
    }
}

/// GET /api/admin/projects
#[utoipa::path(
    get,
    path = "/api/admin/projects",
    responses(
        (status = 200, description = "All projects in display order", body = Vec<ProjectResponse>)
    )
)]
pub async fn list_projects(
    State(ctx): State<AppContext>,
) -> Result<Json<Vec<ProjectResponse>>, AppError> {
    let conn = folio_db::pool::get_conn(&ctx.db)?;
    let projects = folio_db::queries::projects::list_projects(&conn)?;
    Ok(Json(
        projects
            .into_iter()
            .map(|p| ProjectResponse::from_model(p, &ctx.config.media))
            .collect(),
    ))
}

/// POST /api/admin/projects
#[utoipa::path(
    post,
    path = "/api/admin/projects",
    request_body = ProjectRequest,
    responses(
        (status = 201, description = "Project created", body = ProjectResponse),
        (status = 400, description = "Invalid payload")
    )
)]
pub async fn create_project(
    State(ctx): State<AppContext>,
    WithRejection(Json(payload), _): JsonBody<ProjectRequest>,
) -> Result<impl IntoResponse, AppError> {
    let fields = payload.into_fields()?;
    let conn = folio_db::pool::get_conn(&ctx.db)?;
    let project = folio_db::queries::projects::create_project(&conn, &fields)?;
    tracing::info!(id = %project.id, title = %project.title, "Created project");
    Ok((
        StatusCode::CREATED,
        Json(ProjectResponse::from_model(project, &ctx.config.media)),
    ))
}

/// GET /api/admin/projects/:id
#[utoipa::path(
    get,
    path = "/api/admin/projects/{id}",
    params(("id" = i64, Path, description = "Project ID")),
    responses(
        (status = 200, description = "Project", body = ProjectResponse),
        (status = 404, description = "Project not found")
    )
)]
pub async fn get_project(
    State(ctx): State<AppContext>,
    WithRejection(Path(id), _): PathId<ProjectId>,
) -> Result<Json<ProjectResponse>, AppError> {
    let conn = folio_db::pool::get_conn(&ctx.db)?;
    let project = find(&conn, id)?;
    Ok(Json(ProjectResponse::from_model(project, &ctx.config.media)))
}

/// PUT /api/admin/projects/:id
#[utoipa::path(
    put,
    path = "/api/admin/projects/{id}",
    params(("id" = i64, Path, description = "Project ID")),
    request_body = ProjectRequest,
    responses(
        (status = 200, description = "Project updated", body = ProjectResponse),
        (status = 400, description = "Invalid payload"),
        (status = 404, description = "Project not found")
    )
)]
pub async fn update_project(
    State(ctx): State<AppContext>,
    WithRejection(Path(id), _): PathId<ProjectId>,
    WithRejection(Json(payload), _): JsonBody<ProjectRequest>,
) -> Result<Json<ProjectResponse>, AppError> {
    let fields = payload.into_fields()?;
    let conn = folio_db::pool::get_conn(&ctx.db)?;
    let project = folio_db::queries::projects::update_project(&conn, id, &fields)?
        .ok_or_else(|| folio_core::Error::not_found("project", id))?;
    Ok(Json(ProjectResponse::from_model(project, &ctx.config.media)))
}

/// DELETE /api/admin/projects/:id
#[utoipa::path(
    delete,
    path = "/api/admin/projects/{id}",
    params(("id" = i64, Path, description = "Project ID")),
    responses(
        (status = 204, description = "Project and its image deleted"),
        (status = 404, description = "Project not found")
    )
)]
pub async fn delete_project(
    State(ctx): State<AppContext>,
    WithRejection(Path(id), _): PathId<ProjectId>,
) -> Result<impl IntoResponse, AppError> {
    let conn = folio_db::pool::get_conn(&ctx.db)?;
    if !folio_db::queries::projects::delete_project(&conn, ctx.media.as_ref(), id)? {
        return Err(folio_core::Error::not_found("project", id).into());
    }
    tracing::info!(%id, "Deleted project");
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/admin/projects/order
#[utoipa::path(
    put,
    path = "/api/admin/projects/order",
    request_body = Vec<OrderUpdate>,
    responses(
        (status = 200, description = "Projects reordered", body = Vec<ProjectResponse>),
        (status = 404, description = "Unknown project ID; nothing changed")
    )
)]
pub async fn reorder_projects(
    State(ctx): State<AppContext>,
    WithRejection(Json(updates), _): JsonBody<Vec<OrderUpdate>>,
) -> Result<Json<Vec<ProjectResponse>>, AppError> {
    let updates: Vec<(ProjectId, u32)> = updates
        .iter()
        .map(|u| (ProjectId::from(u.id), u.order))
        .collect();

    let conn = folio_db::pool::get_conn(&ctx.db)?;
    folio_db::queries::projects::reorder_projects(&conn, &updates)?;
    let projects = folio_db::queries::projects::list_projects(&conn)?;
    Ok(Json(
        projects
            .into_iter()
            .map(|p| ProjectResponse::from_model(p, &ctx.config.media))
            .collect(),
    ))
}

/// PUT /api/admin/projects/:id/image
#[utoipa::path(
    put,
    path = "/api/admin/projects/{id}/image",
    params(("id" = i64, Path, description = "Project ID")),
    request_body(content = Vec<u8>, content_type = "application/octet-stream"),
    responses(
        (status = 200, description = "Image replaced", body = ProjectResponse),
        (status = 400, description = "Body is not an accepted image"),
        (status = 404, description = "Project not found")
    )
)]
pub async fn upload_image(
    State(ctx): State<AppContext>,
    WithRejection(Path(id), _): PathId<ProjectId>,
    body: Bytes,
) -> Result<Json<ProjectResponse>, AppError> {
    let conn = folio_db::pool::get_conn(&ctx.db)?;
    let current = find(&conn, id)?;

    let key = ctx.media.store(PROJECT_IMAGES, &id.to_string(), &body)?;
    let saved = folio_db::queries::projects::set_project_image(
        &conn,
        ctx.media.as_ref(),
        id,
        Some(key.as_str()),
    );
    let project = settle_upload(
        ctx.media.as_ref(),
        &key,
        current.image.as_deref(),
        saved,
        "project",
        id,
    )?;
    Ok(Json(ProjectResponse::from_model(project, &ctx.config.media)))
}

/// DELETE /api/admin/projects/:id/image
#[utoipa::path(
    delete,
    path = "/api/admin/projects/{id}/image",
    params(("id" = i64, Path, description = "Project ID")),
    responses(
        (status = 200, description = "Image cleared", body = ProjectResponse),
        (status = 404, description = "Project not found")
    )
)]
pub async fn clear_image(
    State(ctx): State<AppContext>,
    WithRejection(Path(id), _): PathId<ProjectId>,
) -> Result<Json<ProjectResponse>, AppError> {
    let conn = folio_db::pool::get_conn(&ctx.db)?;
    let project =
        folio_db::queries::projects::set_project_image(&conn, ctx.media.as_ref(), id, None)?
            .ok_or_else(|| folio_core::Error::not_found("project", id))?;
    Ok(Json(ProjectResponse::from_model(project, &ctx.config.media)))
}

fn find(conn: &PooledConnection, id: ProjectId) -> Result<Project, AppError> {
    folio_db::queries::projects::get_project(conn, id)?
        .ok_or_else(|| folio_core::Error::not_found("project", id).into())
}
