//! Public aggregate read: everything the portfolio frontend renders.

use axum::extract::State;
use axum::Json;
use folio_core::config::MediaConfig;
use folio_core::ProjectId;
use folio_db::models::{Profile, Project, SocialLink};
use serde::Serialize;

use crate::context::AppContext;
use crate::error::AppError;

/// Public profile shape.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct PublicProfile {
    pub name: String,
    pub tagline: String,
    pub bio: String,
    /// Image URL, or null.
    pub profile_image: Option<String>,
}

impl PublicProfile {
    pub fn from_model(p: &Profile, media: &MediaConfig) -> Self {
        Self {
            name: p.name.clone(),
            tagline: p.tagline.clone(),
            bio: p.bio.clone(),
            profile_image: p.profile_image.as_deref().map(|k| media.url_for(k)),
        }
    }
}

/// Public project shape.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct PublicProject {
    pub id: ProjectId,
    pub title: String,
    pub description: String,
    pub technologies: Vec<String>,
    /// Image URL, or null.
    pub image: Option<String>,
    /// Live demo URL, or `""` when unset.
    #[serde(rename = "liveDemo")]
    pub live_demo: String,
    /// Repository URL, or `""` when unset.
    #[serde(rename = "githubRepo")]
    pub github_repo: String,
}

impl PublicProject {
    pub fn from_model(p: &Project, media: &MediaConfig) -> Self {
        Self {
            id: p.id,
            title: p.title.clone(),
            description: p.description.clone(),
            technologies: p.technologies_list(),
            image: p.image.as_deref().map(|k| media.url_for(k)),
            live_demo: p.live_demo_url.clone().unwrap_or_default(),
            github_repo: p.github_repo_url.clone().unwrap_or_default(),
        }
    }
}

/// Public social link shape.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct PublicSocialLink {
    pub name: String,
    pub url: String,
    pub icon_name: String,
}

impl From<&SocialLink> for PublicSocialLink {
    fn from(l: &SocialLink) -> Self {
        Self {
            name: l.name.clone(),
            url: l.url.clone(),
            icon_name: l.icon_name.clone(),
        }
    }
}

/// The aggregate document.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct PortfolioData {
    /// The first profile, or `{}` when none exists.
    #[schema(value_type = Object)]
    pub profile: serde_json::Value,
    /// Skill names in display order.
    pub skills: Vec<String>,
    pub projects: Vec<PublicProject>,
    pub social_links: Vec<PublicSocialLink>,
}

/// GET /portfolio-data/
#[utoipa::path(
    get,
    path = "/portfolio-data/",
    responses(
        (status = 200, description = "Profile, skills, projects and social links", body = PortfolioData),
        (status = 500, description = "Database unavailable")
    )
)]
pub async fn get_portfolio_data(
    State(ctx): State<AppContext>,
) -> Result<Json<PortfolioData>, AppError> {
    let conn = folio_db::pool::get_conn(&ctx.db)?;
    let media = &ctx.config.media;

    let profile = match folio_db::queries::profiles::first_profile(&conn)? {
        Some(p) => serde_json::to_value(PublicProfile::from_model(&p, media))
            .map_err(|e| folio_core::Error::Internal(e.to_string()))?,
        None => serde_json::json!({}),
    };

    let skills = folio_db::queries::skills::list_skills(&conn)?
        .into_iter()
        .map(|s| s.name)
        .collect();

    let projects = folio_db::queries::projects::list_projects(&conn)?
        .iter()
        .map(|p| PublicProject::from_model(p, media))
        .collect();

    let social_links = folio_db::queries::social_links::list_social_links(&conn)?
        .iter()
        .map(PublicSocialLink::from)
        .collect();

    Ok(Json(PortfolioData {
        profile,
        skills,
        projects,
        social_links,
    }))
}
