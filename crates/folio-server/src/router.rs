//! Axum router construction.
//!
//! Builds the full application router with the public aggregate, the admin
//! API, middleware layers, media serving, and optional frontend serving.

use axum::extract::DefaultBodyLimit;
use axum::http::HeaderValue;
use axum::middleware;
use axum::routing::{get, post, put};
use axum::Router;
use folio_core::config::CorsConfig;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::context::AppContext;
use crate::middleware::auth::auth_middleware;
use crate::middleware::request_id::request_id_middleware;
use crate::routes;

#[derive(OpenApi)]
#[openapi(
    paths(
        routes::health::health_check,
        routes::portfolio::get_portfolio_data,
        routes::auth::login,
        routes::auth::logout,
        routes::auth::auth_status,
        routes::profiles::list_profiles,
        routes::profiles::create_profile,
        routes::profiles::get_profile,
        routes::profiles::update_profile,
        routes::profiles::delete_profile,
        routes::profiles::upload_image,
        routes::profiles::clear_image,
        routes::skills::list_skills,
        routes::skills::create_skill,
        routes::skills::get_skill,
        routes::skills::update_skill,
        routes::skills::delete_skill,
        routes::skills::reorder_skills,
        routes::projects::list_projects,
        routes::projects::create_project,
        routes::projects::get_project,
        routes::projects::update_project,
        routes::projects::delete_project,
        routes::projects::reorder_projects,
        routes::projects::upload_image,
        routes::projects::clear_image,
        routes::social_links::list_social_links,
        routes::social_links::create_social_link,
        routes::social_links::get_social_link,
        routes::social_links::update_social_link,
        routes::social_links::delete_social_link,
        routes::social_links::reorder_social_links,
    ),
    components(schemas(
        routes::OrderUpdate,
        routes::health::HealthResponse,
        routes::portfolio::PortfolioData,
        routes::portfolio::PublicProfile,
        routes::portfolio::PublicProject,
        routes::portfolio::PublicSocialLink,
        routes::auth::LoginRequest,
        routes::auth::AuthResponse,
        routes::auth::AuthStatusResponse,
        routes::profiles::ProfileRequest,
        routes::profiles::ProfileResponse,
        routes::skills::SkillRequest,
        routes::skills::SkillResponse,
        routes::projects::ProjectRequest,
        routes::projects::ProjectResponse,
        routes::social_links::SocialLinkRequest,
        routes::social_links::SocialLinkResponse,
    ))
)]
pub struct ApiDoc;

/// Build the complete Axum router.
pub fn build_router(ctx: AppContext) -> Router {
    let cors = cors_layer(&ctx.config.cors);

    // Auth routes -- always accessible.
    let auth_routes = Router::new()
        .route("/auth/login", post(routes::auth::login))
        .route("/auth/logout", post(routes::auth::logout))
        .route("/auth/status", get(routes::auth::auth_status));

    let image_limit = DefaultBodyLimit::max(routes::MAX_IMAGE_BYTES);

    // Admin routes -- behind auth.
    let admin_routes = Router::new()
        // Profiles
        .route(
            "/profiles",
            get(routes::profiles::list_profiles).post(routes::profiles::create_profile),
        )
        .route(
            "/profiles/:id",
            get(routes::profiles::get_profile)
                .put(routes::profiles::update_profile)
                .delete(routes::profiles::delete_profile),
        )
        .route(
            "/profiles/:id/image",
            put(routes::profiles::upload_image)
                .delete(routes::profiles::clear_image)
                .layer(image_limit.clone()),
        )
        // Skills
        .route(
            "/skills",
            get(routes::skills::list_skills).post(routes::skills::create_skill),
        )
        .route("/skills/order", put(routes::skills::reorder_skills))
        .route(
            "/skills/:id",
            get(routes::skills::get_skill)
                .put(routes::skills::update_skill)
                .delete(routes::skills::delete_skill),
        )
        // Projects
        .route(
            "/projects",
            get(routes::projects::list_projects).post(routes::projects::create_project),
        )
        .route("/projects/order", put(routes::projects::reorder_projects))
        .route(
            "/projects/:id",
            get(routes::projects::get_project)
                .put(routes::projects::update_project)
                .delete(routes::projects::delete_project),
        )
        .route(
            "/projects/:id/image",
            put(routes::projects::upload_image)
                .delete(routes::projects::clear_image)
                .layer(image_limit),
        )
        // Social links
        .route(
            "/social-links",
            get(routes::social_links::list_social_links)
                .post(routes::social_links::create_social_link),
        )
        .route(
            "/social-links/order",
            put(routes::social_links::reorder_social_links),
        )
        .route(
            "/social-links/:id",
            get(routes::social_links::get_social_link)
                .put(routes::social_links::update_social_link)
                .delete(routes::social_links::delete_social_link),
        )
        .layer(middleware::from_fn_with_state(ctx.clone(), auth_middleware));

    let api = auth_routes
        .route(
            "/portfolio-data/",
            get(routes::portfolio::get_portfolio_data),
        )
        .nest("/admin", admin_routes);

    let mut app = Router::new()
        .route("/health", get(routes::health::health_check))
        .route(
            "/portfolio-data/",
            get(routes::portfolio::get_portfolio_data),
        )
        .route(
            "/portfolio-data",
            get(routes::portfolio::get_portfolio_data),
        )
        .nest("/api", api)
        .merge(SwaggerUi::new("/api-docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    // Stored images, when the prefix is a local path.
    if let Some(mount) = media_mount(&ctx.config.media.url_prefix) {
        tracing::debug!(
            "Serving media from {} at {mount}",
            ctx.media.root().display()
        );
        app = app.nest_service(&mount, ServeDir::new(ctx.media.root()));
    }

    // Built frontend.
    if let Some(dir) = ctx.config.server.static_dir.clone() {
        if dir.exists() {
            tracing::info!("Serving static files from {:?}", dir);
            let index_path = dir.join("index.html");
            app = app.fallback_service(
                ServeDir::new(&dir)
                    .append_index_html_on_directories(true)
                    .not_found_service(ServeFile::new(index_path)),
            );
        } else {
            tracing::warn!("static_dir {:?} does not exist; not serving frontend", dir);
        }
    }

    app.layer(middleware::from_fn(request_id_middleware))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(ctx)
}

/// Router path for a media URL prefix, or `None` when the prefix is not a
/// local absolute path (e.g. a CDN URL) or is the site root.
fn media_mount(url_prefix: &str) -> Option<String> {
    if !url_prefix.starts_with('/') {
        return None;
    }
    let trimmed = url_prefix.trim_end_matches('/');
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if config.allowed_origins.is_empty() {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(v) => Some(v),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin {o:?}");
                None
            }
        })
        .collect();
    layer.allow_origin(AllowOrigin::list(origins))
}
