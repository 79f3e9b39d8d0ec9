//! Shared test harness for integration tests.
//!
//! Provides [`TestHarness`] which creates an in-memory DB, a temporary media
//! root, and a full [`AppContext`]. The `with_server*` constructors start
//! Axum on a random port for HTTP-level testing.

#![allow(dead_code)]

use std::io::Cursor;
use std::net::SocketAddr;
use std::path::PathBuf;

use folio_core::config::Config;
use folio_db::models::{ProfileFields, ProjectFields, SkillFields, SocialLinkFields};
use folio_db::pool::{init_memory_pool, DbPool};
use folio_server::context::AppContext;
use folio_server::router::build_router;
use tempfile::TempDir;

/// API key configured by [`TestHarness::with_auth_server`].
pub const API_KEY: &str = "integration-test-key";

/// Admin credentials configured by [`TestHarness::with_auth_server`].
pub const ADMIN_USER: &str = "admin";
pub const ADMIN_PASSWORD: &str = "correct horse battery staple";

/// Test harness wrapping a fully-constructed [`AppContext`] backed by an
/// in-memory database and a temporary media directory.
pub struct TestHarness {
    pub ctx: AppContext,
    pub db: DbPool,
    media_dir: TempDir,
}

impl TestHarness {
    /// Create a new harness with default configuration.
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Create a new harness with a custom configuration. The media root is
    /// always replaced by a fresh temporary directory.
    pub fn with_config(mut config: Config) -> Self {
        let media_dir = tempfile::tempdir().expect("failed to create media dir");
        config.media.root = media_dir.path().to_path_buf();

        let db = init_memory_pool().expect("failed to create in-memory pool");
        let ctx = AppContext::new(db.clone(), config);

        Self { ctx, db, media_dir }
    }

    /// Start an Axum server on a random port with auth disabled.
    pub async fn with_server() -> (Self, SocketAddr) {
        Self::with_server_config(Config::default()).await
    }

    /// Start an Axum server with auth enabled (API key plus one admin user).
    pub async fn with_auth_server() -> (Self, SocketAddr) {
        let mut config = Config::default();
        config.auth.enabled = true;
        config.auth.api_key = Some(API_KEY.into());
        config.auth.username = Some(ADMIN_USER.into());
        config.auth.password_hash =
            Some(bcrypt::hash(ADMIN_PASSWORD, 4).expect("failed to hash password"));
        Self::with_server_config(config).await
    }

    /// Start an Axum server with custom config on a random port.
    pub async fn with_server_config(config: Config) -> (Self, SocketAddr) {
        let harness = Self::with_config(config);
        let app = build_router(harness.ctx.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind random port");
        let addr = listener.local_addr().expect("failed to get local addr");

        tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        (harness, addr)
    }

    /// Get a database connection from the pool.
    pub fn conn(&self) -> folio_db::pool::PooledConnection {
        folio_db::pool::get_conn(&self.db).expect("failed to get db connection")
    }

    /// Absolute path of a media key inside the temporary media root.
    pub fn media_path(&self, key: &str) -> PathBuf {
        self.media_dir.path().join(key)
    }

    /// Every file currently stored under `folder` in the media root.
    pub fn media_files(&self, folder: &str) -> Vec<String> {
        let dir = self.media_dir.path().join(folder);
        let Ok(entries) = std::fs::read_dir(&dir) else {
            return Vec::new();
        };
        let mut names: Vec<String> = entries
            .filter_map(|e| e.ok())
            .map(|e| format!("{folder}/{}", e.file_name().to_string_lossy()))
            .collect();
        names.sort();
        names
    }

    // -- Seeding helpers --------------------------------------------------

    pub fn seed_profile(&self, name: &str) -> folio_db::models::Profile {
        let fields = ProfileFields {
            name: name.into(),
            tagline: "Engineer".into(),
            bio: "Builds things.".into(),
            profile_image: None,
        };
        folio_db::queries::profiles::create_profile(&self.conn(), &fields)
            .expect("failed to seed profile")
    }

    pub fn seed_skill(&self, name: &str, order: u32) -> folio_db::models::Skill {
        let fields = SkillFields {
            name: name.into(),
            order,
        };
        folio_db::queries::skills::create_skill(&self.conn(), &fields)
            .expect("failed to seed skill")
    }

    pub fn seed_project(
        &self,
        title: &str,
        technologies: &str,
        order: u32,
    ) -> folio_db::models::Project {
        let fields = ProjectFields {
            title: title.into(),
            description: format!("{title} description"),
            technologies: technologies.into(),
            order,
            ..ProjectFields::default()
        };
        folio_db::queries::projects::create_project(&self.conn(), &fields)
            .expect("failed to seed project")
    }

    pub fn seed_social_link(&self, name: &str, order: u32) -> folio_db::models::SocialLink {
        let fields = SocialLinkFields {
            name: name.into(),
            url: format!("https://{}.example.com/ada", name.to_lowercase()),
            icon_name: name.into(),
            order,
        };
        folio_db::queries::social_links::create_social_link(&self.conn(), &fields)
            .expect("failed to seed social link")
    }
}

/// Base URL for a running test server.
pub fn base_url(addr: SocketAddr) -> String {
    format!("http://{addr}")
}

/// A small PNG whose bytes differ per `shade`.
pub fn png_bytes(shade: u8) -> Vec<u8> {
    let img = image::RgbImage::from_pixel(8, 8, image::Rgb([shade, shade / 2, 0]));
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, image::ImageFormat::Png)
        .expect("failed to encode png");
    buf.into_inner()
}
