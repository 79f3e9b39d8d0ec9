//! Application configuration types.
//!
//! The top-level [`Config`] struct is deserialized from TOML and carries the
//! server, media, auth, and CORS sections. Every section defaults sensibly
//! so a completely empty file is valid.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::Error;

/// Locations searched when no explicit config path is given.
const DEFAULT_PATHS: &[&str] = &[
    "./folio.toml",
    "~/.config/folio/config.toml",
    "/etc/folio/config.toml",
];

// ---------------------------------------------------------------------------
// Top-level Config
// ---------------------------------------------------------------------------

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub media: MediaConfig,
    pub auth: AuthConfig,
    pub cors: CorsConfig,
}

impl Config {
    /// Deserialize a `Config` from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        toml::from_str(toml_str).map_err(|e| Error::Validation(format!("config parse error: {e}")))
    }

    /// Load configuration from an explicit file path.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Load configuration from `custom_path`, or from the first default
    /// location that exists, or fall back to defaults.
    ///
    /// An explicit path that cannot be read or parsed is an error; the
    /// default locations are only tried.
    pub fn load_or_default(custom_path: Option<&Path>) -> Result<Self> {
        if let Some(path) = custom_path {
            return Self::load(path);
        }

        for path_str in DEFAULT_PATHS {
            let expanded = shellexpand::tilde(path_str);
            let path = Path::new(expanded.as_ref());
            if path.exists() {
                tracing::info!("Loading config from {}", path.display());
                return Self::load(path);
            }
        }

        tracing::info!("No config file found; using defaults");
        Ok(Self::default())
    }

    /// Return a list of validation warnings (non-fatal issues).
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if self.server.port == 0 {
            warnings.push("server.port is 0; a random port will be assigned".into());
        }

        if self.auth.enabled {
            if self.auth.api_key.is_none() && self.auth.username.is_none() {
                warnings.push("auth is enabled but neither api_key nor username is set".into());
            }
            if self.auth.username.is_some() && self.auth.password_hash.is_none() {
                warnings.push("auth username is set but password_hash is missing".into());
            }
        } else if self.server.is_loopback() {
            warnings.push("auth is disabled; the admin API is open to local clients".into());
        } else {
            warnings.push(format!(
                "auth is disabled and server.host '{}' is not loopback; serve will refuse to start",
                self.server.host
            ));
        }

        let prefix = &self.media.url_prefix;
        if !prefix.starts_with('/') || !prefix.ends_with('/') {
            warnings.push(format!(
                "media.url_prefix '{prefix}' should start and end with '/'"
            ));
        }

        warnings
    }
}

// ---------------------------------------------------------------------------
// Sub-configs
// ---------------------------------------------------------------------------

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub db_path: PathBuf,
    /// Built frontend to serve for unmatched paths.
    pub static_dir: Option<PathBuf>,
}

impl ServerConfig {
    /// Whether `host` only accepts connections from this machine.
    pub fn is_loopback(&self) -> bool {
        self.host.eq_ignore_ascii_case("localhost")
            || self
                .host
                .parse::<std::net::IpAddr>()
                .is_ok_and(|ip| ip.is_loopback())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 8000,
            db_path: PathBuf::from("./data/folio.db"),
            static_dir: None,
        }
    }
}

/// Image file storage settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MediaConfig {
    /// Directory that image keys are relative to.
    pub root: PathBuf,
    /// Public URL prefix the media root is served under.
    pub url_prefix: String,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("./data/media"),
            url_prefix: "/media/".into(),
        }
    }
}

impl MediaConfig {
    /// Public URL for a stored image key.
    pub fn url_for(&self, key: &str) -> String {
        format!(
            "{}/{}",
            self.url_prefix.trim_end_matches('/'),
            key.trim_start_matches('/')
        )
    }
}

/// Admin authentication settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    pub enabled: bool,
    /// Static bearer token for scripted access.
    pub api_key: Option<String>,
    pub username: Option<String>,
    /// Bcrypt hash (generate with `folio hash-password`).
    pub password_hash: Option<String>,
    pub session_timeout_hours: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            api_key: None,
            username: None,
            password_hash: None,
            session_timeout_hours: 24,
        }
    }
}

/// Cross-origin settings for the public frontend.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    /// Allowed origins; empty allows any origin.
    pub allowed_origins: Vec<String>,
}
