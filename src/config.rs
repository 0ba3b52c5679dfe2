//! Environment-driven site configuration.
//!
//! Every setting has a literal fallback so the site boots with an empty
//! environment. The admin credential and API token fallbacks are a known
//! weakness carried over on purpose: the admin area is a convenience gate,
//! not an access-control boundary, and [`SiteConfig::warn_insecure_defaults`]
//! says so loudly at startup.

use std::net::SocketAddr;
use std::time::Duration;

use crate::error::ConfigError;

pub const DEFAULT_PROJECT_ID: &str = "khc2znfk";
pub const DEFAULT_DATASET: &str = "production";
pub const DEFAULT_API_VERSION: &str = "2023-10-27";
pub const DEFAULT_ADMIN_EMAIL: &str = "hope@portfolio.com";
pub const DEFAULT_ADMIN_PASSWORD: &str = "hope123";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
pub const DEFAULT_DATABASE_URL: &str = "sqlite://portfolio.db?mode=rwc";
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

/// Connection settings for the Sanity project backing the site.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SanityConfig {
    pub project_id: String,
    pub dataset: String,
    /// Query API version, without the leading `v`.
    pub api_version: String,
    /// Serve content queries from the API CDN.
    pub use_cdn: bool,
    /// Bearer token for asset uploads and deletes.
    pub token: Option<String>,
    /// Overrides the derived query host, e.g. for a local proxy.
    pub api_host: Option<String>,
    /// Overrides the derived asset API host.
    pub asset_host: Option<String>,
    pub timeout: Duration,
}

impl SanityConfig {
    /// Base URL for read queries.
    pub fn query_host(&self) -> String {
        match &self.api_host {
            Some(host) => host.trim_end_matches('/').to_string(),
            None if self.use_cdn => format!("https://{}.apicdn.sanity.io", self.project_id),
            None => format!("https://{}.api.sanity.io", self.project_id),
        }
    }

    /// Base URL for asset create/delete calls. Never the CDN.
    pub fn asset_api_host(&self) -> String {
        match &self.asset_host {
            Some(host) => host.trim_end_matches('/').to_string(),
            None => format!("https://{}.api.sanity.io", self.project_id),
        }
    }
}

impl Default for SanityConfig {
    fn default() -> Self {
        Self {
            project_id: DEFAULT_PROJECT_ID.to_string(),
            dataset: DEFAULT_DATASET.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            use_cdn: true,
            token: None,
            api_host: None,
            asset_host: None,
            timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        }
    }
}

/// The single admin account.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AdminCredentials {
    pub email: String,
    pub password: String,
}

impl Default for AdminCredentials {
    fn default() -> Self {
        Self {
            email: DEFAULT_ADMIN_EMAIL.to_string(),
            password: DEFAULT_ADMIN_PASSWORD.to_string(),
        }
    }
}

/// Full site configuration.
#[derive(Clone, Debug)]
pub struct SiteConfig {
    pub bind_addr: SocketAddr,
    pub database_url: String,
    pub sanity: SanityConfig,
    pub admin: AdminCredentials,
    /// Optional JSON file replacing the built-in profile.
    pub profile_path: Option<String>,
    /// Mark the session cookie `Secure`.
    pub secure_cookies: bool,
    /// Directory served under `/images`, `/videos` and `/audio`.
    pub public_dir: String,
}

impl SiteConfig {
    /// Load configuration from the process environment.
    ///
    /// Call `dotenvy::dotenv()` first if a `.env` file should be honored.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let bind = get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind.parse::<SocketAddr>().map_err(|e| ConfigError::Invalid {
            key: "BIND_ADDR",
            reason: e.to_string(),
        })?;

        let timeout_secs = match get("HTTP_TIMEOUT_SECS") {
            Some(raw) => raw.parse::<u64>().map_err(|e| ConfigError::Invalid {
                key: "HTTP_TIMEOUT_SECS",
                reason: e.to_string(),
            })?,
            None => DEFAULT_HTTP_TIMEOUT_SECS,
        };

        let sanity = SanityConfig {
            project_id: get("SANITY_PROJECT_ID").unwrap_or_else(|| DEFAULT_PROJECT_ID.to_string()),
            dataset: get("SANITY_DATASET").unwrap_or_else(|| DEFAULT_DATASET.to_string()),
            api_version: get("SANITY_API_VERSION")
                .map(|v| v.trim_start_matches('v').to_string())
                .unwrap_or_else(|| DEFAULT_API_VERSION.to_string()),
            use_cdn: parse_bool("SANITY_USE_CDN", get("SANITY_USE_CDN"), true)?,
            token: get("SANITY_TOKEN"),
            api_host: get("SANITY_API_HOST"),
            asset_host: get("SANITY_ASSET_HOST"),
            timeout: Duration::from_secs(timeout_secs),
        };

        let admin = AdminCredentials {
            email: get("ADMIN_EMAIL").unwrap_or_else(|| DEFAULT_ADMIN_EMAIL.to_string()),
            password: get("ADMIN_PASSWORD").unwrap_or_else(|| DEFAULT_ADMIN_PASSWORD.to_string()),
        };

        Ok(Self {
            bind_addr,
            database_url: get("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            sanity,
            admin,
            profile_path: get("PROFILE_PATH"),
            secure_cookies: parse_bool("SECURE_COOKIES", get("SECURE_COOKIES"), false)?,
            public_dir: get("PUBLIC_DIR").unwrap_or_else(|| "public".to_string()),
        })
    }

    /// Log a warning for every secret still at its built-in value.
    pub fn warn_insecure_defaults(&self) {
        if self.admin.email == DEFAULT_ADMIN_EMAIL || self.admin.password == DEFAULT_ADMIN_PASSWORD {
            tracing::warn!(
                "admin credentials use built-in defaults; the admin gate is a UX convenience only \
                 and provides no real access control"
            );
        }
        if self.sanity.token.is_none() {
            tracing::warn!("SANITY_TOKEN is not set; asset uploads and deletes will be rejected");
        }
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            database_url: DEFAULT_DATABASE_URL.to_string(),
            sanity: SanityConfig::default(),
            admin: AdminCredentials::default(),
            profile_path: None,
            secure_cookies: false,
            public_dir: "public".to_string(),
        }
    }
}

fn parse_bool(key: &'static str, raw: Option<String>, default: bool) -> Result<bool, ConfigError> {
    match raw.as_deref().map(str::trim).map(str::to_ascii_lowercase).as_deref() {
        None => Ok(default),
        Some("1" | "true" | "yes" | "on") => Ok(true),
        Some("0" | "false" | "no" | "off") => Ok(false),
        Some(other) => Err(ConfigError::Invalid {
            key,
            reason: format!("expected a boolean, got {other:?}"),
        }),
    }
}
