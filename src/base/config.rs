//! Load configuration via `config` crate with env-override support.

use std::{ops::Deref, path::PathBuf, sync::Arc};

use serde::Deserialize;

use super::types::{Priority, Res};

/// Default GitHub REST API base URL.
fn default_github_api_url() -> String {
    "https://api.github.com".to_string()
}

/// Default `User-Agent` for outbound calls; GitHub rejects requests without one.
fn default_user_agent() -> String {
    concat!("bug-reporter/", env!("CARGO_PKG_VERSION")).to_string()
}

/// Default bind host.
fn default_host() -> String {
    "0.0.0.0".to_string()
}

/// Default bind port.
fn default_port() -> u16 {
    3000
}

/// Configuration for the bug-reporter application.
#[derive(Debug, Clone)]
pub struct Config {
    /// Shared settings.
    pub inner: Arc<ConfigInner>,
}

impl Deref for Config {
    type Target = ConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

/// Settings as deserialized from the environment and config file.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct ConfigInner {
    /// GitHub token with write access to the target repository (`GITHUB_TOKEN`).
    ///
    /// Left unset, the service still starts, but every submission fails.
    pub github_token: Option<String>,
    /// Target repository as `owner/name` (`GITHUB_REPO`).
    pub github_repo: Option<String>,
    /// GitHub REST API base URL (`GITHUB_API_URL`).
    #[serde(default = "default_github_api_url")]
    pub github_api_url: String,
    /// `User-Agent` sent with outbound requests (`USER_AGENT`).
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Host to bind the HTTP server to (`HOST`).
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to bind the HTTP server to (`PORT`).
    #[serde(default = "default_port")]
    pub port: u16,
    /// Directory holding the landing page, served on every other path (`STATIC_DIR`).
    pub static_dir: Option<PathBuf>,
    /// Glyphs shown next to the priority in the issue body.
    #[serde(default)]
    pub priority_glyphs: PriorityGlyphs,
}

/// Priority glyph table.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct PriorityGlyphs {
    /// Glyph for `low`.
    pub low: String,
    /// Glyph for `medium`.
    pub medium: String,
    /// Glyph for `high`.
    pub high: String,
    /// Glyph for `critical`.
    pub critical: String,
    /// Used for an absent or unrecognized priority.
    pub fallback: String,
}

impl Default for PriorityGlyphs {
    fn default() -> Self {
        Self {
            low: "🟢".to_string(),
            medium: "🟡".to_string(),
            high: "🟠".to_string(),
            critical: "🔴".to_string(),
            fallback: "⚪".to_string(),
        }
    }
}

impl PriorityGlyphs {
    /// Look up the glyph for a priority, falling back for `None`.
    pub fn glyph(&self, priority: Option<Priority>) -> &str {
        match priority {
            Some(Priority::Low) => &self.low,
            Some(Priority::Medium) => &self.medium,
            Some(Priority::High) => &self.high,
            Some(Priority::Critical) => &self.critical,
            None => &self.fallback,
        }
    }
}

impl Config {
    /// Load from `BUG_REPORTER_*` env vars, then `explicit_path` or `.hidden/config.toml`.
    pub fn load(explicit_path: Option<&std::path::Path>) -> Res<Self> {
        let mut cfg = config::Config::builder().add_source(config::Environment::default().prefix("BUG_REPORTER"));

        if let Some(p) = explicit_path {
            cfg = cfg.add_source(config::File::from(p.to_path_buf()));
        } else if std::path::Path::new(".hidden/config.toml").exists() {
            cfg = cfg.add_source(config::File::with_name(".hidden/config.toml"));
        }

        let result = Config {
            inner: Arc::new(cfg.build()?.try_deserialize()?),
        };

        if result.github_api_url.trim().is_empty() {
            return Err(anyhow::anyhow!("GitHub API URL must not be empty."));
        }

        if let Some(repo) = &result.github_repo
            && repo.split('/').filter(|part| !part.is_empty()).count() != 2
        {
            return Err(anyhow::anyhow!("GitHub repository must be of the form `owner/name`."));
        }

        Ok(result)
    }
}
