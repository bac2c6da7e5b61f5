use std::path::{Path, PathBuf};
use std::time::Duration;

use parcel_track::TrackedPackage;
use serde::{Deserialize, Serialize};

/// Backend the page is served from when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

/// Environment variable that overrides `session_cookie`.
pub const SESSION_ENV: &str = "PARCEL_TRACK_SESSION";

/// Top-level application configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout. Unset means requests may hang indefinitely.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    #[serde(default)]
    pub session_cookie: Option<String>,
    /// Rows shown in the package list.
    #[serde(default)]
    pub packages: Vec<TrackedPackage>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: None,
            session_cookie: None,
            packages: Vec::new(),
        }
    }
}

impl AppConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.into()
}

/// Config file path: `~/.config/parcel-track/config.toml`
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("parcel-track").join("config.toml"))
}

/// Load config from `path` (or the default location), falling back to
/// defaults if missing or unparsable.
pub fn load_config(path: Option<&Path>) -> AppConfig {
    let path = match path {
        Some(p) => Some(p.to_path_buf()),
        None => config_path(),
    };

    let mut config = path
        .and_then(|path| {
            let contents = std::fs::read_to_string(&path).ok()?;
            match toml::from_str::<AppConfig>(&contents) {
                Ok(config) => Some(config),
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "failed to parse config, using defaults");
                    None
                }
            }
        })
        .unwrap_or_default();

    if let Ok(cookie) = std::env::var(SESSION_ENV)
        && !cookie.is_empty()
    {
        config.session_cookie = Some(cookie);
    }

    config
}
