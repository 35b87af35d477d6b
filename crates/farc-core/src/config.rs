use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Retry policy parameters for image fetches (optional section in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum number of attempts per fetch (including the first).
    pub max_attempts: u32,
    /// Base delay in seconds for exponential backoff (e.g. 0.25 = 250ms).
    pub base_delay_secs: f64,
    /// Maximum backoff delay in seconds.
    pub max_delay_secs: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            base_delay_secs: 0.25,
            max_delay_secs: 30,
        }
    }
}

/// Global configuration loaded from `~/.config/farc/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FarcConfig {
    /// Substring identifying the feed endpoint; responses whose request URL
    /// contains it are candidates for capture.
    pub feed_url_marker: String,
    /// How many recently captured URLs `status` reports.
    pub recent_urls: usize,
    /// HTTP connect timeout in seconds.
    pub connect_timeout_secs: u64,
    /// Whole-request timeout in seconds (feed pages and images are small).
    pub request_timeout_secs: u64,
    /// Optional retry policy; if missing, built-in defaults are used.
    #[serde(default)]
    pub retry: Option<RetryConfig>,
}

impl Default for FarcConfig {
    fn default() -> Self {
        Self {
            feed_url_marker: "/api/feed/feed".to_string(),
            recent_urls: 5,
            connect_timeout_secs: 15,
            request_timeout_secs: 30,
            retry: None,
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("farc")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<FarcConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = FarcConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: FarcConfig = toml::from_str(&data)?;
    Ok(cfg)
}
