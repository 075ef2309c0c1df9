use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::retry::RetryPolicy;

/// Host serving both `config.js` and the page images.
pub const DEFAULT_SERVICE_HOST: &str = "https://online.anyflip.com";

/// Retry policy for page downloads (optional `[retry]` section in config.toml).
///
/// The config fetch itself never retries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum number of attempts per page (including the first).
    pub max_attempts: u32,
    /// Base delay in seconds for exponential backoff (e.g. 0.5 = 500ms).
    pub base_delay_secs: f64,
    /// Maximum backoff delay in seconds.
    pub max_delay_secs: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay_secs: 0.5,
            max_delay_secs: 10,
        }
    }
}

impl RetryConfig {
    pub fn to_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.max_attempts.max(1),
            base_delay: Duration::from_secs_f64(self.base_delay_secs.max(0.0)),
            max_delay: Duration::from_secs(self.max_delay_secs),
        }
    }
}

/// Settings read from `~/.config/fbdl/config.toml`. Every key is optional.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FbdlConfig {
    /// Base URL of the viewer service.
    pub service_host: String,
    pub connect_timeout_secs: u64,
    /// Whole-request deadline for a single GET.
    pub timeout_secs: u64,
    /// Overrides the default `fbdl/<version>` user agent.
    pub user_agent: Option<String>,
    /// Skip TLS certificate validation.
    pub insecure: bool,
    /// Default for OCR post-processing when the CLI does not say.
    pub ocr: bool,
    pub retry: Option<RetryConfig>,
}

impl Default for FbdlConfig {
    fn default() -> Self {
        Self {
            service_host: DEFAULT_SERVICE_HOST.to_string(),
            connect_timeout_secs: 15,
            timeout_secs: 60,
            user_agent: None,
            insecure: false,
            ocr: false,
            retry: None,
        }
    }
}

impl FbdlConfig {
    pub fn user_agent(&self) -> String {
        self.user_agent
            .clone()
            .unwrap_or_else(|| concat!("fbdl/", env!("CARGO_PKG_VERSION")).to_string())
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry.clone().unwrap_or_default().to_policy()
    }
}

/// Existing config file, if any. Never creates one.
pub fn config_path() -> Result<Option<PathBuf>> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("fbdl")?;
    Ok(xdg_dirs.find_config_file("config.toml"))
}

/// Load configuration from the XDG config dir, or defaults when no file exists.
pub fn load() -> Result<FbdlConfig> {
    match config_path()? {
        Some(path) => load_from_path(&path),
        None => Ok(FbdlConfig::default()),
    }
}

pub fn load_from_path(path: &Path) -> Result<FbdlConfig> {
    let data =
        fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
    let cfg: FbdlConfig =
        toml::from_str(&data).with_context(|| format!("parse config {}", path.display()))?;
    tracing::debug!("loaded config from {}", path.display());
    Ok(cfg)
}
