//! Configuration loading
//!
//! Each setting is resolved in this order:
//! 1. Command-line flag
//! 2. Environment variable (`FINDERS_BASE_URL`, `FINDERS_TOKEN`, `FINDERS_CONFIG`)
//! 3. TOML config file (`--config`, else `<config_dir>/finders/config.toml`)
//! 4. Compiled default
//!
//! Flags and environment variables are merged by clap before they reach
//! [`AppConfig::resolve`].

use finders_core::{Coordinate, Error, Result, DEFAULT_CENTER};
use finders_engine::QuizPolicy;
use finders_networking::ClientConfig;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub base_url: String,
    pub token: Option<String>,
    pub request_timeout_secs: u64,
    pub default_center: Coordinate,
    pub quiz_policy: QuizPolicy,
    pub candidate_cache_ttl_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            token: None,
            request_timeout_secs: 30,
            default_center: DEFAULT_CENTER,
            quiz_policy: QuizPolicy::default(),
            candidate_cache_ttl_secs: 60,
        }
    }
}

/// Values that came from flags or the environment
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub config_path: Option<PathBuf>,
    pub base_url: Option<String>,
    pub token: Option<String>,
}

impl AppConfig {
    pub fn resolve(overrides: &Overrides) -> Result<Self> {
        let mut config = match &overrides.config_path {
            Some(path) => Self::load(path)?,
            None => match default_config_path() {
                Some(path) if path.exists() => Self::load(&path)?,
                _ => {
                    debug!("No config file found, using defaults");
                    Self::default()
                }
            },
        };

        if let Some(base_url) = &overrides.base_url {
            config.base_url = base_url.clone();
        }
        if let Some(token) = &overrides.token {
            config.token = Some(token.clone());
        }
        if config.token.as_deref().is_some_and(|t| t.trim().is_empty()) {
            config.token = None;
        }

        if !config.default_center.is_valid() {
            return Err(Error::Config(format!(
                "default_center out of range: {}",
                config.default_center
            )));
        }

        Ok(config)
    }

    /// Read one TOML file; a missing explicit file is an error
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("cannot read {}: {}", path.display(), e)))?;
        let config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("invalid config {}: {}", path.display(), e)))?;
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn client_config(&self) -> ClientConfig {
        let config = ClientConfig::new(self.base_url.clone())
            .with_timeout(Duration::from_secs(self.request_timeout_secs));
        match &self.token {
            Some(token) => config.with_token(token.clone()),
            None => config,
        }
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.candidate_cache_ttl_secs)
    }
}

fn default_config_path() -> Option<PathBuf> {
    dirs_next::config_dir().map(|d| d.join("finders").join("config.toml"))
}
