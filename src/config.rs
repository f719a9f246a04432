//! Bot configuration
//!
//! Everything is read from the environment once at startup.

use std::env;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;

use crate::store::{
    ContentBackend, GitHubBackend, GitHubSettings, LoadMode, MemoryBackend, StoreError,
    DEFAULT_MAX_RETRIES,
};

/// Errors raised while reading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),
    #[error("invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
    #[error("could not build backend: {0}")]
    Backend(#[from] StoreError),
}

/// Where documents are stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendKind {
    GitHub { repo: String, token: String },
    Memory,
}

/// Configuration for the bot process
#[derive(Debug, Clone)]
pub struct BotConfig {
    pub backend: BackendKind,
    pub api_url: String,
    pub branch: Option<String>,
    pub stats_path: String,
    pub channels_path: String,
    pub cooldown: Duration,
    pub max_retries: u32,
    pub retry_backoff: Duration,
    pub load_mode: LoadMode,
    pub http_timeout: Duration,
    pub keepalive_addr: SocketAddr,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            backend: BackendKind::Memory,
            api_url: GitHubSettings::DEFAULT_API_URL.to_string(),
            branch: None,
            stats_path: "stats.json".to_string(),
            channels_path: "channels.json".to_string(),
            cooldown: Duration::from_secs(2),
            max_retries: DEFAULT_MAX_RETRIES,
            retry_backoff: Duration::ZERO,
            load_mode: LoadMode::Lenient,
            http_timeout: Duration::from_secs(10),
            keepalive_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
        }
    }
}

impl BotConfig {
    /// Read configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Read configuration through an arbitrary lookup (used by tests)
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let backend = match lookup("ROLLKEEPER_BACKEND").as_deref().unwrap_or("github") {
            "github" => BackendKind::GitHub {
                repo: lookup("GITHUB_REPO").ok_or(ConfigError::Missing("GITHUB_REPO"))?,
                token: lookup("GITHUB_TOKEN").ok_or(ConfigError::Missing("GITHUB_TOKEN"))?,
            },
            "memory" => BackendKind::Memory,
            other => {
                return Err(ConfigError::Invalid {
                    name: "ROLLKEEPER_BACKEND",
                    value: other.to_string(),
                })
            }
        };

        let load_mode = if parse_or(&lookup, "STORE_STRICT_LOADS", false)? {
            LoadMode::Strict
        } else {
            LoadMode::Lenient
        };

        Ok(Self {
            backend,
            api_url: lookup("GITHUB_API_URL").unwrap_or(defaults.api_url),
            branch: lookup("GITHUB_BRANCH").filter(|b| !b.is_empty()),
            stats_path: lookup("STATS_PATH").unwrap_or(defaults.stats_path),
            channels_path: lookup("CHANNELS_PATH").unwrap_or(defaults.channels_path),
            cooldown: Duration::from_secs(parse_or(&lookup, "ROLL_COOLDOWN_SECS", 2)?),
            max_retries: parse_or(&lookup, "STORE_MAX_RETRIES", DEFAULT_MAX_RETRIES)?,
            retry_backoff: Duration::from_millis(parse_or(&lookup, "STORE_RETRY_BACKOFF_MS", 0)?),
            load_mode,
            http_timeout: Duration::from_secs(parse_or(&lookup, "HTTP_TIMEOUT_SECS", 10)?),
            keepalive_addr: parse_or(&lookup, "KEEPALIVE_ADDR", defaults.keepalive_addr)?,
        })
    }

    /// Build the content backend this configuration points at
    pub fn build_backend(&self) -> Result<Arc<dyn ContentBackend>, ConfigError> {
        match &self.backend {
            BackendKind::GitHub { repo, token } => {
                let settings = GitHubSettings {
                    api_url: self.api_url.clone(),
                    repo: repo.clone(),
                    token: token.clone(),
                    branch: self.branch.clone(),
                    timeout: self.http_timeout,
                };
                Ok(Arc::new(GitHubBackend::new(settings)?))
            }
            BackendKind::Memory => Ok(Arc::new(MemoryBackend::new())),
        }
    }
}

fn parse_or<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(name) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value: raw }),
    }
}
