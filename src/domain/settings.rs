//! Runtime settings read from configuration and validated up front.

use std::path::PathBuf;
use std::time::Duration;

use crate::domain::error::StockwatchError;
use crate::domain::watchlist::DEFAULT_STORAGE_KEY;
use crate::ports::config_port::ConfigPort;

pub const DEFAULT_BASE_URL: &str = "http://localhost:3001";
pub const DEFAULT_DB_PATH: &str = "stockwatch.db";
pub const DEFAULT_MAX_CONCURRENT_FETCHES: usize = 4;
pub const DEFAULT_POOL_SIZE: u32 = 2;

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// No trailing slash.
    pub base_url: String,
    pub timeout: Option<Duration>,
    pub db_path: PathBuf,
    pub storage_key: String,
    pub pool_size: u32,
    pub max_concurrent_fetches: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            pool_size: DEFAULT_POOL_SIZE,
            max_concurrent_fetches: DEFAULT_MAX_CONCURRENT_FETCHES,
        }
    }
}

impl Settings {
    pub fn from_config(config: &dyn ConfigPort) -> Result<Self, StockwatchError> {
        let base_url = match config.get_string("api", "base_url") {
            Some(url) => normalize_base_url(&url)?,
            None => DEFAULT_BASE_URL.to_string(),
        };

        let timeout_secs = config.get_int("api", "timeout_secs", 0);
        if timeout_secs < 0 {
            return Err(invalid("api", "timeout_secs", "timeout_secs must be non-negative"));
        }
        let timeout = (timeout_secs > 0).then(|| Duration::from_secs(timeout_secs as u64));

        let db_path = config
            .get_string("storage", "path")
            .map(|p| PathBuf::from(p.trim()))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_PATH));

        let storage_key = config
            .get_string("storage", "key")
            .unwrap_or_else(|| DEFAULT_STORAGE_KEY.to_string());
        if storage_key.trim().is_empty() {
            return Err(invalid("storage", "key", "key must not be empty"));
        }

        let pool_size = config.get_int("storage", "pool_size", DEFAULT_POOL_SIZE as i64);
        if pool_size < 1 {
            return Err(invalid("storage", "pool_size", "pool_size must be at least 1"));
        }

        let max_concurrent = config.get_int(
            "watchlist",
            "max_concurrent_fetches",
            DEFAULT_MAX_CONCURRENT_FETCHES as i64,
        );
        if max_concurrent < 1 {
            return Err(invalid(
                "watchlist",
                "max_concurrent_fetches",
                "max_concurrent_fetches must be at least 1",
            ));
        }

        Ok(Self {
            base_url,
            timeout,
            db_path,
            storage_key: storage_key.trim().to_string(),
            pool_size: pool_size as u32,
            max_concurrent_fetches: max_concurrent as usize,
        })
    }

    /// Applies command-line overrides on top of file settings.
    pub fn with_overrides(
        mut self,
        api_url: Option<&str>,
        db_path: Option<PathBuf>,
    ) -> Result<Self, StockwatchError> {
        if let Some(url) = api_url {
            self.base_url = normalize_base_url(url)?;
        }
        if let Some(path) = db_path {
            self.db_path = path;
        }
        Ok(self)
    }
}

fn normalize_base_url(url: &str) -> Result<String, StockwatchError> {
    let url = url.trim();
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(invalid(
            "api",
            "base_url",
            "base_url must start with http:// or https://",
        ));
    }
    Ok(url.trim_end_matches('/').to_string())
}

fn invalid(section: &str, key: &str, reason: &str) -> StockwatchError {
    StockwatchError::ConfigInvalid {
        section: section.to_string(),
        key: key.to_string(),
        reason: reason.to_string(),
    }
}
