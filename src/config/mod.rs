use std::str::FromStr;
use std::time::Duration;

use crate::errors::{NewsError, NewsResult};

pub const DEFAULT_PROXY_URL: &str = "https://corsproxy.io/?";
pub const DEFAULT_KEYWORDS_URL: &str = "https://docs.google.com/spreadsheets/d/1N7d_O0TERXXuQ1dBZQBuc96E6QdKRWmo164rUffb7TI/gviz/tq?tqx=out:csv&sheet=Sheet1";
pub const DEFAULT_MAX_RETRIES: u32 = 3;
pub const DEFAULT_BACKOFF_MS: u64 = 1000;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct Config {
    pub db_path: String,
    pub proxy_url: String,
    pub keywords_url: String,
    pub max_retries: u32,
    pub backoff_base: Duration,
    pub request_timeout: Duration,
}

impl Config {
    /// Get the directory where the executable is located
    fn exe_dir() -> Option<std::path::PathBuf> {
        std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
    }

    pub fn from_env() -> NewsResult<Self> {
        let exe_dir = Self::exe_dir();

        // Try to load .env from executable's directory first
        if let Some(ref dir) = exe_dir {
            let env_path = dir.join(".env");
            if env_path.exists() {
                dotenvy::from_path(&env_path).ok();
            }
        }
        // Fall back to current directory
        dotenvy::dotenv().ok();

        // Default db_path is relative to executable directory
        let db_path = std::env::var("INVESTFEED_DB_PATH").unwrap_or_else(|_| {
            exe_dir
                .map(|d| d.join("investfeed.db").to_string_lossy().into_owned())
                .unwrap_or_else(|| "./investfeed.db".to_string())
        });

        let proxy_url = std::env::var("INVESTFEED_PROXY_URL")
            .unwrap_or_else(|_| DEFAULT_PROXY_URL.to_string());

        let keywords_url = std::env::var("INVESTFEED_KEYWORDS_URL")
            .unwrap_or_else(|_| DEFAULT_KEYWORDS_URL.to_string());

        let max_retries = env_number("INVESTFEED_MAX_RETRIES", DEFAULT_MAX_RETRIES)?;
        if max_retries == 0 {
            return Err(NewsError::Config(
                "INVESTFEED_MAX_RETRIES must be at least 1".to_string(),
            ));
        }

        let backoff_ms = env_number("INVESTFEED_BACKOFF_MS", DEFAULT_BACKOFF_MS)?;
        let timeout_secs = env_number("INVESTFEED_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?;

        Ok(Self {
            db_path,
            proxy_url,
            keywords_url,
            max_retries,
            backoff_base: Duration::from_millis(backoff_ms),
            request_timeout: Duration::from_secs(timeout_secs),
        })
    }
}

/// Read a numeric variable, falling back to `default` when unset
fn env_number<T: FromStr>(name: &str, default: T) -> NewsResult<T> {
    match std::env::var(name) {
        Ok(raw) => parse_number(name, &raw),
        Err(_) => Ok(default),
    }
}

fn parse_number<T: FromStr>(name: &str, raw: &str) -> NewsResult<T> {
    raw.trim()
        .parse()
        .map_err(|_| NewsError::Config(format!("{} is not a valid number: {}", name, raw)))
}
