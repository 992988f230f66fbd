use anyhow::{bail, Context, Result};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_SOURCE_URL: &str = "https://www.agbro.com/";
pub const DEFAULT_SOURCE_TAG: &str = "agbro.com";
pub const DEFAULT_OUTPUT_PATH: &str = "rates.json";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/110.0.0.0 Safari/537.36";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub const ENV_SOURCE_URL: &str = "AGBRO_SOURCE_URL";
pub const ENV_SOURCE_TAG: &str = "AGBRO_SOURCE_TAG";
pub const ENV_OUTPUT_PATH: &str = "AGBRO_OUTPUT_PATH";
pub const ENV_USER_AGENT: &str = "AGBRO_USER_AGENT";
pub const ENV_TIMEOUT_SECS: &str = "AGBRO_TIMEOUT_SECS";

/// Settings for a single scrape run
#[derive(Debug, Clone)]
pub struct Config {
    /// Page holding the rate cards
    pub source_url: String,
    /// Identifier written into the envelope's `source` field
    pub source_tag: String,
    /// Where the envelope is written
    pub output_path: PathBuf,
    /// Browser identification sent with the request
    pub user_agent: String,
    pub timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_url: DEFAULT_SOURCE_URL.to_string(),
            source_tag: DEFAULT_SOURCE_TAG.to_string(),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl Config {
    /// Load from the process environment, reading `.env` first when present
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Missing or blank keys keep their default.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let mut config = Self::default();

        if let Some(url) = get(ENV_SOURCE_URL) {
            config.source_url = url;
        }
        if let Some(tag) = get(ENV_SOURCE_TAG) {
            config.source_tag = tag;
        }
        if let Some(path) = get(ENV_OUTPUT_PATH) {
            config.output_path = PathBuf::from(path);
        }
        if let Some(ua) = get(ENV_USER_AGENT) {
            config.user_agent = ua;
        }
        if let Some(raw) = get(ENV_TIMEOUT_SECS) {
            let secs: u64 = raw
                .parse()
                .with_context(|| format!("{} must be a whole number of seconds, got {:?}", ENV_TIMEOUT_SECS, raw))?;
            if secs == 0 {
                bail!("{} must be greater than zero", ENV_TIMEOUT_SECS);
            }
            config.timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }
}
