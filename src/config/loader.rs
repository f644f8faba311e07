//! Configuration loading from the environment.

use std::env;

use crate::config::schema::BotConfig;

/// GitHub (Enterprise) base URL, e.g. "https://github.example.com".
pub const ENV_GITHUB_BASE_URL: &str = "GITHUB_BASE_URL";
/// Release tag prefix, e.g. "v".
pub const ENV_RELEASE_NAME_PREFIX: &str = "RELEASE_NAME_PREFIX";
/// Path for persisting remembered tokens.
pub const ENV_TOKENS_PATH: &str = "REPOBOT_TOKENS_PATH";

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    InvalidBaseUrl { url: String, source: url::ParseError },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidBaseUrl { url, source } => {
                write!(f, "invalid {ENV_GITHUB_BASE_URL} '{url}': {source}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Load configuration from the environment. Unset variables fall back to
/// the schema defaults; a malformed base URL fails startup.
pub fn load_from_env() -> Result<BotConfig, ConfigError> {
    let mut config = BotConfig::default();

    if let Ok(base) = env::var(ENV_GITHUB_BASE_URL) {
        if !base.is_empty() {
            base.parse::<url::Url>()
                .map_err(|source| ConfigError::InvalidBaseUrl {
                    url: base.clone(),
                    source,
                })?;
            config.github.base_url = Some(base);
        }
    }

    if let Ok(prefix) = env::var(ENV_RELEASE_NAME_PREFIX) {
        config.github.release_name_prefix = prefix;
    }

    if let Ok(path) = env::var(ENV_TOKENS_PATH) {
        if !path.is_empty() {
            config.credentials.tokens_path = Some(path);
        }
    }

    Ok(config)
}
