//! Configuration schema definitions.

use serde::{Deserialize, Serialize};

/// Root configuration for the bot.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct BotConfig {
    /// GitHub API settings.
    pub github: GithubConfig,

    /// Credential storage settings.
    pub credentials: CredentialsConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// GitHub API settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GithubConfig {
    /// Optional GitHub Enterprise base URL (e.g. "https://github.example.com").
    /// The API root is derived from it; unset means api.github.com.
    pub base_url: Option<String>,

    /// Prefix for generated release tags (e.g. "v").
    pub release_name_prefix: String,

    /// HTTP request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            release_name_prefix: String::new(),
            request_timeout_secs: 10,
        }
    }
}

/// Credential storage settings.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct CredentialsConfig {
    /// Optional path for persisting remembered tokens as JSON.
    pub tokens_path: Option<String>,
}

/// Observability settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Default log level when RUST_LOG is unset.
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
