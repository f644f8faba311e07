//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! environment variables (GITHUB_BASE_URL, RELEASE_NAME_PREFIX, ...)
//!     → loader.rs (read & validate)
//!     → BotConfig (immutable)
//!     → CLI flag overrides applied by the binary
//!     → consulted by the GitHub client and actions at startup
//! ```
//!
//! # Design Decisions
//! - Configuration is environment-derived; the bot owns no config file
//! - All fields have defaults so an empty environment still runs
//! - The base URL is validated at load time, not at first use

pub mod loader;
pub mod schema;

pub use loader::{load_from_env, ConfigError};
pub use schema::{BotConfig, CredentialsConfig, GithubConfig, ObservabilityConfig};
