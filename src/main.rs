//! repobot: GitHub chat-command bot.

use std::sync::Arc;

use clap::Parser;

use repobot::credentials::TokenStore;
use repobot::transport::ShellAdapter;
use repobot::{commands, config, github, lifecycle, observability, Shutdown};

#[derive(Parser)]
#[command(name = "repobot")]
#[command(about = "GitHub chat-command bot", long_about = None)]
struct Cli {
    /// GitHub (Enterprise) base URL; overrides GITHUB_BASE_URL.
    #[arg(long)]
    base_url: Option<String>,

    /// Release tag prefix; overrides RELEASE_NAME_PREFIX.
    #[arg(long)]
    release_name_prefix: Option<String>,

    /// Token store persistence path; overrides REPOBOT_TOKENS_PATH.
    #[arg(long)]
    tokens_path: Option<String>,

    /// Sender identity attached to shell messages.
    #[arg(long, default_value = "shell")]
    sender: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = config::load_from_env()?;
    if let Some(base_url) = cli.base_url {
        config.github.base_url = Some(base_url);
    }
    if let Some(prefix) = cli.release_name_prefix {
        config.github.release_name_prefix = prefix;
    }
    if let Some(path) = cli.tokens_path {
        config.credentials.tokens_path = Some(path);
    }

    observability::logging::init(&config.observability.log_level);

    tracing::info!(
        base_url = config.github.base_url.as_deref().unwrap_or("api.github.com"),
        release_name_prefix = %config.github.release_name_prefix,
        tokens_path = config.credentials.tokens_path.as_deref().unwrap_or("(memory only)"),
        "configuration loaded"
    );

    let tokens = match &config.credentials.tokens_path {
        Some(path) => Arc::new(TokenStore::load_from_file(path)?),
        None => Arc::new(TokenStore::new(None)),
    };
    let client = Arc::new(github::Client::new(&config.github)?);

    let router = Arc::new(commands::router(client, tokens, &config)?);
    tracing::info!(rules = router.registry().len(), "command table ready");

    let shutdown = Arc::new(Shutdown::new());
    lifecycle::signals::spawn_ctrl_c_listener(shutdown.clone());

    ShellAdapter::new(router, cli.sender).run(&shutdown).await?;

    tracing::info!("shutdown complete");
    Ok(())
}
