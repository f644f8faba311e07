//! Token registration command.

use std::sync::Arc;

use async_trait::async_trait;

use crate::credentials::TokenStore;
use crate::handlers::{Action, ActionError, Reply};
use crate::routing::{MessageContext, Params};

/// Stores the sender's GitHub access token for later commands.
pub struct Remember {
    tokens: Arc<TokenStore>,
}

impl Remember {
    pub fn new(tokens: Arc<TokenStore>) -> Self {
        Self { tokens }
    }
}

#[async_trait]
impl Action for Remember {
    async fn call(&self, params: &Params, ctx: &MessageContext) -> Result<Reply, ActionError> {
        let token = params.require("token")?;
        self.tokens.remember(&ctx.sender, token);
        tracing::info!(sender = %ctx.sender, "remembered a GitHub token");
        Ok(Some("I remembered your GitHub access token".to_string()))
    }
}
