//! Branch commands.

use std::sync::Arc;

use async_trait::async_trait;

use crate::credentials::TokenStore;
use crate::github::{self, BranchRef};
use crate::handlers::{Action, ActionError, Reply, UNKNOWN_TOKEN_REPLY};
use crate::routing::{MessageContext, Params};

pub struct CreateBranch {
    github: Arc<github::Client>,
    tokens: Arc<TokenStore>,
}

impl CreateBranch {
    pub fn new(github: Arc<github::Client>, tokens: Arc<TokenStore>) -> Self {
        Self { github, tokens }
    }
}

#[async_trait]
impl Action for CreateBranch {
    async fn call(&self, params: &Params, ctx: &MessageContext) -> Result<Reply, ActionError> {
        let Some(token) = self.tokens.get(&ctx.sender) else {
            return Ok(Some(UNKNOWN_TOKEN_REPLY.to_string()));
        };
        let to_branch = params.require("to_branch")?;
        let from = BranchRef::parse(params.require("from")?)?;

        let sha = self
            .github
            .branch_sha(&token, &from.repo, &from.branch)
            .await?;
        self.github
            .create_branch(&token, &from.repo, to_branch, &sha)
            .await?;
        Ok(Some(format!(
            "Created branch {to_branch} on {} from {}",
            from.repo, from.branch
        )))
    }
}
