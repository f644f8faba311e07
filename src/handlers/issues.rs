//! Issue commands: create, close, search.

use std::sync::Arc;

use async_trait::async_trait;

use crate::credentials::TokenStore;
use crate::github::{self, RepoRef};
use crate::handlers::{Action, ActionError, Reply, UNKNOWN_TOKEN_REPLY};
use crate::routing::{MessageContext, Params};

pub struct CreateIssue {
    github: Arc<github::Client>,
    tokens: Arc<TokenStore>,
}

impl CreateIssue {
    pub fn new(github: Arc<github::Client>, tokens: Arc<TokenStore>) -> Self {
        Self { github, tokens }
    }
}

#[async_trait]
impl Action for CreateIssue {
    async fn call(&self, params: &Params, ctx: &MessageContext) -> Result<Reply, ActionError> {
        let Some(token) = self.tokens.get(&ctx.sender) else {
            return Ok(Some(UNKNOWN_TOKEN_REPLY.to_string()));
        };
        let repo = RepoRef::parse(params.require("repo")?)?;
        let title = params.require("title")?;
        let description = params.get("description");

        let issue = self
            .github
            .create_issue(&token, &repo, title, description)
            .await?;
        Ok(Some(format!("Created {}", issue.html_url)))
    }
}

pub struct CloseIssue {
    github: Arc<github::Client>,
    tokens: Arc<TokenStore>,
}

impl CloseIssue {
    pub fn new(github: Arc<github::Client>, tokens: Arc<TokenStore>) -> Self {
        Self { github, tokens }
    }
}

#[async_trait]
impl Action for CloseIssue {
    async fn call(&self, params: &Params, ctx: &MessageContext) -> Result<Reply, ActionError> {
        let Some(token) = self.tokens.get(&ctx.sender) else {
            return Ok(Some(UNKNOWN_TOKEN_REPLY.to_string()));
        };
        let repo = RepoRef::parse(params.require("repo")?)?;
        let number: u64 = params.require("number")?.parse()?;

        let issue = self.github.close_issue(&token, &repo, number).await?;
        Ok(Some(format!("Closed {}", issue.html_url)))
    }
}

pub struct SearchIssues {
    github: Arc<github::Client>,
    tokens: Arc<TokenStore>,
}

impl SearchIssues {
    pub fn new(github: Arc<github::Client>, tokens: Arc<TokenStore>) -> Self {
        Self { github, tokens }
    }
}

#[async_trait]
impl Action for SearchIssues {
    async fn call(&self, params: &Params, ctx: &MessageContext) -> Result<Reply, ActionError> {
        let Some(token) = self.tokens.get(&ctx.sender) else {
            return Ok(Some(UNKNOWN_TOKEN_REPLY.to_string()));
        };
        let query = params.require("query")?;

        let results = self.github.search_issues(&token, query).await?;
        let mut lines = vec![format!("{} issues", results.total_count)];
        for issue in &results.items {
            lines.push(format!("{} {} {}", issue.state, issue.title, issue.html_url));
        }
        Ok(Some(lines.join("\n")))
    }
}
