//! Pull-request commands: create, merge, list.

use std::sync::Arc;

use async_trait::async_trait;

use crate::credentials::TokenStore;
use crate::github::{self, BranchRef, RepoRef};
use crate::handlers::{Action, ActionError, Reply, UNKNOWN_TOKEN_REPLY};
use crate::routing::{MessageContext, Params};

pub struct CreatePullRequest {
    github: Arc<github::Client>,
    tokens: Arc<TokenStore>,
}

impl CreatePullRequest {
    pub fn new(github: Arc<github::Client>, tokens: Arc<TokenStore>) -> Self {
        Self { github, tokens }
    }
}

#[async_trait]
impl Action for CreatePullRequest {
    async fn call(&self, params: &Params, ctx: &MessageContext) -> Result<Reply, ActionError> {
        let Some(token) = self.tokens.get(&ctx.sender) else {
            return Ok(Some(UNKNOWN_TOKEN_REPLY.to_string()));
        };
        let title = params.require("title")?;
        let head = BranchRef::parse(params.require("from")?)?;
        let base = BranchRef::parse(params.require("to")?)?;
        let description = params.get("description");

        let pull = self
            .github
            .create_pull_request(&token, &base, &head, title, description)
            .await?;
        Ok(Some(format!("Created {}", pull.html_url)))
    }
}

pub struct MergePullRequest {
    github: Arc<github::Client>,
    tokens: Arc<TokenStore>,
}

impl MergePullRequest {
    pub fn new(github: Arc<github::Client>, tokens: Arc<TokenStore>) -> Self {
        Self { github, tokens }
    }
}

#[async_trait]
impl Action for MergePullRequest {
    async fn call(&self, params: &Params, ctx: &MessageContext) -> Result<Reply, ActionError> {
        let Some(token) = self.tokens.get(&ctx.sender) else {
            return Ok(Some(UNKNOWN_TOKEN_REPLY.to_string()));
        };
        let repo = RepoRef::parse(params.require("repo")?)?;
        let number: u64 = params.require("number")?.parse()?;

        let result = self.github.merge_pull_request(&token, &repo, number).await?;
        if result.merged {
            Ok(Some(format!("Merged {repo}#{number}")))
        } else {
            Ok(Some(format!("Could not merge {repo}#{number}: {}", result.message)))
        }
    }
}

pub struct ListPullRequests {
    github: Arc<github::Client>,
    tokens: Arc<TokenStore>,
}

impl ListPullRequests {
    pub fn new(github: Arc<github::Client>, tokens: Arc<TokenStore>) -> Self {
        Self { github, tokens }
    }
}

#[async_trait]
impl Action for ListPullRequests {
    async fn call(&self, params: &Params, ctx: &MessageContext) -> Result<Reply, ActionError> {
        let Some(token) = self.tokens.get(&ctx.sender) else {
            return Ok(Some(UNKNOWN_TOKEN_REPLY.to_string()));
        };
        let repo = RepoRef::parse(params.require("repo")?)?;

        let pulls = self.github.open_pull_requests(&token, &repo).await?;
        if pulls.is_empty() {
            return Ok(Some(format!("No open pull requests on {repo}")));
        }
        let lines: Vec<String> = pulls
            .iter()
            .map(|p| format!("#{} {} {}", p.number, p.title, p.html_url))
            .collect();
        Ok(Some(lines.join("\n")))
    }
}
