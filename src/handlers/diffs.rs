//! Commit-range commands: commit diff and pull-request diff.

use std::sync::Arc;

use async_trait::async_trait;

use crate::credentials::TokenStore;
use crate::github::types::Comparison;
use crate::github::{self, RepoRef};
use crate::handlers::{Action, ActionError, Reply, UNKNOWN_TOKEN_REPLY};
use crate::routing::{MessageContext, Params};

pub struct GetCommitDiff {
    github: Arc<github::Client>,
    tokens: Arc<TokenStore>,
}

impl GetCommitDiff {
    pub fn new(github: Arc<github::Client>, tokens: Arc<TokenStore>) -> Self {
        Self { github, tokens }
    }
}

#[async_trait]
impl Action for GetCommitDiff {
    async fn call(&self, params: &Params, ctx: &MessageContext) -> Result<Reply, ActionError> {
        let Some(token) = self.tokens.get(&ctx.sender) else {
            return Ok(Some(UNKNOWN_TOKEN_REPLY.to_string()));
        };
        let repo = RepoRef::parse(params.require("repo")?)?;
        let base = params.require("base")?;
        let head = params.require("head")?;

        let comparison = self.github.compare(&token, &repo, base, head).await?;
        Ok(Some(format!(
            "{} commits ahead, {} behind\n{}",
            comparison.ahead_by, comparison.behind_by, comparison.html_url
        )))
    }
}

pub struct GetPullRequestDiff {
    github: Arc<github::Client>,
    tokens: Arc<TokenStore>,
}

impl GetPullRequestDiff {
    pub fn new(github: Arc<github::Client>, tokens: Arc<TokenStore>) -> Self {
        Self { github, tokens }
    }
}

#[async_trait]
impl Action for GetPullRequestDiff {
    async fn call(&self, params: &Params, ctx: &MessageContext) -> Result<Reply, ActionError> {
        let Some(token) = self.tokens.get(&ctx.sender) else {
            return Ok(Some(UNKNOWN_TOKEN_REPLY.to_string()));
        };
        let repo = RepoRef::parse(params.require("repo")?)?;
        let base = params.require("base")?;
        let head = params.require("head")?;

        let comparison = self.github.compare(&token, &repo, base, head).await?;
        let pulls = merged_pulls(&comparison);
        if pulls.is_empty() {
            return Ok(Some(format!(
                "No pull requests merged between {base}..{head}\n{}",
                comparison.html_url
            )));
        }
        let mut lines = pulls;
        lines.push(comparison.html_url.clone());
        Ok(Some(lines.join("\n")))
    }
}

/// Render one line per merged pull request found in the compared range.
///
/// GitHub merge commits read `Merge pull request #N from ...` with the PR
/// title in the paragraph after the blank line.
fn merged_pulls(comparison: &Comparison) -> Vec<String> {
    let mut lines = Vec::new();
    for entry in &comparison.commits {
        let message = &entry.commit.message;
        let Some(first_line) = message.lines().next() else {
            continue;
        };
        let Some(rest) = first_line.strip_prefix("Merge pull request #") else {
            continue;
        };
        let Some(number) = rest.split_whitespace().next() else {
            continue;
        };
        let title = message
            .split_once("\n\n")
            .map(|(_, body)| body.lines().next().unwrap_or("").trim())
            .unwrap_or("");
        if title.is_empty() {
            lines.push(format!("#{number}"));
        } else {
            lines.push(format!("#{number} {title}"));
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::types::{CommitDetail, CommitEntry};

    fn comparison(messages: &[&str]) -> Comparison {
        Comparison {
            html_url: "https://example.com/compare".to_string(),
            ahead_by: messages.len() as u64,
            behind_by: 0,
            commits: messages
                .iter()
                .map(|m| CommitEntry {
                    sha: "abc123".to_string(),
                    commit: CommitDetail {
                        message: m.to_string(),
                    },
                })
                .collect(),
        }
    }

    #[test]
    fn extracts_merge_commits_with_titles() {
        let cmp = comparison(&[
            "Merge pull request #12 from org/feature\n\nAdd the thing",
            "Fix typo",
            "Merge pull request #15 from org/other\n\nAnother thing",
        ]);
        assert_eq!(merged_pulls(&cmp), vec!["#12 Add the thing", "#15 Another thing"]);
    }

    #[test]
    fn merge_commit_without_title_still_lists_the_number() {
        let cmp = comparison(&["Merge pull request #3 from org/hotfix"]);
        assert_eq!(merged_pulls(&cmp), vec!["#3"]);
    }

    #[test]
    fn plain_commits_yield_nothing() {
        let cmp = comparison(&["Fix build", "Bump deps"]);
        assert!(merged_pulls(&cmp).is_empty());
    }
}
