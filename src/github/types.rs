//! GitHub-specific types and error definitions.

use std::fmt;

use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur while talking to GitHub.
#[derive(Debug, Error)]
pub enum GithubError {
    /// Transport-level failure (connect, timeout, body read).
    #[error("GitHub request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// GitHub answered with a non-success status.
    #[error("GitHub API returned {status}: {message}")]
    Api { status: u16, message: String },

    /// A repository reference that is not `owner/repo`.
    #[error("invalid repository reference '{0}', expected owner/repo")]
    InvalidRepo(String),

    /// A branch reference that is not `owner/repo:branch`.
    #[error("invalid branch reference '{0}', expected owner/repo:branch")]
    InvalidBranch(String),

    /// The configured base URL does not parse.
    #[error("invalid GitHub base URL '{url}': {source}")]
    BaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

/// Result type for GitHub operations.
pub type GithubResult<T> = Result<T, GithubError>;

/// `owner/repo` pair as written in chat commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
    pub owner: String,
    pub name: String,
}

impl RepoRef {
    pub fn parse(raw: &str) -> GithubResult<Self> {
        let trimmed = raw.trim();
        let Some((owner, name)) = trimmed.split_once('/') else {
            return Err(GithubError::InvalidRepo(raw.to_string()));
        };
        if owner.is_empty() || name.is_empty() || name.contains('/') {
            return Err(GithubError::InvalidRepo(raw.to_string()));
        }
        Ok(Self {
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }

    pub fn as_slug(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// `owner/repo:branch` reference used by pull-request and branch commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchRef {
    pub repo: RepoRef,
    pub branch: String,
}

impl BranchRef {
    pub fn parse(raw: &str) -> GithubResult<Self> {
        let trimmed = raw.trim();
        let Some((repo, branch)) = trimmed.split_once(':') else {
            return Err(GithubError::InvalidBranch(raw.to_string()));
        };
        if branch.is_empty() {
            return Err(GithubError::InvalidBranch(raw.to_string()));
        }
        let repo = RepoRef::parse(repo).map_err(|_| GithubError::InvalidBranch(raw.to_string()))?;
        Ok(Self {
            repo,
            branch: branch.to_string(),
        })
    }
}

impl fmt::Display for BranchRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.repo, self.branch)
    }
}

/// Issue as returned by the issues and search APIs.
#[derive(Debug, Clone, Deserialize)]
pub struct Issue {
    pub number: u64,
    pub title: String,
    pub html_url: String,
    #[serde(default)]
    pub state: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PullRequest {
    pub number: u64,
    pub title: String,
    pub html_url: String,
}

/// Response of the merge endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct MergeResult {
    #[serde(default)]
    pub merged: bool,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Release {
    pub tag_name: String,
    #[serde(default)]
    pub name: Option<String>,
    pub html_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchResults {
    pub total_count: u64,
    pub items: Vec<Issue>,
}

/// Commit range comparison (`base...head`).
#[derive(Debug, Clone, Deserialize)]
pub struct Comparison {
    pub html_url: String,
    #[serde(default)]
    pub ahead_by: u64,
    #[serde(default)]
    pub behind_by: u64,
    #[serde(default)]
    pub commits: Vec<CommitEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommitEntry {
    pub sha: String,
    pub commit: CommitDetail,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommitDetail {
    pub message: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GitRef {
    pub object: GitObject,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GitObject {
    pub sha: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Repository {
    pub default_branch: String,
}
