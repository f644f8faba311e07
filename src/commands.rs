//! The command table.
//!
//! Every chat command the bot understands, registered in a fixed order.
//! Registration order is the tie-break for overlapping patterns, so entries
//! here must not be rearranged.

use std::sync::Arc;

use crate::config::BotConfig;
use crate::credentials::TokenStore;
use crate::github;
use crate::handlers::branches::CreateBranch;
use crate::handlers::diffs::{GetCommitDiff, GetPullRequestDiff};
use crate::handlers::help::Help;
use crate::handlers::issues::{CloseIssue, CreateIssue, SearchIssues};
use crate::handlers::pull_requests::{CreatePullRequest, ListPullRequests, MergePullRequest};
use crate::handlers::releases::{CreateRelease, GetChangelog, GetLatestRelease, GetReleases};
use crate::handlers::remember::Remember;
use crate::routing::{RegistryError, Router};

/// Pattern sources, exactly as registered.
pub mod patterns {
    /// Shared issue/PR reference fragment: accepts `owner/repo#42` as well
    /// as full issue and pull-request URLs.
    pub const ISSUE_REF: &str =
        r"(?:https?://[^/]+/)?(?<repo>.+)(?:#|/pull/|/issues/)(?<number>\d+) ?";

    pub const CREATE_ISSUE: &str =
        r#"create issue "(?<title>.+)" on (?<repo>.+)(?:\n(?<description>[\s\S]+))?\z"#;
    pub const REMEMBER: &str = r"remember my github token (?<token>.+)\z";
    pub const CREATE_PULL_REQUEST: &str =
        r#"pull request "(?<title>.+)" from (?<from>.+) to (?<to>.+)(?:\n(?<description>[\s\S]+))?\z"#;
    pub const SEARCH_ISSUES: &str = r"search issues (?<query>.+)";
    pub const CREATE_BRANCH: &str = r"create branch (?<to_branch>.+) from (?<from>.+)\z";
    pub const CREATE_RELEASE: &str = r"create release (?<repo>.+)";
    pub const GET_RELEASES: &str = r"get releases (?<repo>.+)";
    pub const GET_LATEST_RELEASE: &str = r"get latest release (?<repo>.+)";
    pub const GET_COMMIT_DIFF: &str = r"get commit diff (?<repo>.+) (?<base>.+)\.\.(?<head>.+)";
    pub const GET_PR_DIFF: &str =
        r"get pull request diff (?<repo>.+) (?<base>.+)\.\.(?<head>.+)";
    pub const GET_CHANGELOG: &str = r"get changelog (?<repo>.+)";
    pub const LIST_PULL_REQUESTS: &str = r"list pull request (?<repo>.+)";
    pub const HELP: &str = r"help\z";

    pub fn close_issue() -> String {
        format!(r"close(?: issue)? {ISSUE_REF}\z")
    }

    pub fn merge_pull_request() -> String {
        format!(r"merge {ISSUE_REF}\z")
    }
}

/// Build the router with the full command table bound to live actions.
pub fn router(
    github: Arc<github::Client>,
    tokens: Arc<TokenStore>,
    config: &BotConfig,
) -> Result<Router, RegistryError> {
    let builder = Router::builder()
        .rule(
            patterns::CREATE_ISSUE,
            "create_issue",
            "Create a new issue",
            Arc::new(CreateIssue::new(github.clone(), tokens.clone())),
        )?
        .rule(
            patterns::REMEMBER,
            "remember",
            "Remember sender's GitHub access token",
            Arc::new(Remember::new(tokens.clone())),
        )?
        .rule(
            &patterns::close_issue(),
            "close_issue",
            "Close an issue",
            Arc::new(CloseIssue::new(github.clone(), tokens.clone())),
        )?
        .rule(
            patterns::CREATE_PULL_REQUEST,
            "create_pull_request",
            "Create a pull request",
            Arc::new(CreatePullRequest::new(github.clone(), tokens.clone())),
        )?
        .rule(
            &patterns::merge_pull_request(),
            "merge_pull_request",
            "Merge pull request",
            Arc::new(MergePullRequest::new(github.clone(), tokens.clone())),
        )?
        .rule(
            patterns::SEARCH_ISSUES,
            "search_issues",
            "Search issues",
            Arc::new(SearchIssues::new(github.clone(), tokens.clone())),
        )?
        .rule(
            patterns::CREATE_BRANCH,
            "create_branch",
            "Create a branch",
            Arc::new(CreateBranch::new(github.clone(), tokens.clone())),
        )?
        .rule(
            patterns::CREATE_RELEASE,
            "create_release",
            "Create a release",
            Arc::new(CreateRelease::new(
                github.clone(),
                tokens.clone(),
                config.github.release_name_prefix.clone(),
            )),
        )?
        .rule(
            patterns::GET_RELEASES,
            "get_releases",
            "Get releases",
            Arc::new(GetReleases::new(github.clone(), tokens.clone())),
        )?
        .rule(
            patterns::GET_LATEST_RELEASE,
            "get_latest_release",
            "Get latest release",
            Arc::new(GetLatestRelease::new(github.clone(), tokens.clone())),
        )?
        .rule(
            patterns::GET_COMMIT_DIFF,
            "get_commit_diff",
            "Get commit diff",
            Arc::new(GetCommitDiff::new(github.clone(), tokens.clone())),
        )?
        .rule(
            patterns::GET_PR_DIFF,
            "get_pr_diff",
            "Get Pull Request diff",
            Arc::new(GetPullRequestDiff::new(github.clone(), tokens.clone())),
        )?
        .rule(
            patterns::GET_CHANGELOG,
            "get_changelog",
            "Get changelog",
            Arc::new(GetChangelog::new(github.clone(), tokens.clone())),
        )?
        .rule(
            patterns::LIST_PULL_REQUESTS,
            "list_pull_requests",
            "List Pull Requests",
            Arc::new(ListPullRequests::new(github.clone(), tokens.clone())),
        )?;

    // Help renders from everything registered above, then registers itself.
    let help = Help::from_registry(builder.registry());
    let builder = builder.rule(patterns::HELP, "help", "List all commands", Arc::new(help))?;

    Ok(builder.build())
}
