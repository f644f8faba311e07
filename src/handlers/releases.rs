//! Release commands: create, list, latest, changelog.

use std::sync::Arc;

use async_trait::async_trait;

use crate::credentials::TokenStore;
use crate::github::{self, RepoRef};
use crate::handlers::{Action, ActionError, Reply, UNKNOWN_TOKEN_REPLY};
use crate::routing::{MessageContext, Params};

pub struct CreateRelease {
    github: Arc<github::Client>,
    tokens: Arc<TokenStore>,
    name_prefix: String,
}

impl CreateRelease {
    pub fn new(github: Arc<github::Client>, tokens: Arc<TokenStore>, name_prefix: String) -> Self {
        Self {
            github,
            tokens,
            name_prefix,
        }
    }
}

#[async_trait]
impl Action for CreateRelease {
    async fn call(&self, params: &Params, ctx: &MessageContext) -> Result<Reply, ActionError> {
        let Some(token) = self.tokens.get(&ctx.sender) else {
            return Ok(Some(UNKNOWN_TOKEN_REPLY.to_string()));
        };
        let repo = RepoRef::parse(params.require("repo")?)?;

        let latest = self.github.latest_release(&token, &repo).await?;
        let tag = next_tag(latest.as_ref().map(|r| r.tag_name.as_str()), &self.name_prefix);
        let release = self.github.create_release(&token, &repo, &tag).await?;
        Ok(Some(format!("Created release {} {}", release.tag_name, release.html_url)))
    }
}

/// Next release tag: bump the trailing number of the latest tag, or start a
/// fresh `<prefix>1` series when the repository has no releases yet.
fn next_tag(latest: Option<&str>, prefix: &str) -> String {
    let Some(latest) = latest else {
        return format!("{prefix}1");
    };
    let digits_start = latest
        .rfind(|c: char| !c.is_ascii_digit())
        .map(|i| i + c_len(latest, i))
        .unwrap_or(0);
    let (head, digits) = latest.split_at(digits_start);
    match digits.parse::<u64>() {
        Ok(n) => format!("{head}{}", n + 1),
        Err(_) => format!("{prefix}1"),
    }
}

// Byte length of the char starting at `i`, so split_at lands on a boundary.
fn c_len(s: &str, i: usize) -> usize {
    s[i..].chars().next().map(char::len_utf8).unwrap_or(0)
}

pub struct GetReleases {
    github: Arc<github::Client>,
    tokens: Arc<TokenStore>,
}

impl GetReleases {
    pub fn new(github: Arc<github::Client>, tokens: Arc<TokenStore>) -> Self {
        Self { github, tokens }
    }
}

#[async_trait]
impl Action for GetReleases {
    async fn call(&self, params: &Params, ctx: &MessageContext) -> Result<Reply, ActionError> {
        let Some(token) = self.tokens.get(&ctx.sender) else {
            return Ok(Some(UNKNOWN_TOKEN_REPLY.to_string()));
        };
        let repo = RepoRef::parse(params.require("repo")?)?;

        let releases = self.github.releases(&token, &repo).await?;
        if releases.is_empty() {
            return Ok(Some(format!("No releases on {repo}")));
        }
        let lines: Vec<String> = releases
            .iter()
            .map(|r| match r.name.as_deref().filter(|n| !n.is_empty() && *n != r.tag_name) {
                Some(name) => format!("{} ({})", r.tag_name, name),
                None => r.tag_name.clone(),
            })
            .collect();
        Ok(Some(lines.join("\n")))
    }
}

pub struct GetLatestRelease {
    github: Arc<github::Client>,
    tokens: Arc<TokenStore>,
}

impl GetLatestRelease {
    pub fn new(github: Arc<github::Client>, tokens: Arc<TokenStore>) -> Self {
        Self { github, tokens }
    }
}

#[async_trait]
impl Action for GetLatestRelease {
    async fn call(&self, params: &Params, ctx: &MessageContext) -> Result<Reply, ActionError> {
        let Some(token) = self.tokens.get(&ctx.sender) else {
            return Ok(Some(UNKNOWN_TOKEN_REPLY.to_string()));
        };
        let repo = RepoRef::parse(params.require("repo")?)?;

        match self.github.latest_release(&token, &repo).await? {
            Some(release) => Ok(Some(format!("{} {}", release.tag_name, release.html_url))),
            None => Ok(Some(format!("No releases on {repo}"))),
        }
    }
}

pub struct GetChangelog {
    github: Arc<github::Client>,
    tokens: Arc<TokenStore>,
}

impl GetChangelog {
    pub fn new(github: Arc<github::Client>, tokens: Arc<TokenStore>) -> Self {
        Self { github, tokens }
    }
}

#[async_trait]
impl Action for GetChangelog {
    async fn call(&self, params: &Params, ctx: &MessageContext) -> Result<Reply, ActionError> {
        let Some(token) = self.tokens.get(&ctx.sender) else {
            return Ok(Some(UNKNOWN_TOKEN_REPLY.to_string()));
        };
        let repo = RepoRef::parse(params.require("repo")?)?;

        let Some(latest) = self.github.latest_release(&token, &repo).await? else {
            return Ok(Some(format!("No releases on {repo}")));
        };
        let repository = self.github.repository(&token, &repo).await?;
        let comparison = self
            .github
            .compare(&token, &repo, &latest.tag_name, &repository.default_branch)
            .await?;

        if comparison.commits.is_empty() {
            return Ok(Some(format!(
                "Nothing merged since {} on {repo}",
                latest.tag_name
            )));
        }
        let mut lines = vec![format!(
            "Changes since {} on {}:",
            latest.tag_name, repository.default_branch
        )];
        for entry in &comparison.commits {
            let subject = entry.commit.message.lines().next().unwrap_or("");
            lines.push(format!("- {subject}"));
        }
        Ok(Some(lines.join("\n")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_release_starts_the_series() {
        assert_eq!(next_tag(None, ""), "1");
        assert_eq!(next_tag(None, "v"), "v1");
        assert_eq!(next_tag(None, "release-"), "release-1");
    }

    #[test]
    fn bumps_the_trailing_number() {
        assert_eq!(next_tag(Some("v3"), "v"), "v4");
        assert_eq!(next_tag(Some("release-41"), "release-"), "release-42");
        assert_eq!(next_tag(Some("1.2.3"), ""), "1.2.4");
    }

    #[test]
    fn bare_number_tags_bump_too() {
        assert_eq!(next_tag(Some("7"), ""), "8");
    }

    #[test]
    fn unparseable_latest_restarts_the_series() {
        assert_eq!(next_tag(Some("latest"), "v"), "v1");
    }
}
