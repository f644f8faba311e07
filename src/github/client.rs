//! GitHub REST client.
//!
//! # Responsibilities
//! - Derive and validate the API root (github.com or an enterprise install)
//! - Issue authenticated requests with the sender's token
//! - Deserialize responses and map API failures to typed errors
//!
//! # Design Decisions
//! - One `reqwest` client reused for every call; per-request bearer auth
//! - Request timeout comes from configuration, not from the routing core
//! - Callers pass typed references (`RepoRef`, `BranchRef`); path assembly
//!   stays in here

use reqwest::header::ACCEPT;
use serde::de::DeserializeOwned;
use serde_json::json;
use url::Url;

use crate::config::GithubConfig;
use crate::github::types::{
    BranchRef, Comparison, GithubError, GithubResult, GitRef, Issue, MergeResult, PullRequest,
    Release, RepoRef, Repository, SearchResults,
};

const DEFAULT_API_ROOT: &str = "https://api.github.com/";
const ACCEPT_JSON: &str = "application/vnd.github+json";
const USER_AGENT: &str = concat!("repobot/", env!("CARGO_PKG_VERSION"));

/// GitHub API client. Holds no credentials; every call authenticates with
/// the sender's own token.
#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::Client,
    api_root: Url,
}

impl Client {
    /// Build a client from configuration.
    ///
    /// With `base_url` set (GitHub Enterprise), the API root becomes
    /// `<base>/api/v3/`; otherwise `api.github.com` is used.
    pub fn new(config: &GithubConfig) -> GithubResult<Self> {
        let api_root = match &config.base_url {
            Some(base) => {
                let normalized = if base.ends_with('/') {
                    base.clone()
                } else {
                    format!("{base}/")
                };
                let parsed: Url = normalized.parse().map_err(|source| GithubError::BaseUrl {
                    url: base.clone(),
                    source,
                })?;
                parsed.join("api/v3/").map_err(|source| GithubError::BaseUrl {
                    url: base.clone(),
                    source,
                })?
            }
            None => DEFAULT_API_ROOT
                .parse()
                .map_err(|source| GithubError::BaseUrl {
                    url: DEFAULT_API_ROOT.to_string(),
                    source,
                })?,
        };

        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(std::time::Duration::from_secs(config.request_timeout_secs))
            .build()?;

        tracing::debug!(api_root = %api_root, "GitHub client initialized");
        Ok(Self { http, api_root })
    }

    pub(crate) fn api_root(&self) -> &Url {
        &self.api_root
    }

    fn url(&self, path: &str) -> GithubResult<Url> {
        self.api_root.join(path).map_err(|source| GithubError::BaseUrl {
            url: path.to_string(),
            source,
        })
    }

    /// Open a new issue; `body` may span multiple lines.
    pub async fn create_issue(
        &self,
        token: &str,
        repo: &RepoRef,
        title: &str,
        body: Option<&str>,
    ) -> GithubResult<Issue> {
        let url = self.url(&format!("repos/{}/issues", repo.as_slug()))?;
        let res = self
            .http
            .post(url)
            .bearer_auth(token)
            .header(ACCEPT, ACCEPT_JSON)
            .json(&json!({ "title": title, "body": body }))
            .send()
            .await?;
        into_result(res).await
    }

    pub async fn close_issue(
        &self,
        token: &str,
        repo: &RepoRef,
        number: u64,
    ) -> GithubResult<Issue> {
        let url = self.url(&format!("repos/{}/issues/{number}", repo.as_slug()))?;
        let res = self
            .http
            .patch(url)
            .bearer_auth(token)
            .header(ACCEPT, ACCEPT_JSON)
            .json(&json!({ "state": "closed" }))
            .send()
            .await?;
        into_result(res).await
    }

    /// Open a pull request against `base`'s repository.
    pub async fn create_pull_request(
        &self,
        token: &str,
        base: &BranchRef,
        head: &BranchRef,
        title: &str,
        body: Option<&str>,
    ) -> GithubResult<PullRequest> {
        let url = self.url(&format!("repos/{}/pulls", base.repo.as_slug()))?;
        let res = self
            .http
            .post(url)
            .bearer_auth(token)
            .header(ACCEPT, ACCEPT_JSON)
            .json(&json!({
                "title": title,
                "head": format!("{}:{}", head.repo.owner, head.branch),
                "base": base.branch,
                "body": body,
            }))
            .send()
            .await?;
        into_result(res).await
    }

    pub async fn merge_pull_request(
        &self,
        token: &str,
        repo: &RepoRef,
        number: u64,
    ) -> GithubResult<MergeResult> {
        let url = self.url(&format!("repos/{}/pulls/{number}/merge", repo.as_slug()))?;
        let res = self
            .http
            .put(url)
            .bearer_auth(token)
            .header(ACCEPT, ACCEPT_JSON)
            .json(&json!({}))
            .send()
            .await?;
        into_result(res).await
    }

    pub async fn open_pull_requests(
        &self,
        token: &str,
        repo: &RepoRef,
    ) -> GithubResult<Vec<PullRequest>> {
        let url = self.url(&format!("repos/{}/pulls", repo.as_slug()))?;
        let res = self
            .http
            .get(url)
            .bearer_auth(token)
            .header(ACCEPT, ACCEPT_JSON)
            .send()
            .await?;
        into_result(res).await
    }

    pub async fn search_issues(&self, token: &str, query: &str) -> GithubResult<SearchResults> {
        let url = self.url("search/issues")?;
        let res = self
            .http
            .get(url)
            .bearer_auth(token)
            .header(ACCEPT, ACCEPT_JSON)
            .query(&[("q", query)])
            .send()
            .await?;
        into_result(res).await
    }

    /// Resolve the commit sha a branch currently points at.
    pub async fn branch_sha(
        &self,
        token: &str,
        repo: &RepoRef,
        branch: &str,
    ) -> GithubResult<String> {
        let url = self.url(&format!("repos/{}/git/ref/heads/{branch}", repo.as_slug()))?;
        let res = self
            .http
            .get(url)
            .bearer_auth(token)
            .header(ACCEPT, ACCEPT_JSON)
            .send()
            .await?;
        let git_ref: GitRef = into_result(res).await?;
        Ok(git_ref.object.sha)
    }

    pub async fn create_branch(
        &self,
        token: &str,
        repo: &RepoRef,
        branch: &str,
        sha: &str,
    ) -> GithubResult<()> {
        let url = self.url(&format!("repos/{}/git/refs", repo.as_slug()))?;
        let res = self
            .http
            .post(url)
            .bearer_auth(token)
            .header(ACCEPT, ACCEPT_JSON)
            .json(&json!({ "ref": format!("refs/heads/{branch}"), "sha": sha }))
            .send()
            .await?;
        let _: GitRef = into_result(res).await?;
        Ok(())
    }

    pub async fn releases(&self, token: &str, repo: &RepoRef) -> GithubResult<Vec<Release>> {
        let url = self.url(&format!("repos/{}/releases", repo.as_slug()))?;
        let res = self
            .http
            .get(url)
            .bearer_auth(token)
            .header(ACCEPT, ACCEPT_JSON)
            .send()
            .await?;
        into_result(res).await
    }

    /// Latest published release, or `None` when the repository has none.
    pub async fn latest_release(
        &self,
        token: &str,
        repo: &RepoRef,
    ) -> GithubResult<Option<Release>> {
        let url = self.url(&format!("repos/{}/releases/latest", repo.as_slug()))?;
        let res = self
            .http
            .get(url)
            .bearer_auth(token)
            .header(ACCEPT, ACCEPT_JSON)
            .send()
            .await?;
        match into_result(res).await {
            Ok(release) => Ok(Some(release)),
            Err(GithubError::Api { status: 404, .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    pub async fn create_release(
        &self,
        token: &str,
        repo: &RepoRef,
        tag: &str,
    ) -> GithubResult<Release> {
        let url = self.url(&format!("repos/{}/releases", repo.as_slug()))?;
        let res = self
            .http
            .post(url)
            .bearer_auth(token)
            .header(ACCEPT, ACCEPT_JSON)
            .json(&json!({ "tag_name": tag, "name": tag }))
            .send()
            .await?;
        into_result(res).await
    }

    /// Compare `base...head` within one repository.
    pub async fn compare(
        &self,
        token: &str,
        repo: &RepoRef,
        base: &str,
        head: &str,
    ) -> GithubResult<Comparison> {
        let url = self.url(&format!(
            "repos/{}/compare/{base}...{head}",
            repo.as_slug()
        ))?;
        let res = self
            .http
            .get(url)
            .bearer_auth(token)
            .header(ACCEPT, ACCEPT_JSON)
            .send()
            .await?;
        into_result(res).await
    }

    pub async fn repository(&self, token: &str, repo: &RepoRef) -> GithubResult<Repository> {
        let url = self.url(&format!("repos/{}", repo.as_slug()))?;
        let res = self
            .http
            .get(url)
            .bearer_auth(token)
            .header(ACCEPT, ACCEPT_JSON)
            .send()
            .await?;
        into_result(res).await
    }
}

/// Deserialize a success body, or map the failure to [`GithubError::Api`]
/// carrying the API's own message when one is present.
async fn into_result<T: DeserializeOwned>(res: reqwest::Response) -> GithubResult<T> {
    let status = res.status();
    if status.is_success() {
        return Ok(res.json::<T>().await?);
    }

    let body = res.text().await.unwrap_or_default();
    let message = serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
        .unwrap_or_else(|| truncate(&body, 200));
    Err(GithubError::Api {
        status: status.as_u16(),
        message,
    })
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max).collect();
        format!("{cut}...")
    }
}

#[cfg(test)]
mod tests {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    use super::*;
    use crate::config::GithubConfig;

    /// Start a backend that answers every request with one canned response.
    async fn canned_backend(status_line: &'static str, body: &'static str) -> std::net::SocketAddr {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            loop {
                let Ok((mut socket, _)) = listener.accept().await else {
                    break;
                };
                tokio::spawn(async move {
                    let mut buf = [0u8; 4096];
                    let _ = socket.read(&mut buf).await;
                    let response = format!(
                        "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                        status_line,
                        body.len(),
                        body
                    );
                    let _ = socket.write_all(response.as_bytes()).await;
                    let _ = socket.shutdown().await;
                });
            }
        });
        addr
    }

    fn client_for(addr: std::net::SocketAddr) -> Client {
        let config = GithubConfig {
            base_url: Some(format!("http://{addr}")),
            ..GithubConfig::default()
        };
        Client::new(&config).unwrap()
    }

    #[test]
    fn default_api_root_is_github_com() {
        let client = Client::new(&GithubConfig::default()).unwrap();
        assert_eq!(client.api_root().as_str(), "https://api.github.com/");
    }

    #[test]
    fn enterprise_base_url_gets_api_suffix() {
        let config = GithubConfig {
            base_url: Some("https://github.example.com".to_string()),
            ..GithubConfig::default()
        };
        let client = Client::new(&config).unwrap();
        assert_eq!(
            client.api_root().as_str(),
            "https://github.example.com/api/v3/"
        );
    }

    #[test]
    fn garbage_base_url_is_rejected() {
        let config = GithubConfig {
            base_url: Some("not a url at all".to_string()),
            ..GithubConfig::default()
        };
        assert!(matches!(
            Client::new(&config),
            Err(GithubError::BaseUrl { .. })
        ));
    }

    #[tokio::test]
    async fn create_issue_parses_the_created_issue() {
        let addr = canned_backend(
            "201 Created",
            r#"{"number":12,"title":"Bug","html_url":"https://example.com/org/repo/issues/12","state":"open"}"#,
        )
        .await;
        let client = client_for(addr);

        let repo = RepoRef::parse("org/repo").unwrap();
        let issue = client
            .create_issue("t0ken", &repo, "Bug", Some("details"))
            .await
            .unwrap();
        assert_eq!(issue.number, 12);
        assert_eq!(issue.html_url, "https://example.com/org/repo/issues/12");
    }

    #[tokio::test]
    async fn api_failure_carries_the_api_message() {
        let addr = canned_backend(
            "422 Unprocessable Entity",
            r#"{"message":"Validation Failed"}"#,
        )
        .await;
        let client = client_for(addr);

        let repo = RepoRef::parse("org/repo").unwrap();
        let err = client
            .create_issue("t0ken", &repo, "Bug", None)
            .await
            .unwrap_err();
        let GithubError::Api { status, message } = err else {
            panic!("expected an API error");
        };
        assert_eq!(status, 422);
        assert_eq!(message, "Validation Failed");
    }

    #[test]
    fn truncate_caps_long_bodies() {
        let long = "x".repeat(500);
        let cut = truncate(&long, 200);
        assert_eq!(cut.chars().count(), 203);
        assert!(cut.ends_with("..."));
    }
}
