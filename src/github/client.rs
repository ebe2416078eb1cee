use anyhow::{Context, Result};
use serde::de::DeserializeOwned;

use crate::github::models::{Comment, Issue, Repository};

/// GitHub REST API root used when no override is configured.
pub const DEFAULT_API_BASE_URL: &str = "https://api.github.com";

const USER_AGENT: &str = "dump-issue-thread";
const ACCEPT: &str = "application/vnd.github+json";
const COMMENTS_PER_PAGE: &str = "100";

/// The GitHub operations the thread dumper needs.
///
/// Implemented by [`GitHubClient`] for real requests and by in-memory fakes
/// in tests.
#[allow(async_fn_in_trait)]
pub trait IssueApi {
    /// Look up a repository by its `owner/name` identifier.
    async fn get_repository(&self, full_name: &str) -> Result<Repository>;
    /// Look up an issue by number within `repository`.
    async fn get_issue(&self, repository: &Repository, number: u64) -> Result<Issue>;
    /// All comments of `issue` in the order GitHub returns them (oldest first).
    async fn list_comments(&self, repository: &Repository, issue: &Issue) -> Result<Vec<Comment>>;
}

/// Token-authenticated GitHub REST client.
pub struct GitHubClient {
    client: reqwest::Client,
    base_url: String,
    token: String,
}

impl GitHubClient {
    pub fn new(token: &str, base_url: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .context("Failed to create HTTP client")?;
        Ok(GitHubClient {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str, query: &[(&str, &str)]) -> Result<T> {
        let (body, _) = self.get_json_page(url, query).await?;
        Ok(body)
    }

    /// GET that also returns the `rel="next"` URL from the `Link` header.
    async fn get_json_page<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<(T, Option<String>)> {
        tracing::debug!(%url, "GET");
        let response = self
            .client
            .get(url)
            .query(query)
            .bearer_auth(&self.token)
            .header("Accept", ACCEPT)
            .send()
            .await
            .with_context(|| format!("Failed to send request: GET {url}"))?;

        let status = response.status();
        tracing::debug!(%url, %status, "response");
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(anyhow::anyhow!("Token invalid or expired (GET {url})"));
        }
        if !status.is_success() {
            return Err(anyhow::anyhow!("API request error: {status} (GET {url})"));
        }

        let next_url = parse_link_next(response.headers());
        let body = response
            .json::<T>()
            .await
            .with_context(|| format!("Failed to parse response: GET {url}"))?;
        Ok((body, next_url))
    }
}

/// Extracts the `rel="next"` target from a GitHub `Link` header.
fn parse_link_next(headers: &reqwest::header::HeaderMap) -> Option<String> {
    let link = headers.get(reqwest::header::LINK)?.to_str().ok()?;
    link.split(',')
        .map(str::trim)
        .find(|part| part.contains("rel=\"next\""))
        .and_then(|part| {
            let start = part.find('<')? + 1;
            let end = part.find('>')?;
            Some(part[start..end].to_string())
        })
}

impl IssueApi for GitHubClient {
    async fn get_repository(&self, full_name: &str) -> Result<Repository> {
        let url = format!("{}/repos/{}", self.base_url, full_name);
        self.get_json(&url, &[]).await
    }

    async fn get_issue(&self, repository: &Repository, number: u64) -> Result<Issue> {
        let url = format!(
            "{}/repos/{}/issues/{}",
            self.base_url, repository.full_name, number
        );
        self.get_json(&url, &[]).await
    }

    async fn list_comments(&self, repository: &Repository, issue: &Issue) -> Result<Vec<Comment>> {
        let url = format!(
            "{}/repos/{}/issues/{}/comments",
            self.base_url, repository.full_name, issue.number
        );
        let (mut comments, mut next_url): (Vec<Comment>, _) = self
            .get_json_page(&url, &[("per_page", COMMENTS_PER_PAGE)])
            .await?;
        while let Some(page_url) = next_url {
            let (page, following): (Vec<Comment>, _) = self.get_json_page(&page_url, &[]).await?;
            comments.extend(page);
            next_url = following;
        }
        Ok(comments)
    }
}
