//! GitHub REST API client for fetching PRs, reviews, and issues

use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Rate limited, retry after {retry_after} seconds")]
    RateLimited { retry_after: u64 },
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("GitHub API error: {status} - {message}")]
    Api { status: u16, message: String },
}

/// GitHub API client
pub struct GitHubClient {
    client: reqwest::Client,
    token: Option<String>,
}

/// PR as returned by GitHub API. Timestamps deserialize as UTC instants;
/// a payload with naive timestamps fails at this boundary.
#[derive(Debug, Clone, Deserialize)]
pub struct GithubPr {
    pub number: i32,
    pub state: String,
    pub user: GithubUser,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub merged_at: Option<DateTime<Utc>>,
    pub closed_at: Option<DateTime<Utc>>,
}

impl GithubPr {
    /// The list endpoint carries no `merged` flag; a merge timestamp is the signal.
    pub fn is_merged(&self) -> bool {
        self.merged_at.is_some()
    }
}

/// Review as returned by GitHub API
#[derive(Debug, Clone, Deserialize)]
pub struct GithubReview {
    /// Absent for ghost accounts
    pub user: Option<GithubUser>,
    /// Absent for pending reviews
    pub submitted_at: Option<DateTime<Utc>>,
}

/// User as returned by GitHub API
#[derive(Debug, Clone, Deserialize)]
pub struct GithubUser {
    pub login: String,
}

/// Issue as returned by GitHub API. The issues endpoint also returns pull
/// requests; those carry a `pull_request` key.
#[derive(Debug, Clone, Deserialize)]
pub struct GithubIssue {
    pub number: i32,
    pub state: String,
    pub user: Option<GithubUser>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub closed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub labels: Vec<GithubLabel>,
    #[serde(default)]
    pub pull_request: Option<serde::de::IgnoredAny>,
}

impl GithubIssue {
    pub fn is_pull_request(&self) -> bool {
        self.pull_request.is_some()
    }

    pub fn has_label(&self, name: &str) -> bool {
        self.labels.iter().any(|l| l.name == name)
    }
}

/// Issue label as returned by GitHub API
#[derive(Debug, Clone, Deserialize)]
pub struct GithubLabel {
    pub name: String,
}

impl GitHubClient {
    pub fn new(token: Option<String>) -> Self {
        let client = reqwest::Client::new();
        Self { client, token }
    }

    fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static("team-pulse/0.1"));
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        if let Some(ref token) = self.token {
            if let Ok(val) = HeaderValue::from_str(&format!("Bearer {}", token)) {
                headers.insert(AUTHORIZATION, val);
            }
        }
        headers
    }

    async fn get<T: for<'de> Deserialize<'de>>(&self, url: &str) -> Result<T, ClientError> {
        debug!("GET {}", url);
        let resp = self.client.get(url).headers(self.headers()).send().await?;

        let status = resp.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ClientError::NotFound(url.to_string()));
        }
        if status == reqwest::StatusCode::FORBIDDEN
            || status == reqwest::StatusCode::TOO_MANY_REQUESTS
        {
            let retry_after = resp
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse().ok())
                .unwrap_or(60);
            return Err(ClientError::RateLimited { retry_after });
        }
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(resp.json().await?)
    }

    /// Fetch one page of PRs, sorted by `updated_at` descending.
    pub async fn list_prs(
        &self,
        owner: &str,
        repo: &str,
        state: &str, // "all", "open", "closed"
        page: u32,
        per_page: u32,
    ) -> Result<Vec<GithubPr>, ClientError> {
        let url = format!(
            "https://api.github.com/repos/{}/{}/pulls?state={}&page={}&per_page={}&sort=updated&direction=desc",
            owner, repo, state, page, per_page
        );
        self.get(&url).await
    }

    /// Fetch all reviews for a PR
    pub async fn list_reviews(
        &self,
        owner: &str,
        repo: &str,
        pr_number: i32,
    ) -> Result<Vec<GithubReview>, ClientError> {
        let url = format!(
            "https://api.github.com/repos/{}/{}/pulls/{}/reviews",
            owner, repo, pr_number
        );
        self.get(&url).await
    }

    /// Fetch one page of issues updated since a given instant. The server
    /// filters on `since`; results include PR entries.
    pub async fn list_issues(
        &self,
        owner: &str,
        repo: &str,
        since: DateTime<Utc>,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<GithubIssue>, ClientError> {
        let url = format!(
            "https://api.github.com/repos/{}/{}/issues?state=all&since={}&page={}&per_page={}",
            owner,
            repo,
            since.to_rfc3339_opts(SecondsFormat::Secs, true),
            page,
            per_page
        );
        self.get(&url).await
    }

    /// Fetch PRs in descending `updated_at` order, paging until a page ends
    /// past `cutoff`. The tail of the final page may still be older than the
    /// cutoff; callers walking the stream own the early stop.
    pub async fn fetch_prs_updated_since(
        &self,
        owner: &str,
        repo: &str,
        cutoff: DateTime<Utc>,
    ) -> Result<Vec<GithubPr>, ClientError> {
        let mut all_prs = Vec::new();
        let mut page = 1u32;
        let per_page = 100u32;

        loop {
            info!("Fetching PRs page {} for {}/{}", page, owner, repo);
            let prs = self.list_prs(owner, repo, "all", page, per_page).await?;

            if prs.is_empty() {
                break;
            }

            let page_len = prs.len() as u32;
            let oldest_in_page = prs.iter().map(|p| p.updated_at).min();
            all_prs.extend(prs);

            // PRs are sorted by updated desc; once a page reaches past the
            // cutoff, nothing later can be in range.
            if oldest_in_page.map(|d| d < cutoff).unwrap_or(true) {
                debug!("Reached PRs older than cutoff, stopping pagination");
                break;
            }
            if page_len < per_page {
                break;
            }

            page += 1;

            // Safety: don't fetch more than 50 pages (5000 PRs)
            if page > 50 {
                warn!("Hit pagination limit of 50 pages");
                break;
            }
        }

        info!("Fetched {} PRs total for {}/{}", all_prs.len(), owner, repo);
        Ok(all_prs)
    }

    /// Fetch all issues updated since `since`, handling pagination.
    pub async fn fetch_issues_updated_since(
        &self,
        owner: &str,
        repo: &str,
        since: DateTime<Utc>,
    ) -> Result<Vec<GithubIssue>, ClientError> {
        let mut all_issues = Vec::new();
        let mut page = 1u32;
        let per_page = 100u32;

        loop {
            info!("Fetching issues page {} for {}/{}", page, owner, repo);
            let issues = self.list_issues(owner, repo, since, page, per_page).await?;

            let page_len = issues.len() as u32;
            all_issues.extend(issues);

            if page_len < per_page {
                break;
            }

            page += 1;

            if page > 50 {
                warn!("Hit pagination limit of 50 pages");
                break;
            }
        }

        info!(
            "Fetched {} issues total for {}/{}",
            all_issues.len(),
            owner,
            repo
        );
        Ok(all_issues)
    }
}
