//! Activity source seam over the GitHub API
//!
//! The weekly walk consumes activity through this trait instead of a
//! process-global client; one `GitHubClient` is built at startup and handed
//! in by reference.

use chrono::{DateTime, Utc};
use github::{ClientError, GitHubClient, GithubIssue, GithubPr, GithubReview};

#[allow(async_fn_in_trait)]
pub trait ActivitySource {
    /// Pull requests in descending `updated_at` order. Pagination stops once
    /// a page ends past `cutoff`; the tail of the final page may still be
    /// older than the cutoff, so callers walking the stream own the early
    /// stop.
    async fn pull_requests_updated_since(
        &self,
        owner: &str,
        repo: &str,
        cutoff: DateTime<Utc>,
    ) -> Result<Vec<GithubPr>, ClientError>;

    async fn reviews(
        &self,
        owner: &str,
        repo: &str,
        pr_number: i32,
    ) -> Result<Vec<GithubReview>, ClientError>;

    /// Issues updated since `since` (server-side filter). PR entries are
    /// included, as the issues API conflates the two.
    async fn issues_updated_since(
        &self,
        owner: &str,
        repo: &str,
        since: DateTime<Utc>,
    ) -> Result<Vec<GithubIssue>, ClientError>;
}

impl ActivitySource for GitHubClient {
    async fn pull_requests_updated_since(
        &self,
        owner: &str,
        repo: &str,
        cutoff: DateTime<Utc>,
    ) -> Result<Vec<GithubPr>, ClientError> {
        self.fetch_prs_updated_since(owner, repo, cutoff).await
    }

    async fn reviews(
        &self,
        owner: &str,
        repo: &str,
        pr_number: i32,
    ) -> Result<Vec<GithubReview>, ClientError> {
        self.list_reviews(owner, repo, pr_number).await
    }

    async fn issues_updated_since(
        &self,
        owner: &str,
        repo: &str,
        since: DateTime<Utc>,
    ) -> Result<Vec<GithubIssue>, ClientError> {
        self.fetch_issues_updated_since(owner, repo, since).await
    }
}
