//! GitHub API client for fetching PRs, reviews, and issues

pub mod client;

pub use client::{
    ClientError, GitHubClient, GithubIssue, GithubLabel, GithubPr, GithubReview, GithubUser,
};
