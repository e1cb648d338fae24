//! GitHub Issues implementation of the issue tracker.

use std::sync::Arc;

use anyhow::anyhow;
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use serde::Deserialize;
use tracing::{debug, error, info, instrument};

use crate::base::{
    config::Config,
    types::{CreatedIssue, IssueDraft, Res},
};

use super::{GenericIssueTracker, IssueTracker};

/// Media type for the v3 REST API.
const GITHUB_ACCEPT: &str = "application/vnd.github.v3+json";

// Extra methods on `IssueTracker` applied by the GitHub implementation.

impl IssueTracker {
    pub fn github(config: &Config) -> Res<Self> {
        let client = GitHubIssueTracker::new(config)?;
        Ok(Self { inner: Arc::new(client) })
    }
}

// Specific implementations.

/// Error body returned by the GitHub API.
#[derive(Debug, Deserialize)]
struct GitHubError {
    message: Option<String>,
}

/// GitHub issue tracker implementation.
#[derive(Clone)]
pub struct GitHubIssueTracker {
    client: reqwest::Client,
    api_url: String,
    token: Option<String>,
    repo: Option<String>,
}

impl GitHubIssueTracker {
    /// Create a new GitHub issue tracker.
    ///
    /// A missing token or repository is not an error here; it fails each submission instead.
    #[instrument(name = "GitHubIssueTracker::new", skip_all)]
    pub fn new(config: &Config) -> Res<Self> {
        let client = reqwest::Client::builder().user_agent(config.user_agent.clone()).build()?;

        if config.github_token.is_none() || config.github_repo.is_none() {
            error!("GitHub token or repository is not configured; bug reports will be rejected.");
        }

        Ok(Self {
            client,
            api_url: config.github_api_url.trim_end_matches('/').to_string(),
            token: config.github_token.clone(),
            repo: config.github_repo.clone(),
        })
    }
}

#[async_trait]
impl GenericIssueTracker for GitHubIssueTracker {
    #[instrument(skip_all)]
    async fn create_issue(&self, draft: &IssueDraft) -> Res<CreatedIssue> {
        let token = self.token.as_deref().ok_or_else(|| anyhow!("GitHub token is not configured"))?;
        let repo = self.repo.as_deref().ok_or_else(|| anyhow!("GitHub repository is not configured"))?;

        let url = format!("{}/repos/{}/issues", self.api_url, repo);

        debug!(title = %draft.title, "Creating GitHub issue");

        // `reqwest` errors carry the request URL, which names the repository.
        let response = self
            .client
            .post(&url)
            .bearer_auth(token)
            .header(ACCEPT, GITHUB_ACCEPT)
            .json(draft)
            .send()
            .await
            .map_err(|e| anyhow!("Failed to reach the GitHub API: {}", e.without_url()))?;

        let status = response.status();

        if !status.is_success() {
            // The message field is best-effort; fall back to the reason phrase.
            let message = response
                .json::<GitHubError>()
                .await
                .ok()
                .and_then(|e| e.message)
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown error").to_string());

            error!(%status, %message, "GitHub API error");

            return Err(anyhow!("GitHub API error: {message}"));
        }

        let issue: CreatedIssue = response.json().await.map_err(|e| anyhow!("Unexpected GitHub API response: {}", e.without_url()))?;

        info!(number = issue.number, "Created GitHub issue");

        Ok(issue)
    }
}
