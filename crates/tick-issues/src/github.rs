use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use serde::Deserialize;
use tick_core::GithubToken;
use tracing::{debug, instrument};

use crate::error::IssueError;

pub const DEFAULT_ISSUES_URL: &str = "https://api.github.com/issues";

const USER_AGENT: &str = concat!("tick/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// An issue assigned to the authenticated user.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct Issue {
    pub title: String,
    #[serde(default)]
    pub state: String,
    pub repository: Repository,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct Repository {
    pub name: String,
}

impl Issue {
    /// Task description for this issue: `"<repository>: <title>"`.
    pub fn task_description(&self) -> String {
        format!("{}: {}", self.repository.name, self.title)
    }
}

/// Source of assigned issues.
#[async_trait]
pub trait IssueSource: Send + Sync {
    async fn assigned_issues(&self, token: &GithubToken) -> Result<Vec<Issue>, IssueError>;
}

/// GitHub REST client for `GET /issues`.
pub struct GithubIssues {
    client: reqwest::Client,
    endpoint: String,
}

impl Default for GithubIssues {
    fn default() -> Self {
        Self::new(DEFAULT_ISSUES_URL)
    }
}

impl GithubIssues {
    pub fn new(endpoint: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()
            .unwrap_or_default();
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl IssueSource for GithubIssues {
    #[instrument(skip(self, token), fields(endpoint = %self.endpoint))]
    async fn assigned_issues(&self, token: &GithubToken) -> Result<Vec<Issue>, IssueError> {
        let response = self
            .client
            .get(&self.endpoint)
            .bearer_auth(token.expose())
            .header(ACCEPT, "application/vnd.github+json")
            .send()
            .await
            .map_err(|e| IssueError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| IssueError::Network(e.to_string()))?;

        if !status.is_success() {
            return Err(IssueError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let issues: Vec<Issue> =
            serde_json::from_str(&body).map_err(|e| IssueError::Decode(e.to_string()))?;
        debug!(count = issues.len(), "fetched assigned issues");
        Ok(issues)
    }
}
