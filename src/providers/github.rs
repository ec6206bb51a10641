// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! GitHub REST integration for the public repository listing on profiles.

use std::time::Duration;

use reqwest::{header, Client, StatusCode};
use serde_json::Value;
use url::Url;

const USER_AGENT: &str = concat!("devconnect-server/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const REPOS_PER_PAGE: &str = "5";
const MAX_USERNAME_LEN: usize = 39;

#[derive(Debug, thiserror::Error)]
pub enum GithubError {
    #[error("GitHub base URL is invalid: {0}")]
    InvalidBaseUrl(String),

    #[error("not a valid GitHub username")]
    InvalidUsername,

    #[error("GitHub returned status {0}")]
    UnexpectedStatus(StatusCode),

    #[error("GitHub request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("GitHub response was invalid: {0}")]
    InvalidResponse(String),
}

#[derive(Debug, Clone)]
pub struct GithubClient {
    base_url: Url,
    token: Option<String>,
    http: Client,
}

impl GithubClient {
    pub fn new(base_url: &str, token: Option<String>) -> Result<Self, GithubError> {
        let base_url =
            Url::parse(base_url).map_err(|e| GithubError::InvalidBaseUrl(e.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(GithubError::InvalidBaseUrl(base_url.to_string()));
        }

        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()
            .map_err(GithubError::Request)?;

        Ok(Self {
            base_url,
            token,
            http,
        })
    }

    /// `{base}/users/{username}/repos?per_page=5&sort=created&direction=asc`
    pub fn repos_url(&self, username: &str) -> Result<Url, GithubError> {
        if !is_valid_username(username) {
            return Err(GithubError::InvalidUsername);
        }

        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| GithubError::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(["users", username, "repos"]);
        url.query_pairs_mut()
            .append_pair("per_page", REPOS_PER_PAGE)
            .append_pair("sort", "created")
            .append_pair("direction", "asc");
        Ok(url)
    }

    /// Fetch a user's first public repositories, oldest first.
    ///
    /// The GitHub payload is passed through untouched.
    pub async fn list_repos(&self, username: &str) -> Result<Value, GithubError> {
        let url = self.repos_url(username)?;

        let mut request = self
            .http
            .get(url)
            .header(header::ACCEPT, "application/vnd.github+json");
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if status != StatusCode::OK {
            tracing::debug!(%status, username, "GitHub repo lookup failed");
            return Err(GithubError::UnexpectedStatus(status));
        }

        let body: Value = response.json().await?;
        if !body.is_array() {
            return Err(GithubError::InvalidResponse(
                "expected a list of repositories".to_string(),
            ));
        }
        Ok(body)
    }
}

/// GitHub logins: 1-39 ASCII alphanumerics or single hyphens, not at either end.
fn is_valid_username(username: &str) -> bool {
    !username.is_empty()
        && username.len() <= MAX_USERNAME_LEN
        && !username.starts_with('-')
        && !username.ends_with('-')
        && !username.contains("--")
        && username
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-')
}
