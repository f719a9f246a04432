//! GitHub contents API backend
//!
//! Documents are files in a repository. The blob SHA is the revision token,
//! and a stale SHA on PUT comes back as 409 or 422.

use std::time::Duration;

use async_trait::async_trait;
use base64::prelude::*;
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::{Deserialize, Serialize};

use super::backend::{ContentBackend, PutRequest, RemoteDocument};
use super::error::{StoreError, StoreResult};

/// Connection settings for the contents API
#[derive(Debug, Clone)]
pub struct GitHubSettings {
    pub api_url: String,
    /// `owner/name`
    pub repo: String,
    pub token: String,
    pub branch: Option<String>,
    pub timeout: Duration,
}

impl GitHubSettings {
    pub const DEFAULT_API_URL: &'static str = "https://api.github.com";

    pub fn new(repo: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            api_url: Self::DEFAULT_API_URL.to_string(),
            repo: repo.into(),
            token: token.into(),
            branch: None,
            timeout: Duration::from_secs(10),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ContentsResponse {
    content: String,
    sha: String,
}

#[derive(Debug, Serialize)]
struct PutBody<'a> {
    message: &'a str,
    content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    sha: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    branch: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct PutResponse {
    content: PutResponseContent,
}

#[derive(Debug, Deserialize)]
struct PutResponseContent {
    sha: String,
}

/// Content backend over `GET/PUT /repos/{repo}/contents/{path}`
pub struct GitHubBackend {
    client: Client,
    settings: GitHubSettings,
}

impl GitHubBackend {
    pub fn new(settings: GitHubSettings) -> StoreResult<Self> {
        let client = Client::builder()
            .timeout(settings.timeout)
            .user_agent(concat!("rollkeeper/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client, settings })
    }

    fn contents_url(&self, path: &str) -> String {
        contents_url(&self.settings.api_url, &self.settings.repo, path)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client
            .request(method, self.contents_url(path))
            .bearer_auth(&self.settings.token)
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28")
    }
}

#[async_trait]
impl ContentBackend for GitHubBackend {
    async fn fetch(&self, path: &str) -> StoreResult<Option<RemoteDocument>> {
        let mut request = self.request(Method::GET, path);
        if let Some(branch) = &self.settings.branch {
            request = request.query(&[("ref", branch)]);
        }

        let response = request.send().await?;
        let status = response.status();
        log::debug!("GET {} -> {}", path, status);

        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let text = response.text().await?;
        if !status.is_success() {
            return Err(StoreError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        let parsed: ContentsResponse = serde_json::from_str(&text)?;
        Ok(Some(RemoteDocument {
            content: decode_content(&parsed.content)?,
            revision: parsed.sha,
        }))
    }

    async fn put(&self, path: &str, request: PutRequest) -> StoreResult<String> {
        let body = PutBody {
            message: &request.message,
            content: BASE64_STANDARD.encode(&request.content),
            sha: request.revision.as_deref(),
            branch: self.settings.branch.as_deref(),
        };

        let response = self.request(Method::PUT, path).json(&body).send().await?;
        let status = response.status();
        log::debug!("PUT {} -> {}", path, status);

        let text = response.text().await?;
        if !status.is_success() {
            return Err(put_failure(status, path, text));
        }

        let parsed: PutResponse = serde_json::from_str(&text)?;
        Ok(parsed.content.sha)
    }

    fn name(&self) -> &'static str {
        "github"
    }
}

fn contents_url(api_url: &str, repo: &str, path: &str) -> String {
    format!(
        "{}/repos/{}/contents/{}",
        api_url.trim_end_matches('/'),
        repo,
        path.trim_start_matches('/')
    )
}

/// The API wraps base64 content at 60 columns
fn decode_content(content: &str) -> StoreResult<Vec<u8>> {
    let compact: String = content.chars().filter(|c| !c.is_whitespace()).collect();
    Ok(BASE64_STANDARD.decode(compact)?)
}

fn put_failure(status: StatusCode, path: &str, body: String) -> StoreError {
    match status {
        StatusCode::CONFLICT | StatusCode::UNPROCESSABLE_ENTITY => StoreError::Conflict {
            path: path.to_string(),
        },
        _ => StoreError::Status {
            status: status.as_u16(),
            body,
        },
    }
}
