//! Code-host REST adapter.
//!
//! Talks to a GitHub-style JSON API: one call for the user profile, one
//! for the repository list. An API token is optional; providing one
//! raises the service-side rate limit.

use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::Client as ReqwestClient;
use serde::Deserialize;
use tracing::debug;

use crate::domain::models::{CollaboratorsConfig, DeveloperProfile, RepoSummary};
use crate::domain::ports::{CodeHostSource, SourceError};

#[derive(Debug, Deserialize)]
struct ApiUser {
    #[serde(default)]
    bio: Option<String>,
    #[serde(default)]
    company: Option<String>,
    #[serde(default)]
    blog: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiRepo {
    name: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    stargazers_count: u64,
    #[serde(default)]
    language: Option<String>,
}

pub struct CodeHostClient {
    http: ReqwestClient,
    api_base: String,
    max_repos: usize,
}

impl CodeHostClient {
    pub fn new(config: &CollaboratorsConfig) -> anyhow::Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static("sift-pipeline"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));
        if let Some(token) = &config.code_host_token {
            let value = HeaderValue::from_str(&format!("Bearer {token}"))
                .context("code-host token is not a valid header value")?;
            headers.insert(AUTHORIZATION, value);
        }

        let http = ReqwestClient::builder()
            .timeout(Duration::from_secs(15))
            .default_headers(headers)
            .build()
            .context("failed to build code-host HTTP client")?;

        Ok(Self {
            http,
            api_base: config.code_host_api_base.trim_end_matches('/').to_string(),
            max_repos: config.max_repos,
        })
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: String) -> Result<T, SourceError> {
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|err| SourceError::Network(err.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(SourceError::NotFound(url));
        }
        if !status.is_success() {
            return Err(SourceError::Network(format!("{url} returned {status}")));
        }

        response
            .json()
            .await
            .map_err(|err| SourceError::Malformed(err.to_string()))
    }
}

#[async_trait]
impl CodeHostSource for CodeHostClient {
    async fn fetch(&self, username: &str) -> Result<DeveloperProfile, SourceError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(SourceError::Unsupported("empty username".into()));
        }

        debug!(username, "fetching code-host profile");
        let user: ApiUser = self.get_json(format!("{}/users/{username}", self.api_base)).await?;

        // Repo listing is best-effort on top of a found profile.
        let repos: Vec<ApiRepo> = self
            .get_json(format!(
                "{}/users/{username}/repos?per_page=100&sort=pushed",
                self.api_base
            ))
            .await
            .unwrap_or_default();

        let mut repos: Vec<RepoSummary> = repos
            .into_iter()
            .map(|repo| RepoSummary {
                name: repo.name,
                description: repo.description,
                stars: repo.stargazers_count,
                language: repo.language,
            })
            .collect();
        repos.sort_by(|a, b| b.stars.cmp(&a.stars));
        repos.truncate(self.max_repos);

        Ok(DeveloperProfile {
            bio: user.bio.filter(|bio| !bio.trim().is_empty()),
            company: user.company.filter(|company| !company.trim().is_empty()),
            blog: user.blog.filter(|blog| !blog.trim().is_empty()),
            repos,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(api_base: &str) -> CollaboratorsConfig {
        CollaboratorsConfig {
            code_host_api_base: api_base.to_string(),
            max_repos: 2,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_fetch_profile_and_top_repos() {
        let mut server = mockito::Server::new_async().await;
        let _user = server
            .mock("GET", "/users/octocat")
            .with_status(200)
            .with_body(r#"{"bio":"builds things","company":"@acme","blog":"https://octo.cat"}"#)
            .create_async()
            .await;
        let _repos = server
            .mock("GET", "/users/octocat/repos")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_body(
                r#"[
                    {"name":"small","stargazers_count":1},
                    {"name":"big","description":"popular","stargazers_count":900,"language":"Rust"},
                    {"name":"mid","stargazers_count":50}
                ]"#,
            )
            .create_async()
            .await;

        let client = CodeHostClient::new(&config(&server.url())).unwrap();
        let profile = client.fetch("octocat").await.unwrap();

        assert_eq!(profile.bio.as_deref(), Some("builds things"));
        assert_eq!(profile.blog.as_deref(), Some("https://octo.cat"));
        assert_eq!(profile.repos.len(), 2);
        assert_eq!(profile.repos[0].name, "big");
        assert_eq!(profile.repos[1].name, "mid");
    }

    #[tokio::test]
    async fn test_unknown_user_is_not_found() {
        let mut server = mockito::Server::new_async().await;
        let _user = server
            .mock("GET", "/users/ghost")
            .with_status(404)
            .create_async()
            .await;

        let client = CodeHostClient::new(&config(&server.url())).unwrap();
        assert!(matches!(client.fetch("ghost").await, Err(SourceError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_repo_listing_failure_degrades_to_empty() {
        let mut server = mockito::Server::new_async().await;
        let _user = server
            .mock("GET", "/users/octocat")
            .with_status(200)
            .with_body(r#"{"bio":"hi"}"#)
            .create_async()
            .await;
        let _repos = server
            .mock("GET", "/users/octocat/repos")
            .match_query(mockito::Matcher::Any)
            .with_status(500)
            .create_async()
            .await;

        let client = CodeHostClient::new(&config(&server.url())).unwrap();
        let profile = client.fetch("octocat").await.unwrap();
        assert_eq!(profile.bio.as_deref(), Some("hi"));
        assert!(profile.repos.is_empty());
    }
}
