//! GitHub organization inventory.

use gei_http::HttpClient;
use gei_types::{Repository, VersionInfo, Visibility};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info};
use url::Url;

use crate::error::{Result, SourceError};
use crate::request::{endpoint, parse_base, parse_json};

/// Public GitHub API endpoint.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Repositories requested per page.
pub const PAGE_SIZE: usize = 100;

/// GitHub `/meta` response (GHES only reports `installed_version`).
#[derive(Debug, Deserialize)]
struct GitHubMeta {
    #[serde(default)]
    installed_version: Option<String>,
}

/// Client for a GitHub or GitHub Enterprise Server API.
#[derive(Debug, Clone)]
pub struct GithubClient {
    http: HttpClient,
    api_url: Url,
    pat: Option<String>,
    page_size: usize,
}

impl GithubClient {
    /// Create a new client. An empty `api_url` means github.com.
    pub fn new(http: HttpClient, api_url: &str, pat: Option<String>) -> Result<Self> {
        let api_url = if api_url.trim().is_empty() {
            DEFAULT_API_URL
        } else {
            api_url
        };

        Ok(Self {
            http,
            api_url: parse_base(api_url)?,
            pat: pat.filter(|p| !p.is_empty()),
            page_size: PAGE_SIZE,
        })
    }

    /// Override the page size.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Returns the API base URL.
    pub fn api_url(&self) -> &Url {
        &self.api_url
    }

    /// Whether this client talks to github.com rather than a GHES instance.
    pub fn is_github_com(&self) -> bool {
        self.api_url.host_str() == Some("api.github.com")
    }

    fn headers(&self) -> Vec<(&'static str, String)> {
        let mut headers = vec![
            ("Accept", "application/vnd.github+json".to_string()),
            ("X-GitHub-Api-Version", "2022-11-28".to_string()),
        ];

        if let Some(pat) = &self.pat {
            headers.push(("Authorization", format!("Bearer {pat}")));
        }

        headers
    }

    /// Fetch every repository of an organization, in API order.
    ///
    /// Pages are requested until one comes back short or carries no
    /// repository names.
    pub async fn get_repos(&self, org: &str) -> Result<Vec<Repository>> {
        if org.trim().is_empty() {
            return Err(SourceError::empty("org"));
        }

        info!(org = %org, "Fetching repositories for organization");

        let headers = self.headers();
        let per_page = self.page_size.to_string();
        let mut repos = Vec::new();
        let mut page: u32 = 1;

        loop {
            let mut url = endpoint(&self.api_url, &["orgs", org, "repos"]);
            url.query_pairs_mut()
                .append_pair("per_page", &per_page)
                .append_pair("page", &page.to_string());

            let context = format!("fetch repos for org '{org}' (page {page})");
            let body = self
                .http
                .get(url.as_str(), &headers)
                .await
                .map_err(|source| SourceError::Http {
                    context: context.clone(),
                    source,
                })?;

            let entries: Vec<Value> = parse_json(&body, &context)?;
            let count = entries.len();

            let before = repos.len();
            repos.extend(entries.iter().filter_map(repository_from_json));
            let named = repos.len() - before;

            debug!(page, count, named, "Fetched repository page");

            if count < self.page_size || named == 0 {
                break;
            }

            page += 1;
        }

        info!(org = %org, count = repos.len(), "Found repositories");
        Ok(repos)
    }

    /// Fetch the GHES version from `/meta`.
    ///
    /// Not available on github.com.
    pub async fn get_version(&self) -> Result<VersionInfo> {
        if self.is_github_com() {
            return Err(SourceError::Unsupported(
                "version endpoint not available on GitHub.com".to_string(),
            ));
        }

        let url = endpoint(&self.api_url, &["meta"]);
        let context = "fetch server version";
        let body = self
            .http
            .get(url.as_str(), &self.headers())
            .await
            .map_err(|source| SourceError::Http {
                context: context.to_string(),
                source,
            })?;

        let meta: GitHubMeta = parse_json(&body, context)?;
        Ok(VersionInfo::new(meta.installed_version.unwrap_or_default()))
    }
}

/// Normalize one entry of `/orgs/{org}/repos`.
///
/// Entries without a non-empty name are dropped; a missing or unknown
/// visibility becomes private.
fn repository_from_json(entry: &Value) -> Option<Repository> {
    let name = entry.get("name")?.as_str()?;
    if name.is_empty() {
        return None;
    }

    let visibility = entry
        .get("visibility")
        .and_then(Value::as_str)
        .and_then(Visibility::parse)
        .unwrap_or_default();

    Some(Repository::new(name, visibility))
}
