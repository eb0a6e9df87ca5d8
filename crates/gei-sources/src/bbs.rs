//! Bitbucket Server / Data Center inventory.

use gei_http::HttpClient;
use gei_types::Repository;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, info};
use url::Url;

use crate::error::{Result, SourceError};
use crate::pagination::StartLimitPage;
use crate::request::{basic_auth, endpoint, parse_base, parse_json};

/// Items requested per page (the server's own default).
pub const PAGE_LIMIT: u32 = 25;

/// A Bitbucket Server project.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BbsProject {
    /// Numeric project ID.
    pub id: u64,
    /// Project key, used in URLs.
    pub key: String,
    /// Display name.
    pub name: String,
}

/// A Bitbucket Server repository.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BbsRepository {
    /// Numeric repository ID.
    pub id: u64,
    /// URL-safe slug.
    pub slug: String,
    /// Display name.
    pub name: String,
}

/// Client for the Bitbucket Server REST API.
#[derive(Debug, Clone)]
pub struct BbsClient {
    http: HttpClient,
    base_url: Url,
    username: String,
    password: String,
    limit: u32,
}

impl BbsClient {
    /// Create a new client.
    ///
    /// # Arguments
    ///
    /// * `http` - Shared HTTP client
    /// * `server_url` - Bitbucket Server base URL
    /// * `username` - Bitbucket username
    /// * `password` - Bitbucket password or HTTP access token
    pub fn new(
        http: HttpClient,
        server_url: &str,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self> {
        if server_url.trim().is_empty() {
            return Err(SourceError::empty("server URL"));
        }

        Ok(Self {
            http,
            base_url: parse_base(server_url)?,
            username: username.into(),
            password: password.into(),
            limit: PAGE_LIMIT,
        })
    }

    /// Override the page limit.
    pub fn with_page_limit(mut self, limit: u32) -> Self {
        self.limit = limit.max(1);
        self
    }

    fn headers(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Authorization", basic_auth(&self.username, &self.password)),
            ("Accept", "application/json".to_string()),
        ]
    }

    /// Walk a start/limit listing until the server reports the last page.
    async fn get_all<T: DeserializeOwned>(&self, segments: &[&str], what: &str) -> Result<Vec<T>> {
        let headers = self.headers();
        let limit = self.limit.to_string();
        let mut items = Vec::new();
        let mut start: u64 = 0;

        loop {
            let mut url = endpoint(&self.base_url, segments);
            url.query_pairs_mut()
                .append_pair("start", &start.to_string())
                .append_pair("limit", &limit);

            debug!(start, limit = self.limit, "Fetching {what}");

            let context = format!("fetch {what} (start={start})");
            let body = self
                .http
                .get(url.as_str(), &headers)
                .await
                .map_err(|source| SourceError::Http {
                    context: context.clone(),
                    source,
                })?;

            let page: StartLimitPage<T> = parse_json(&body, &context)?;
            let next = page.next_start();
            items.extend(page.values);

            match next {
                Some(next_start) => start = next_start,
                None => break,
            }
        }

        Ok(items)
    }

    /// Fetch every project on the server.
    pub async fn get_projects(&self) -> Result<Vec<BbsProject>> {
        let projects: Vec<BbsProject> = self
            .get_all(&["rest", "api", "1.0", "projects"], "projects")
            .await?;

        debug!(count = projects.len(), "Found projects");
        Ok(projects)
    }

    /// Fetch every repository in a project.
    pub async fn get_repos(&self, project_key: &str) -> Result<Vec<BbsRepository>> {
        if project_key.trim().is_empty() {
            return Err(SourceError::empty("project key"));
        }

        let repos: Vec<BbsRepository> = self
            .get_all(
                &["rest", "api", "1.0", "projects", project_key, "repos"],
                &format!("repos for project '{project_key}'"),
            )
            .await?;

        debug!(project = %project_key, count = repos.len(), "Found repositories");
        Ok(repos)
    }

    /// Fetch a project's repositories as migration candidates.
    ///
    /// Repositories are identified by slug and migrate as private.
    pub async fn list_repositories(&self, project_key: &str) -> Result<Vec<Repository>> {
        let repos = self.get_repos(project_key).await?;
        let repos: Vec<Repository> = repos
            .into_iter()
            .filter(|r| !r.slug.is_empty())
            .map(|r| Repository::private(r.slug))
            .collect();

        info!(project = %project_key, count = repos.len(), "Found repositories");
        Ok(repos)
    }
}
