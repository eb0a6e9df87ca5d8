//! Azure DevOps inventory and service connection lookup.

use gei_http::HttpClient;
use gei_types::Repository;
use serde::Deserialize;
use tracing::{debug, info, warn};
use url::Url;

use crate::error::{Result, SourceError};
use crate::pagination::ValueList;
use crate::request::{basic_auth, endpoint, parse_base, parse_json};

/// Azure DevOps Services endpoint.
pub const DEFAULT_ADO_URL: &str = "https://dev.azure.com";

/// Service endpoint type for GitHub connections.
pub const GITHUB_ENDPOINT_TYPE: &str = "GitHub";

/// Service endpoint type created by the Azure Pipelines GitHub app.
pub const PIPELINES_APP_ENDPOINT_TYPE: &str = "GitHubProximaPipelines";

/// An Azure DevOps team project.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TeamProject {
    /// Project GUID.
    pub id: String,
    /// Project name.
    pub name: String,
}

/// An Azure DevOps Git repository.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdoRepository {
    /// Repository GUID.
    pub id: String,
    /// Repository name.
    pub name: String,
    /// Size in bytes.
    #[serde(default)]
    pub size: u64,
    /// Disabled repositories cannot be migrated.
    #[serde(default)]
    pub is_disabled: bool,
}

/// An Azure DevOps service endpoint (service connection).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServiceEndpoint {
    /// Endpoint GUID.
    pub id: String,
    /// Endpoint type, e.g. `GitHub`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Endpoint name.
    pub name: String,
}

impl ServiceEndpoint {
    /// Whether this endpoint is the GitHub connection for `github_org` in
    /// `team_project`.
    ///
    /// Either a `GitHub` endpoint named after the organization, or a pipelines
    /// app endpoint named after the team project. Both comparisons ignore case.
    pub fn matches(&self, github_org: &str, team_project: &str) -> bool {
        (self.kind.eq_ignore_ascii_case(GITHUB_ENDPOINT_TYPE)
            && self.name.eq_ignore_ascii_case(github_org))
            || (self.kind.eq_ignore_ascii_case(PIPELINES_APP_ENDPOINT_TYPE)
                && self.name.eq_ignore_ascii_case(team_project))
    }
}

/// Client for the Azure DevOps REST API.
#[derive(Debug, Clone)]
pub struct AdoClient {
    http: HttpClient,
    base_url: Url,
    pat: String,
}

impl AdoClient {
    /// Create a new client. An empty `base_url` means Azure DevOps Services.
    pub fn new(http: HttpClient, base_url: &str, pat: impl Into<String>) -> Result<Self> {
        let base_url = if base_url.trim().is_empty() {
            DEFAULT_ADO_URL
        } else {
            base_url
        };

        Ok(Self {
            http,
            base_url: parse_base(base_url)?,
            pat: pat.into(),
        })
    }

    fn headers(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Authorization", basic_auth("", &self.pat)),
            ("Accept", "application/json".to_string()),
        ]
    }

    async fn get_list<T: serde::de::DeserializeOwned>(
        &self,
        segments: &[&str],
        api_version: &str,
        context: &str,
    ) -> Result<Vec<T>> {
        let mut url = endpoint(&self.base_url, segments);
        url.query_pairs_mut().append_pair("api-version", api_version);

        let body = self
            .http
            .get(url.as_str(), &self.headers())
            .await
            .map_err(|source| SourceError::Http {
                context: context.to_string(),
                source,
            })?;

        let list: ValueList<T> = parse_json(&body, context)?;
        Ok(list.value)
    }

    /// Fetch every team project in an organization.
    pub async fn get_team_projects(&self, org: &str) -> Result<Vec<TeamProject>> {
        if org.trim().is_empty() {
            return Err(SourceError::empty("org"));
        }

        debug!(org = %org, "Fetching team projects");

        let projects: Vec<TeamProject> = self
            .get_list(
                &[org, "_apis", "projects"],
                "6.1-preview",
                &format!("fetch team projects for org '{org}'"),
            )
            .await?;

        debug!(count = projects.len(), "Found team projects");
        Ok(projects)
    }

    /// Fetch every repository in a team project, including disabled ones.
    pub async fn get_repos(&self, org: &str, team_project: &str) -> Result<Vec<AdoRepository>> {
        if org.trim().is_empty() {
            return Err(SourceError::empty("org"));
        }
        if team_project.trim().is_empty() {
            return Err(SourceError::empty("team project"));
        }

        debug!(org = %org, team_project = %team_project, "Fetching repositories");

        let repos: Vec<AdoRepository> = self
            .get_list(
                &[org, team_project, "_apis", "git", "repositories"],
                "6.1-preview.1",
                &format!("fetch repos for '{org}/{team_project}'"),
            )
            .await?;

        debug!(count = repos.len(), "Found repositories");
        Ok(repos)
    }

    /// Fetch the repositories of a team project that are not disabled.
    pub async fn get_enabled_repos(
        &self,
        org: &str,
        team_project: &str,
    ) -> Result<Vec<AdoRepository>> {
        let repos = self.get_repos(org, team_project).await?;
        let total = repos.len();

        let enabled: Vec<AdoRepository> = repos.into_iter().filter(|r| !r.is_disabled).collect();

        debug!(enabled = enabled.len(), total, "Filtered disabled repositories");
        Ok(enabled)
    }

    /// Fetch a team project's enabled repositories as migration candidates.
    ///
    /// Azure DevOps has no repository visibility; everything migrates as private.
    pub async fn list_repositories(&self, org: &str, team_project: &str) -> Result<Vec<Repository>> {
        let repos: Vec<Repository> = self
            .get_enabled_repos(org, team_project)
            .await?
            .into_iter()
            .filter(|r| !r.name.is_empty())
            .map(|r| Repository::private(r.name))
            .collect();

        info!(org = %org, team_project = %team_project, count = repos.len(), "Found repositories");
        Ok(repos)
    }

    /// Find the ID of the GitHub service connection for `github_org`.
    ///
    /// Team projects are probed in order and the first match wins. A team
    /// project whose endpoints cannot be fetched is logged and skipped.
    /// Returns `None` when no team project has a match.
    pub async fn get_github_app_id(
        &self,
        org: &str,
        github_org: &str,
        team_projects: &[String],
    ) -> Result<Option<String>> {
        if org.trim().is_empty() {
            return Err(SourceError::empty("org"));
        }
        if github_org.trim().is_empty() {
            return Err(SourceError::empty("GitHub org"));
        }
        if team_projects.is_empty() {
            return Ok(None);
        }

        debug!(org = %org, github_org = %github_org, "Searching for GitHub service connection");

        for team_project in team_projects {
            match self.find_endpoint(org, github_org, team_project).await {
                Ok(Some(id)) => {
                    debug!(id = %id, team_project = %team_project, "Found GitHub service connection");
                    return Ok(Some(id));
                }
                Ok(None) => {}
                Err(e) => {
                    warn!(team_project = %team_project, error = %e, "Skipping team project");
                }
            }
        }

        debug!("No GitHub service connection found in any team project");
        Ok(None)
    }

    async fn find_endpoint(
        &self,
        org: &str,
        github_org: &str,
        team_project: &str,
    ) -> Result<Option<String>> {
        let endpoints: Vec<ServiceEndpoint> = self
            .get_list(
                &[org, team_project, "_apis", "serviceendpoint", "endpoints"],
                "6.0-preview.4",
                &format!("fetch service endpoints for '{org}/{team_project}'"),
            )
            .await?;

        Ok(endpoints
            .into_iter()
            .find(|e| e.matches(github_org, team_project))
            .map(|e| e.id))
    }
}
