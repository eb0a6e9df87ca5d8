//! Generation configuration.

use url::Url;

use crate::error::{ConfigError, Result};

/// CLI prefix for GitHub to GitHub migrations.
pub const GEI_COMMAND: &str = "gh gei";

/// CLI prefix for Azure DevOps migrations.
pub const ADO2GH_COMMAND: &str = "gh ado2gh";

/// CLI prefix for Bitbucket Server migrations.
pub const BBS2GH_COMMAND: &str = "gh bbs2gh";

/// How the generated script runs its migrations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionMode {
    /// Queue every migration, then wait for all of them.
    #[default]
    Parallel,
    /// Run each migration to completion before starting the next.
    Sequential,
}

/// Where repositories are migrated from.
///
/// Derived from which fields of [`GenerationConfig`] are populated, never
/// from the repositories themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceIdentity<'a> {
    /// A GitHub organization.
    Github {
        /// Source organization.
        org: &'a str,
    },
    /// An Azure DevOps team project.
    AzureDevOps {
        /// Azure DevOps organization.
        org: &'a str,
        /// Team project within the organization.
        team_project: &'a str,
    },
    /// A Bitbucket Server project.
    BitbucketServer {
        /// Server base URL.
        server_url: &'a str,
        /// Project key.
        project: &'a str,
    },
}

/// Everything the generator needs besides the repository list.
///
/// Optional values are unset when `None` or empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationConfig {
    /// Source organization; also the name in the organization banner.
    pub source_org: String,
    /// Target GitHub organization.
    pub target_org: String,
    /// Sequential or parallel script.
    pub mode: ExecutionMode,

    /// Pass `--verbose` to every migration.
    pub verbose: bool,
    /// Skip releases when migrating.
    pub skip_releases: bool,
    /// Lock the source repository when migrating.
    pub lock_source_repo: bool,
    /// Download each migration's log after it finishes.
    pub download_migration_logs: bool,

    /// Target API URL override.
    pub target_api_url: Option<String>,
    /// Target uploads URL override.
    pub target_uploads_url: Option<String>,

    /// GHES API URL; enables the GHES storage options below.
    pub ghes_api_url: Option<String>,
    /// S3 bucket for migration archives.
    pub aws_bucket_name: Option<String>,
    /// AWS region of the bucket.
    pub aws_region: Option<String>,
    /// Disable TLS verification against GHES.
    pub no_ssl_verify: bool,
    /// Keep the archive after upload.
    pub keep_archive: bool,
    /// Upload archives to GitHub-owned storage.
    pub use_github_storage: bool,
    /// Whether the script must check for blob storage credentials.
    pub blob_credentials_required: bool,

    /// Azure DevOps organization.
    pub ado_org: Option<String>,
    /// Azure DevOps team project.
    pub ado_team_project: Option<String>,

    /// Bitbucket Server base URL.
    pub bbs_server_url: Option<String>,
    /// Bitbucket Server project key.
    pub bbs_project: Option<String>,

    /// Version stamped into the script header.
    pub cli_version: String,
    /// Command prefix of every invocation, e.g. `gh gei`.
    pub cli_command: String,
}

/// Returns the value when it is present and non-empty.
pub(crate) fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn looks_like_url(value: &str) -> bool {
    value.contains("://") || value.starts_with("http")
}

impl GenerationConfig {
    /// Configuration for a GitHub to GitHub migration.
    pub fn github(source_org: impl Into<String>, target_org: impl Into<String>) -> Self {
        Self {
            source_org: source_org.into(),
            target_org: target_org.into(),
            cli_command: GEI_COMMAND.to_string(),
            ..Default::default()
        }
    }

    /// Configuration for an Azure DevOps team project migration.
    pub fn azure_devops(
        org: impl Into<String>,
        team_project: impl Into<String>,
        target_org: impl Into<String>,
    ) -> Self {
        let org = org.into();
        Self {
            source_org: org.clone(),
            target_org: target_org.into(),
            ado_org: Some(org),
            ado_team_project: Some(team_project.into()),
            cli_command: ADO2GH_COMMAND.to_string(),
            ..Default::default()
        }
    }

    /// Configuration for a Bitbucket Server project migration.
    pub fn bitbucket_server(
        server_url: impl Into<String>,
        project: impl Into<String>,
        target_org: impl Into<String>,
    ) -> Self {
        let project = project.into();
        Self {
            source_org: project.clone(),
            target_org: target_org.into(),
            bbs_server_url: Some(server_url.into()),
            bbs_project: Some(project),
            cli_command: BBS2GH_COMMAND.to_string(),
            ..Default::default()
        }
    }

    /// Set the execution mode.
    pub fn with_mode(mut self, mode: ExecutionMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the version stamped into the script.
    pub fn with_cli_version(mut self, version: impl Into<String>) -> Self {
        self.cli_version = version.into();
        self
    }

    /// The source platform these settings describe.
    ///
    /// Azure DevOps wins over Bitbucket Server, which wins over GitHub.
    /// [`validate`](Self::validate) rejects configurations where more than
    /// one is populated.
    pub fn source_identity(&self) -> SourceIdentity<'_> {
        if let Some(org) = non_empty(&self.ado_org) {
            SourceIdentity::AzureDevOps {
                org,
                team_project: self.ado_team_project.as_deref().unwrap_or_default(),
            }
        } else if let Some(server_url) = non_empty(&self.bbs_server_url) {
            SourceIdentity::BitbucketServer {
                server_url,
                project: self.bbs_project.as_deref().unwrap_or_default(),
            }
        } else {
            SourceIdentity::Github {
                org: &self.source_org,
            }
        }
    }

    /// Whether AWS S3 options were given.
    pub fn uses_aws(&self) -> bool {
        non_empty(&self.aws_bucket_name).is_some() || non_empty(&self.aws_region).is_some()
    }

    /// Check option combinations.
    pub fn validate(&self) -> Result<()> {
        if non_empty(&self.ado_org).is_some() && non_empty(&self.bbs_server_url).is_some() {
            return Err(ConfigError::ConflictingSources(
                "an Azure DevOps org",
                "a Bitbucket Server URL",
            ));
        }

        if self.ado_org.is_some() && non_empty(&self.ado_org).is_none() {
            return Err(ConfigError::Missing("ado-org"));
        }
        if self.bbs_server_url.is_some() && non_empty(&self.bbs_server_url).is_none() {
            return Err(ConfigError::Missing("bbs-server-url"));
        }

        if self.target_org.trim().is_empty() {
            return Err(ConfigError::Missing("github-target-org"));
        }
        if looks_like_url(&self.target_org) {
            return Err(ConfigError::OrgIsUrl("github-target-org"));
        }

        match self.source_identity() {
            SourceIdentity::Github { org } => {
                if org.trim().is_empty() {
                    return Err(ConfigError::Missing("github-source-org"));
                }
                if looks_like_url(org) {
                    return Err(ConfigError::OrgIsUrl("github-source-org"));
                }
            }
            SourceIdentity::AzureDevOps { org, team_project } => {
                if looks_like_url(org) {
                    return Err(ConfigError::OrgIsUrl("ado-org"));
                }
                if team_project.trim().is_empty() {
                    return Err(ConfigError::Missing("ado-team-project"));
                }
            }
            SourceIdentity::BitbucketServer {
                server_url,
                project,
            } => {
                if Url::parse(server_url).is_err() {
                    return Err(ConfigError::InvalidUrl("bbs-server-url"));
                }
                if project.trim().is_empty() {
                    return Err(ConfigError::Missing("bbs-project"));
                }
            }
        }

        self.validate_storage()
    }

    fn validate_storage(&self) -> Result<()> {
        let ghes = non_empty(&self.ghes_api_url);
        let bbs = matches!(
            self.source_identity(),
            SourceIdentity::BitbucketServer { .. }
        );

        if non_empty(&self.aws_bucket_name).is_some() {
            if ghes.is_none() && !bbs {
                return Err(ConfigError::Requires {
                    option: "aws-bucket-name",
                    requires: "ghes-api-url",
                });
            }
            if self.use_github_storage {
                return Err(ConfigError::StorageConflict);
            }
        }

        if self.no_ssl_verify && ghes.is_none() {
            return Err(ConfigError::Requires {
                option: "no-ssl-verify",
                requires: "ghes-api-url",
            });
        }

        if self.use_github_storage && ghes.is_none() && !bbs {
            return Err(ConfigError::Requires {
                option: "use-github-storage",
                requires: "ghes-api-url",
            });
        }

        if let Some(url) = ghes {
            if Url::parse(url).is_err() {
                return Err(ConfigError::InvalidUrl("ghes-api-url"));
            }
        }

        Ok(())
    }
}
