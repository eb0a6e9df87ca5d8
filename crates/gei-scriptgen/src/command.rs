//! Command lines of the downstream migration CLI.

use gei_types::Repository;

use crate::config::{non_empty, GenerationConfig, SourceIdentity};

/// Builds one invocation line per repository.
///
/// Token order is fixed so that identical inputs give byte-identical scripts.
#[derive(Debug, Clone, Copy)]
pub struct CommandBuilder<'a> {
    config: &'a GenerationConfig,
}

impl<'a> CommandBuilder<'a> {
    pub fn new(config: &'a GenerationConfig) -> Self {
        Self { config }
    }

    fn command(&self, subcommand: &str) -> Vec<String> {
        let mut parts = vec![format!("{} {subcommand}", self.config.cli_command)];
        if let Some(url) = non_empty(&self.config.target_api_url) {
            parts.push(format!("--target-api-url \"{url}\""));
        }
        parts
    }

    /// `migrate-repo` for `repo`. When `wait` is false the migration is only
    /// queued.
    pub fn migrate_repo(&self, repo: &Repository, wait: bool) -> String {
        let config = self.config;
        let name = &repo.name;
        let mut parts = self.command("migrate-repo");

        if let Some(url) = non_empty(&config.target_uploads_url) {
            parts.push(format!("--target-uploads-url \"{url}\""));
        }

        let identity = config.source_identity();
        let bbs = matches!(identity, SourceIdentity::BitbucketServer { .. });

        match identity {
            SourceIdentity::AzureDevOps { org, team_project } => {
                parts.push(format!("--ado-org \"{org}\""));
                parts.push(format!("--ado-team-project \"{team_project}\""));
                parts.push(format!("--ado-repo \"{name}\""));
            }
            SourceIdentity::BitbucketServer {
                server_url,
                project,
            } => {
                parts.push(format!("--bbs-server-url \"{server_url}\""));
                parts.push(format!("--bbs-project \"{project}\""));
                parts.push(format!("--bbs-repo \"{name}\""));
            }
            SourceIdentity::Github { org } => {
                parts.push(format!("--github-source-org \"{org}\""));
                parts.push(format!("--source-repo \"{name}\""));
            }
        }

        parts.push(format!("--github-target-org \"{}\"", config.target_org));
        parts.push(format!("--target-repo \"{name}\""));

        // Bitbucket archives always go through storage; GitHub sources only
        // when migrating from GHES.
        let ghes = non_empty(&config.ghes_api_url);
        if ghes.is_some() || bbs {
            if let Some(url) = ghes {
                parts.push(format!("--ghes-api-url \"{url}\""));
            }
            if let Some(bucket) = non_empty(&config.aws_bucket_name) {
                parts.push(format!("--aws-bucket-name \"{bucket}\""));
            }
            if let Some(region) = non_empty(&config.aws_region) {
                parts.push(format!("--aws-region \"{region}\""));
            }
            if ghes.is_some() {
                if config.no_ssl_verify {
                    parts.push("--no-ssl-verify".to_string());
                }
                if config.keep_archive {
                    parts.push("--keep-archive".to_string());
                }
            }
            if config.use_github_storage {
                parts.push("--use-github-storage".to_string());
            }
        }

        if config.verbose {
            parts.push("--verbose".to_string());
        }
        if !wait {
            parts.push("--queue-only".to_string());
        }
        if config.skip_releases {
            parts.push("--skip-releases".to_string());
        }
        if config.lock_source_repo {
            parts.push("--lock-source-repo".to_string());
        }

        parts.push(format!("--target-repo-visibility {}", repo.visibility));

        parts.join(" ")
    }

    /// `wait-for-migration` reading the ID recorded for `repo_name`.
    pub fn wait_for_migration(&self, repo_name: &str) -> String {
        let mut parts = self.command("wait-for-migration");
        parts.push(format!("--migration-id $RepoMigrations[\"{repo_name}\"]"));
        parts.join(" ")
    }

    /// `download-logs` for `repo_name` in the target organization.
    pub fn download_logs(&self, repo_name: &str) -> String {
        let mut parts = self.command("download-logs");
        parts.push(format!("--github-target-org \"{}\"", self.config.target_org));
        parts.push(format!("--target-repo \"{repo_name}\""));
        parts.join(" ")
    }
}
