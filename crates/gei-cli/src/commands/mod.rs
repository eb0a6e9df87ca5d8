//! Subcommand implementations.

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Args;
use gei_http::{Cancellation, HttpClient};
use gei_scriptgen::{ExecutionMode, GenerationConfig, ScriptGenerator};
use gei_types::Repository;
use tracing::{debug, info};

use crate::settings::HttpSettings;
use crate::writer::{self, DEFAULT_OUTPUT};

pub mod ado;
pub mod bbs;
pub mod github;

/// Returned when a source has nothing to migrate.
pub const NO_REPOS: &str =
    "a migration script could not be generated because no migratable repos were found";

/// State shared by every subcommand.
#[derive(Debug, Clone)]
pub struct RunContext {
    /// Request and retry settings.
    pub settings: HttpSettings,
    /// Cancels outstanding requests on Ctrl-C or deadline.
    pub cancel: Cancellation,
    /// Whether `-v` was given; forwarded to the migration commands.
    pub verbose: bool,
}

impl RunContext {
    pub fn new(settings: HttpSettings, verbose: bool) -> Self {
        let cancel = settings.cancellation();
        Self {
            settings,
            cancel,
            verbose,
        }
    }

    /// Build an HTTP client observing this run's cancellation.
    pub fn http_client(&self, no_ssl_verify: bool) -> Result<HttpClient> {
        let client = HttpClient::new(self.settings.http_config(no_ssl_verify))?;
        Ok(client.with_cancellation(self.cancel.clone()))
    }
}

/// Options common to every `generate-script` subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct ScriptArgs {
    /// Where to write the script
    #[arg(long, default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Wait for each migration to finish before starting the next
    #[arg(long)]
    pub sequential: bool,

    /// Download each migration's log when it finishes
    #[arg(long)]
    pub download_migration_logs: bool,

    /// Skip releases when migrating
    #[arg(long)]
    pub skip_releases: bool,

    /// Lock the source repository when migrating
    #[arg(long)]
    pub lock_source_repo: bool,

    /// Target API URL (defaults to https://api.github.com)
    #[arg(long)]
    pub target_api_url: Option<String>,

    /// Target uploads URL
    #[arg(long)]
    pub target_uploads_url: Option<String>,
}

impl ScriptArgs {
    /// Copy these options into `config`.
    pub fn apply(&self, config: &mut GenerationConfig, verbose: bool) {
        config.mode = if self.sequential {
            ExecutionMode::Sequential
        } else {
            ExecutionMode::Parallel
        };
        config.download_migration_logs = self.download_migration_logs;
        config.skip_releases = self.skip_releases;
        config.lock_source_repo = self.lock_source_repo;
        config.target_api_url = self.target_api_url.clone();
        config.target_uploads_url = self.target_uploads_url.clone();
        config.verbose = verbose;
        config.cli_version = env!("CARGO_PKG_VERSION").to_string();
    }
}

/// Generate the script text for `repos`, refusing an empty inventory.
pub fn render(config: GenerationConfig, repos: &[Repository]) -> Result<String> {
    if repos.is_empty() {
        bail!(NO_REPOS);
    }

    for repo in repos {
        debug!(repo = %repo.name, visibility = %repo.visibility, "Including repository");
    }

    Ok(ScriptGenerator::new(config).generate(repos))
}

/// Write a generated script to its output path.
pub fn save(script: &str, args: &ScriptArgs) -> Result<()> {
    writer::write_script(&args.output, script)?;
    info!(path = %args.output.display(), "Script generated successfully");
    Ok(())
}

/// Returns a credential when it is present and non-empty.
pub(crate) fn credential(value: &Option<String>) -> Option<String> {
    value.clone().filter(|v| !v.is_empty())
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::RunContext;
    use crate::settings::HttpSettings;

    /// A context that fails fast against mock servers.
    pub fn context() -> RunContext {
        let settings = HttpSettings {
            timeout_secs: 5,
            retry_attempts: 2,
            retry_base_delay_ms: 5,
            retry_max_delay_ms: 10,
            deadline_secs: None,
        };
        RunContext::new(settings, false)
    }
}
