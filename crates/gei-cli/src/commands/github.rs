//! `gei github ...`

use anyhow::{bail, Context, Result};
use clap::{Args, Subcommand};
use gei_scriptgen::GenerationConfig;
use gei_sources::GithubClient;
use tracing::info;

use super::{credential, render, save, RunContext, ScriptArgs, NO_REPOS};
use crate::gate;

#[derive(Subcommand, Debug)]
pub enum GithubCommands {
    /// Generate a migration script for a GitHub organization
    ///
    /// The script can be reviewed and edited before it is run.
    GenerateScript(GenerateScriptArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct GenerateScriptArgs {
    /// Source GitHub organization
    #[arg(long)]
    pub github_source_org: String,

    /// Target GitHub organization
    #[arg(long)]
    pub github_target_org: String,

    /// API endpoint of a GHES source, e.g. https://myghes.com/api/v3
    #[arg(long)]
    pub ghes_api_url: Option<String>,

    /// S3 bucket for migration archives
    #[arg(long)]
    pub aws_bucket_name: Option<String>,

    /// AWS region of the bucket
    #[arg(long)]
    pub aws_region: Option<String>,

    /// Disable TLS verification against GHES
    #[arg(long)]
    pub no_ssl_verify: bool,

    /// Keep the archive after upload (GHES < 3.8.0)
    #[arg(long)]
    pub keep_archive: bool,

    /// Upload archives to GitHub-owned storage (GHES)
    #[arg(long)]
    pub use_github_storage: bool,

    /// Source PAT
    #[arg(long, env = "GH_SOURCE_PAT", hide_env_values = true)]
    pub github_source_pat: Option<String>,

    /// Fallback PAT when no source PAT is given
    #[arg(long, env = "GH_PAT", hide_env_values = true, hide = true)]
    pub github_pat: Option<String>,

    #[command(flatten)]
    pub script: ScriptArgs,
}

impl GenerateScriptArgs {
    fn config(&self, verbose: bool) -> GenerationConfig {
        let mut config = GenerationConfig {
            ghes_api_url: self.ghes_api_url.clone(),
            aws_bucket_name: self.aws_bucket_name.clone(),
            aws_region: self.aws_region.clone(),
            no_ssl_verify: self.no_ssl_verify,
            keep_archive: self.keep_archive,
            use_github_storage: self.use_github_storage,
            ..GenerationConfig::github(&self.github_source_org, &self.github_target_org)
        };
        self.script.apply(&mut config, verbose);
        config
    }

    fn pat(&self) -> Option<String> {
        credential(&self.github_source_pat).or_else(|| credential(&self.github_pat))
    }
}

pub async fn run(command: GithubCommands, ctx: &RunContext) -> Result<()> {
    match command {
        GithubCommands::GenerateScript(args) => {
            let script = generate_script(&args, ctx).await?;
            save(&script, &args.script)
        }
    }
}

/// Inventory the source organization and render its migration script.
pub async fn generate_script(args: &GenerateScriptArgs, ctx: &RunContext) -> Result<String> {
    info!("Generating script");

    let mut config = args.config(ctx.verbose);
    config.validate()?;

    let pat = args
        .pat()
        .context("GH_PAT or GH_SOURCE_PAT environment variable must be set")?;

    let http = ctx.http_client(args.no_ssl_verify)?;
    let api_url = args.ghes_api_url.as_deref().unwrap_or_default();
    let client = GithubClient::new(http, api_url, Some(pat))?;

    info!(org = %args.github_source_org, "Inventorying GitHub organization");
    let repos = client
        .get_repos(&args.github_source_org)
        .await
        .context("failed to get repositories")?;

    if repos.is_empty() {
        bail!(NO_REPOS);
    }

    config.blob_credentials_required =
        gate::blob_credentials_required(args.ghes_api_url.as_deref(), &client).await;

    render(config, &repos)
}
