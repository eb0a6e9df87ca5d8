//! `gei bbs ...`

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use gei_scriptgen::GenerationConfig;
use gei_sources::{BbsClient, BbsProject};
use tracing::info;

use super::{credential, render, save, RunContext, ScriptArgs};

#[derive(Subcommand, Debug)]
pub enum BbsCommands {
    /// Generate a migration script for a Bitbucket Server project
    GenerateScript(GenerateScriptArgs),

    /// List the projects on a Bitbucket Server
    ListProjects(ListProjectsArgs),
}

/// Connection options for Bitbucket Server.
#[derive(Args, Debug, Clone, Default)]
pub struct BbsConnection {
    /// Bitbucket Server base URL
    #[arg(long)]
    pub bbs_server_url: String,

    /// Bitbucket Server username
    #[arg(long, env = "BBS_USERNAME")]
    pub bbs_username: Option<String>,

    /// Bitbucket Server password or HTTP access token
    #[arg(long, env = "BBS_PASSWORD", hide_env_values = true)]
    pub bbs_password: Option<String>,
}

impl BbsConnection {
    fn client(&self, ctx: &RunContext) -> Result<BbsClient> {
        let username = credential(&self.bbs_username)
            .context("BBS_USERNAME environment variable must be set")?;
        let password = credential(&self.bbs_password)
            .context("BBS_PASSWORD environment variable must be set")?;

        Ok(BbsClient::new(
            ctx.http_client(false)?,
            &self.bbs_server_url,
            username,
            password,
        )?)
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct GenerateScriptArgs {
    #[command(flatten)]
    pub connection: BbsConnection,

    /// Project key to migrate
    #[arg(long)]
    pub bbs_project: String,

    /// Target GitHub organization
    #[arg(long)]
    pub github_org: String,

    /// S3 bucket for migration archives
    #[arg(long)]
    pub aws_bucket_name: Option<String>,

    /// AWS region of the bucket
    #[arg(long)]
    pub aws_region: Option<String>,

    /// Upload archives to GitHub-owned storage
    #[arg(long)]
    pub use_github_storage: bool,

    #[command(flatten)]
    pub script: ScriptArgs,
}

#[derive(Args, Debug, Clone, Default)]
pub struct ListProjectsArgs {
    #[command(flatten)]
    pub connection: BbsConnection,
}

pub async fn run(command: BbsCommands, ctx: &RunContext) -> Result<()> {
    match command {
        BbsCommands::GenerateScript(args) => {
            let script = generate_script(&args, ctx).await?;
            save(&script, &args.script)
        }
        BbsCommands::ListProjects(args) => {
            for project in list_projects(&args, ctx).await? {
                println!("{}\t{}", project.key, project.name);
            }
            Ok(())
        }
    }
}

/// Inventory a project's repositories and render their migration script.
///
/// Archives always travel through blob storage unless GitHub storage is
/// chosen, so the storage credential checks are always considered.
pub async fn generate_script(args: &GenerateScriptArgs, ctx: &RunContext) -> Result<String> {
    info!("Generating script");

    let mut config = GenerationConfig {
        aws_bucket_name: args.aws_bucket_name.clone(),
        aws_region: args.aws_region.clone(),
        use_github_storage: args.use_github_storage,
        blob_credentials_required: true,
        ..GenerationConfig::bitbucket_server(
            &args.connection.bbs_server_url,
            &args.bbs_project,
            &args.github_org,
        )
    };
    args.script.apply(&mut config, ctx.verbose);
    config.validate()?;

    let client = args.connection.client(ctx)?;

    info!(project = %args.bbs_project, "Inventorying Bitbucket Server project");
    let repos = client
        .list_repositories(&args.bbs_project)
        .await
        .context("failed to get repositories")?;

    render(config, &repos)
}

pub async fn list_projects(args: &ListProjectsArgs, ctx: &RunContext) -> Result<Vec<BbsProject>> {
    args.connection
        .client(ctx)?
        .get_projects()
        .await
        .context("failed to list projects")
}
