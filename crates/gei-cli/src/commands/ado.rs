//! `gei ado ...`

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use gei_scriptgen::GenerationConfig;
use gei_sources::{AdoClient, TeamProject};
use tracing::{info, warn};

use super::{credential, render, save, RunContext, ScriptArgs};

#[derive(Subcommand, Debug)]
pub enum AdoCommands {
    /// Generate a migration script for an Azure DevOps team project
    GenerateScript(GenerateScriptArgs),

    /// Find the GitHub service connection of an Azure DevOps organization
    LookupServiceConnection(LookupServiceConnectionArgs),

    /// List the team projects of an Azure DevOps organization
    ListTeamProjects(ListTeamProjectsArgs),
}

/// Connection options for Azure DevOps.
#[derive(Args, Debug, Clone, Default)]
pub struct AdoConnection {
    /// Azure DevOps organization
    #[arg(long)]
    pub ado_org: String,

    /// Azure DevOps Server URL (defaults to https://dev.azure.com)
    #[arg(long)]
    pub ado_server_url: Option<String>,

    /// Azure DevOps personal access token
    #[arg(long, env = "ADO_PAT", hide_env_values = true)]
    pub ado_pat: Option<String>,
}

impl AdoConnection {
    fn client(&self, ctx: &RunContext) -> Result<AdoClient> {
        let pat = credential(&self.ado_pat).context("ADO_PAT environment variable must be set")?;
        let base_url = self.ado_server_url.as_deref().unwrap_or_default();
        Ok(AdoClient::new(ctx.http_client(false)?, base_url, pat)?)
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct GenerateScriptArgs {
    #[command(flatten)]
    pub connection: AdoConnection,

    /// Team project to migrate
    #[arg(long)]
    pub ado_team_project: String,

    /// Target GitHub organization
    #[arg(long)]
    pub github_org: String,

    #[command(flatten)]
    pub script: ScriptArgs,
}

#[derive(Args, Debug, Clone, Default)]
pub struct LookupServiceConnectionArgs {
    #[command(flatten)]
    pub connection: AdoConnection,

    /// GitHub organization the service connection points at
    #[arg(long)]
    pub github_org: String,

    /// Team projects to search, in order (defaults to all of them)
    #[arg(long = "ado-team-project")]
    pub ado_team_projects: Vec<String>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct ListTeamProjectsArgs {
    #[command(flatten)]
    pub connection: AdoConnection,
}

pub async fn run(command: AdoCommands, ctx: &RunContext) -> Result<()> {
    match command {
        AdoCommands::GenerateScript(args) => {
            let script = generate_script(&args, ctx).await?;
            save(&script, &args.script)
        }
        AdoCommands::LookupServiceConnection(args) => {
            match lookup_service_connection(&args, ctx).await? {
                Some(id) => println!("{id}"),
                None => warn!(github_org = %args.github_org, "No GitHub service connection found"),
            }
            Ok(())
        }
        AdoCommands::ListTeamProjects(args) => {
            for project in list_team_projects(&args, ctx).await? {
                println!("{}", project.name);
            }
            Ok(())
        }
    }
}

/// Inventory the enabled repositories of a team project and render their
/// migration script.
pub async fn generate_script(args: &GenerateScriptArgs, ctx: &RunContext) -> Result<String> {
    info!("Generating script");

    let org = &args.connection.ado_org;
    let mut config = GenerationConfig::azure_devops(org, &args.ado_team_project, &args.github_org);
    args.script.apply(&mut config, ctx.verbose);
    config.validate()?;

    let client = args.connection.client(ctx)?;

    info!(org = %org, team_project = %args.ado_team_project, "Inventorying team project");
    let repos = client
        .list_repositories(org, &args.ado_team_project)
        .await
        .context("failed to get repositories")?;

    render(config, &repos)
}

/// Search the given team projects, or all of them, for the GitHub service
/// connection.
pub async fn lookup_service_connection(
    args: &LookupServiceConnectionArgs,
    ctx: &RunContext,
) -> Result<Option<String>> {
    let org = &args.connection.ado_org;
    let client = args.connection.client(ctx)?;

    let team_projects = if args.ado_team_projects.is_empty() {
        client
            .get_team_projects(org)
            .await
            .context("failed to list team projects")?
            .into_iter()
            .map(|p| p.name)
            .collect()
    } else {
        args.ado_team_projects.clone()
    };

    Ok(client
        .get_github_app_id(org, &args.github_org, &team_projects)
        .await?)
}

pub async fn list_team_projects(
    args: &ListTeamProjectsArgs,
    ctx: &RunContext,
) -> Result<Vec<TeamProject>> {
    let client = args.connection.client(ctx)?;
    client
        .get_team_projects(&args.connection.ado_org)
        .await
        .context("failed to list team projects")
}
