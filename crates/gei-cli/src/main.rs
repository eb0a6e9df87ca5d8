//! gei - Generates reviewable migration scripts for moving repositories to GitHub.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::warn;

mod commands;
mod gate;
mod logging;
mod settings;
mod writer;

use commands::ado::AdoCommands;
use commands::bbs::BbsCommands;
use commands::github::GithubCommands;
use commands::RunContext;
use logging::LogFormat;
use settings::HttpSettings;

/// gei - GitHub migration script generator
#[derive(Parser, Debug)]
#[command(name = "gei")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Log output format
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,

    /// Settings file for HTTP timeouts and retries
    #[arg(long, global = true, env = "GEI_SETTINGS")]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Migrate from a GitHub organization
    Github {
        #[command(subcommand)]
        command: GithubCommands,
    },

    /// Migrate from Azure DevOps
    Ado {
        #[command(subcommand)]
        command: AdoCommands,
    },

    /// Migrate from Bitbucket Server
    Bbs {
        #[command(subcommand)]
        command: BbsCommands,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    logging::init(cli.verbose, cli.log_format);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let settings = HttpSettings::load(cli.settings.as_deref())?;
    let ctx = RunContext::new(settings, cli.verbose > 0);

    let cancel = ctx.cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, cancelling outstanding requests");
            cancel.cancel();
        }
    });

    match cli.command {
        Commands::Github { command } => commands::github::run(command, &ctx).await,
        Commands::Ado { command } => commands::ado::run(command, &ctx).await,
        Commands::Bbs { command } => commands::bbs::run(command, &ctx).await,
    }
}
