//! Campus Finders - command-line front end
//!
//! Lost-item search with an ownership quiz, candidate results, claims,
//! and found-item reports against the matching service.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod state;

use commands::{claim, found, results, search};
use config::{AppConfig, Overrides};
use state::AppState;

#[derive(Parser, Debug)]
#[command(name = "finders")]
#[command(about = "Campus lost-and-found search and claims")]
#[command(version)]
struct Cli {
    /// Configuration file (TOML)
    #[arg(long, global = true, env = "FINDERS_CONFIG")]
    config: Option<PathBuf>,

    /// Matching service root URL
    #[arg(long, global = true, env = "FINDERS_BASE_URL")]
    base_url: Option<String>,

    /// Bearer token issued at login
    #[arg(long, global = true, env = "FINDERS_TOKEN", hide_env_values = true)]
    token: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Describe a lost item, answer the quiz and look for matches
    Search(search::SearchArgs),
    /// Show candidates for an earlier search
    Results(results::ResultsArgs),
    /// Confirm that a candidate is yours
    Claim(claim::ClaimArgs),
    /// Register an item you found
    ReportFound(found::FoundArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "finders_app=info,finders_engine=info,finders_networking=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = AppConfig::resolve(&Overrides {
        config_path: cli.config,
        base_url: cli.base_url,
        token: cli.token,
    })
    .context("Failed to load configuration")?;

    info!("Using matching service at {}", config.base_url);

    let mut state = AppState::new(config).context("Failed to initialize service context")?;

    let outcome = match cli.command {
        Command::Search(args) => search::run(&state, args).await,
        Command::Results(args) => results::run(&state, args).await,
        Command::Claim(args) => claim::run(&state, args).await,
        Command::ReportFound(args) => found::run(&state, args).await,
    };

    state.shutdown();

    if let Err(e) = &outcome {
        error!("{:#}", e);
    }
    outcome
}
