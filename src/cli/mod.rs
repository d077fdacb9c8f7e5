pub mod commands;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

pub const DEFAULT_API_URL: &str = "http://localhost:3000";

#[derive(Parser)]
#[command(name = "fulmega")]
#[command(about = "Fulmega CLI - browse and administer a Fulmega directory server")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[arg(long, global = true, help = "Server base URL (default: $FULMEGA_API_URL or http://localhost:3000)")]
    pub url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Browse the public catalog")]
    Catalog {
        #[command(subcommand)]
        cmd: commands::catalog::CatalogCommands,
    },

    #[command(about = "Authentication and password tools")]
    Auth {
        #[command(subcommand)]
        cmd: commands::auth::AuthCommands,
    },

    #[command(about = "Remote server status")]
    Server {
        #[command(subcommand)]
        cmd: commands::server::ServerCommands,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

/// `--url`, then `FULMEGA_API_URL`, then the local default
pub fn resolve_api_url(flag: Option<String>) -> String {
    flag.or_else(|| std::env::var("FULMEGA_API_URL").ok())
        .filter(|u| !u.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_API_URL.to_string())
        .trim_end_matches('/')
        .to_string()
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);
    let api_url = resolve_api_url(cli.url);

    match cli.command {
        Commands::Catalog { cmd } => commands::catalog::handle(cmd, &api_url, output_format).await,
        Commands::Auth { cmd } => commands::auth::handle(cmd, &api_url, output_format).await,
        Commands::Server { cmd } => commands::server::handle(cmd, &api_url, output_format).await,
    }
}
