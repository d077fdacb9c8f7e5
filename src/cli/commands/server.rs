use anyhow::Context;
use clap::Subcommand;
use serde_json::Value;

use crate::cli::utils::{get_json, print_json};
use crate::cli::OutputFormat;

#[derive(Subcommand)]
pub enum ServerCommands {
    #[command(about = "Show server information from the API root endpoint")]
    Info,

    #[command(about = "Check server and database health from the /health endpoint")]
    Health,
}

pub async fn handle(cmd: ServerCommands, api_url: &str, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        ServerCommands::Info => {
            let info: Value = get_json(&format!("{}/", api_url), None).await?;
            match output_format {
                OutputFormat::Json => print_json(&info)?,
                OutputFormat::Text => {
                    println!("{} {}", info["name"].as_str().unwrap_or("unknown"), info["version"].as_str().unwrap_or(""));
                    println!("{}", info["description"].as_str().unwrap_or(""));
                    if let Some(endpoints) = info["endpoints"].as_object() {
                        println!();
                        for (name, path) in endpoints {
                            println!("  {:<12} {}", name, path.as_str().unwrap_or(""));
                        }
                    }
                }
            }
            Ok(())
        }
        ServerCommands::Health => {
            // 503 still carries a body describing the degraded state
            let url = format!("{}/health", api_url);
            let response = reqwest::get(&url).await.with_context(|| format!("GET {}", url))?;
            let status = response.status();
            let body: Value = response.json().await?;

            match output_format {
                OutputFormat::Json => print_json(&body)?,
                OutputFormat::Text => {
                    let state = body["data"]["status"].as_str().unwrap_or("unknown");
                    println!("{} ({}) at {}", state, status, api_url);
                    if let Some(reason) = body["data"]["database_error"].as_str() {
                        println!("database: {}", reason);
                    }
                }
            }

            if !status.is_success() {
                anyhow::bail!("server reported {}", status);
            }
            Ok(())
        }
    }
}
