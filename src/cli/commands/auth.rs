use clap::Subcommand;
use serde_json::{json, Value};

use crate::auth::password::hash_password;
use crate::cli::utils::{get_json, output_success, post_json, print_json};
use crate::cli::OutputFormat;

#[derive(Subcommand)]
pub enum AuthCommands {
    #[command(about = "Sign in as an administrator and print the token")]
    Login {
        #[arg(long, help = "Account email")]
        email: String,
        #[arg(long, help = "Account password")]
        password: String,
    },

    #[command(about = "Show the session behind a token")]
    Whoami {
        #[arg(long, help = "Bearer token (default: $FULMEGA_TOKEN)")]
        token: Option<String>,
    },

    #[command(about = "Hash a password locally for seeding a profile row")]
    HashPassword {
        #[arg(help = "Plain-text password")]
        password: String,
    },
}

pub async fn handle(cmd: AuthCommands, api_url: &str, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        AuthCommands::Login { email, password } => {
            let data: Value = post_json(
                &format!("{}/auth/login", api_url),
                &json!({ "email": email, "password": password }),
            )
            .await?;

            match output_format {
                OutputFormat::Json => print_json(&data)?,
                OutputFormat::Text => {
                    let role = data["session"]["role"].as_str().unwrap_or("unknown");
                    eprintln!("Signed in as {} ({})", email, role);
                    println!("{}", data["token"].as_str().unwrap_or_default());
                }
            }
            Ok(())
        }
        AuthCommands::Whoami { token } => {
            let token = token
                .or_else(|| std::env::var("FULMEGA_TOKEN").ok())
                .ok_or_else(|| anyhow::anyhow!("No token given. Pass --token or set FULMEGA_TOKEN"))?;
            let session: Value = get_json(&format!("{}/api/auth/whoami", api_url), Some(&token)).await?;

            match output_format {
                OutputFormat::Json => print_json(&session)?,
                OutputFormat::Text => {
                    println!("User:  {}", session["user_id"].as_str().unwrap_or_default());
                    println!("Email: {}", session["email"].as_str().unwrap_or_default());
                    println!("Role:  {}", session["role"].as_str().unwrap_or_default());
                }
            }
            Ok(())
        }
        AuthCommands::HashPassword { password } => {
            let hash = hash_password(&password)?;
            match output_format {
                OutputFormat::Json => output_success(&output_format, "Password hashed", Some(json!({ "hash": hash }))),
                OutputFormat::Text => {
                    println!("{}", hash);
                    Ok(())
                }
            }
        }
    }
}
