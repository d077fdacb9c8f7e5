#![allow(dead_code)]

use std::process::{Child, Command, Stdio};
use std::sync::OnceLock;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use fulmega_directory::auth::Claims;
use fulmega_directory::types::UserRole;
use jsonwebtoken::{encode, EncodingKey, Header};
use reqwest::StatusCode;
use uuid::Uuid;

/// Secret the spawned server signs and verifies tokens with
pub const TEST_JWT_SECRET: &str = "integration-test-secret";

static SERVER: OnceLock<TestServer> = OnceLock::new();

pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    child: Child,
}

impl TestServer {
    fn spawn() -> Result<Self> {
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        // DATABASE_URL is inherited; without it the server still starts and
        // reports 503 for anything that needs storage
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_fulmega-directory"));
        cmd.env("FULMEGA_API_PORT", port.to_string())
            .env("JWT_SECRET", TEST_JWT_SECRET)
            .env("DATABASE_RUN_MIGRATIONS", "false")
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        let child = cmd.spawn().context("failed to spawn server binary")?;

        Ok(Self { port, base_url, child })
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        while Instant::now() < deadline {
            let url = format!("{}/health", self.base_url);
            if let Ok(resp) = client.get(&url).send().await {
                if resp.status() == StatusCode::OK || resp.status() == StatusCode::SERVICE_UNAVAILABLE {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(150)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

pub async fn ensure_server() -> Result<&'static TestServer> {
    let server = SERVER.get_or_init(|| TestServer::spawn().expect("failed to spawn server binary"));
    server.wait_ready(Duration::from_secs(10)).await?;
    Ok(server)
}

/// Bearer token for a fresh user id with the given role
pub fn token_for(role: UserRole) -> String {
    let claims = Claims::new(Uuid::new_v4(), format!("{}@example.com", role), role);
    encode(&Header::default(), &claims, &EncodingKey::from_secret(TEST_JWT_SECRET.as_bytes()))
        .expect("failed to sign test token")
}

/// The server's storage-backed routes answer 503 when no database is reachable
pub fn is_storage_outcome(status: StatusCode) -> bool {
    status == StatusCode::OK || status == StatusCode::SERVICE_UNAVAILABLE || status == StatusCode::INTERNAL_SERVER_ERROR
}
