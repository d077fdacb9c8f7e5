mod common;

use anyhow::Result;
use fulmega_directory::types::UserRole;
use reqwest::StatusCode;
use serde_json::{json, Value};

#[tokio::test]
async fn login_requires_credentials() -> Result<()> {
    let server = common::ensure_server().await?;

    let res = reqwest::Client::new()
        .post(server.url("/auth/login"))
        .json(&json!({ "email": "", "password": "" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let body: Value = res.json().await?;
    assert_eq!(body["code"], "BAD_REQUEST");
    Ok(())
}

#[tokio::test]
async fn admin_routes_require_a_token() -> Result<()> {
    let server = common::ensure_server().await?;

    for path in ["/api/admin/entries", "/api/admin/dashboard", "/api/admin/settings", "/api/auth/whoami"] {
        let res = reqwest::get(server.url(path)).await?;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED, "{}", path);
    }
    Ok(())
}

#[tokio::test]
async fn forged_tokens_are_rejected() -> Result<()> {
    let server = common::ensure_server().await?;

    let res = reqwest::Client::new()
        .get(server.url("/api/auth/whoami"))
        .bearer_auth("not.a.token")
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn whoami_echoes_the_session() -> Result<()> {
    let server = common::ensure_server().await?;

    let res = reqwest::Client::new()
        .get(server.url("/api/auth/whoami"))
        .bearer_auth(common::token_for(UserRole::Admin))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body: Value = res.json().await?;
    assert_eq!(body["data"]["role"], "admin");
    assert_eq!(body["data"]["is_admin"], true);
    assert_eq!(body["data"]["is_super_admin"], false);
    Ok(())
}

#[tokio::test]
async fn viewers_cannot_reach_admin_content() -> Result<()> {
    let server = common::ensure_server().await?;

    let res = reqwest::Client::new()
        .get(server.url("/api/admin/entries"))
        .bearer_auth(common::token_for(UserRole::Viewer))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    Ok(())
}

#[tokio::test]
async fn admins_cannot_reach_superadmin_pages() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();
    let token = common::token_for(UserRole::Admin);

    for path in ["/api/admin/users", "/api/admin/settings", "/api/admin/legal"] {
        let res = client.get(server.url(path)).bearer_auth(&token).send().await?;
        assert_eq!(res.status(), StatusCode::FORBIDDEN, "{}", path);
    }

    let res = client
        .get(server.url("/api/admin/tags"))
        .bearer_auth(&token)
        .send()
        .await?;
    assert!(common::is_storage_outcome(res.status()), "unexpected status: {}", res.status());
    Ok(())
}
