use anyhow::{anyhow, Context};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{json, Value};

use crate::cli::OutputFormat;

/// Output a success message in the appropriate format
pub fn output_success(output_format: &OutputFormat, message: &str, data: Option<Value>) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({ "success": true, "message": message });
            if let Some(data) = data {
                response["data"] = data;
            }
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => println!("✓ {}", message),
    }
    Ok(())
}

pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Unwrap the server's `{success, data}` envelope, turning an error body
/// into an error carrying the server's message.
pub fn unwrap_envelope<T: DeserializeOwned>(status: reqwest::StatusCode, body: Value) -> anyhow::Result<T> {
    if !status.is_success() || body.get("success").and_then(Value::as_bool) == Some(false) {
        let message = body
            .get("message")
            .or_else(|| body.get("error"))
            .and_then(Value::as_str)
            .unwrap_or("request failed");
        return Err(anyhow!("{} ({})", message, status));
    }
    let data = body.get("data").cloned().ok_or_else(|| anyhow!("response has no data field"))?;
    Ok(serde_json::from_value(data)?)
}

pub async fn get_json<T: DeserializeOwned>(url: &str, token: Option<&str>) -> anyhow::Result<T> {
    let mut request = reqwest::Client::new().get(url);
    if let Some(token) = token {
        request = request.bearer_auth(token);
    }
    let response = request.send().await.with_context(|| format!("GET {}", url))?;
    let status = response.status();
    let body: Value = response.json().await.with_context(|| format!("reading response from {}", url))?;
    unwrap_envelope(status, body)
}

pub async fn post_json<T: DeserializeOwned>(url: &str, payload: &Value) -> anyhow::Result<T> {
    let response = reqwest::Client::new()
        .post(url)
        .json(payload)
        .send()
        .await
        .with_context(|| format!("POST {}", url))?;
    let status = response.status();
    let body: Value = response.json().await.with_context(|| format!("reading response from {}", url))?;
    unwrap_envelope(status, body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn envelope_data_is_returned() {
        let n: i32 = unwrap_envelope(StatusCode::OK, json!({ "success": true, "data": 7 })).unwrap();
        assert_eq!(n, 7);
    }

    #[test]
    fn error_bodies_surface_the_server_message() {
        let err = unwrap_envelope::<Value>(
            StatusCode::FORBIDDEN,
            json!({ "error": true, "message": "Only administrators can sign in", "code": "FORBIDDEN" }),
        )
        .unwrap_err();
        assert!(err.to_string().starts_with("Only administrators can sign in"));
    }
}
