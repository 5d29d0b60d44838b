use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use thiserror::Error;

// Fixed generation parameters for every completion request
pub const TEMPERATURE: f64 = 0.7;
pub const MAX_TOKENS: u32 = 800;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub enum Role {
    #[serde(rename = "system")]
    System,
    #[serde(rename = "assistant")]
    Assistant,
    #[serde(rename = "user")]
    User,
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn new(role: Role, content: &str) -> Self {
        Message {
            role,
            content: content.to_string(),
        }
    }
}

/// Failure modes for a single completion call. Exactly one outbound
/// request is made per call so each error maps to one request.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("request to the model service failed: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("model service returned status {code}")]
    UpstreamStatus { code: u16, body: String },
    #[error("model service response is missing expected fields: {0}")]
    MalformedResponse(String),
}

/// Issues a single chat completion request and returns the first
/// choice's message content. The caller is responsible for prefixing
/// the transcript with a system instruction message.
pub async fn completion(
    messages: &Vec<Message>,
    api_hostname: &str,
    api_key: &str,
    model: &str,
) -> Result<String, GatewayError> {
    let payload = json!({
        "model": model,
        "messages": messages,
        "temperature": TEMPERATURE,
        "max_tokens": MAX_TOKENS,
    });
    let url = format!(
        "{}/openai/v1/chat/completions",
        api_hostname.trim_end_matches("/")
    );

    tracing::info!("Sending request to the model service: {}", url);
    tracing::debug!("Request payload: {}", payload);

    let response = reqwest::Client::new()
        .post(url)
        .bearer_auth(api_key)
        .header("Content-Type", "application/json")
        .timeout(REQUEST_TIMEOUT)
        .json(&payload)
        .send()
        .await
        .map_err(GatewayError::Transport)?;

    let status = response.status();
    tracing::info!("Model service status code: {}", status);

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        tracing::error!("Model service error: {} - {}", status, body);
        return Err(GatewayError::UpstreamStatus {
            code: status.as_u16(),
            body,
        });
    }

    let body: Value = response
        .json()
        .await
        .map_err(|err| GatewayError::MalformedResponse(err.to_string()))?;
    tracing::debug!("Response JSON: {}", body);

    let content = body["choices"][0]["message"]["content"]
        .as_str()
        .ok_or_else(|| GatewayError::MalformedResponse(body.to_string()))?;

    Ok(content.to_string())
}
