//! Boundary component for issuing chat completion requests to the
//! model-serving API. The trait seam lets the web layer run against a
//! stub in tests.

use async_trait::async_trait;

use super::core::{GatewayError, Message, Role, completion};
use crate::core::AppConfig;

#[async_trait]
pub trait CompletionGateway: Send + Sync {
    /// Runs the next turn by sending the instruction prefix plus the
    /// transcript to the model and returning its reply as an
    /// assistant message. Makes exactly one outbound call.
    async fn complete(&self, transcript: &[Message]) -> Result<Message, GatewayError>;
}

pub struct GroqGateway {
    api_hostname: String,
    api_key: String,
    model: String,
    system_prompt: String,
}

impl GroqGateway {
    /// Returns `None` when no credential is configured. Callers must
    /// short-circuit with a configuration error instead of calling
    /// `complete`.
    pub fn from_config(config: &AppConfig) -> Option<Self> {
        let api_key = config.groq_api_key.clone()?;
        Some(Self {
            api_hostname: config.groq_api_hostname.clone(),
            api_key,
            model: config.groq_model.clone(),
            system_prompt: config.system_prompt.clone(),
        })
    }
}

#[async_trait]
impl CompletionGateway for GroqGateway {
    async fn complete(&self, transcript: &[Message]) -> Result<Message, GatewayError> {
        let mut messages = vec![Message::new(Role::System, &self.system_prompt)];
        messages.extend_from_slice(transcript);

        let reply = completion(&messages, &self.api_hostname, &self.api_key, &self.model).await?;

        // Wrap the content in a span so the page renders it as rich text
        Ok(Message::new(
            Role::Assistant,
            &format!("<span>{}</span>", reply),
        ))
    }
}
