//! Test utilities for integration tests
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use axum::{Router, body::Body};

use bedside::api::{AppState, app};
use bedside::core::AppConfig;
use bedside::groq::{CompletionGateway, GatewayError, Message, Role};

pub type SharedState = Arc<RwLock<AppState>>;

pub fn test_config(api_key: Option<&str>) -> AppConfig {
    AppConfig {
        groq_api_hostname: String::from("https://api.groq.com"),
        groq_api_key: api_key.map(|key| key.to_string()),
        groq_model: String::from("gemma2-9b-it"),
        system_prompt: String::from("You are a medical assistant."),
        secret_key: String::from("insecure-test-secret-key-at-least-32-bytes-long"),
    }
}

/// What the stubbed gateway should do on each `complete` call
pub enum StubReply {
    Fixed(String),
    UpstreamStatus(u16),
}

/// Gateway stub that records how many times it was invoked
pub struct StubGateway {
    reply: StubReply,
    calls: Arc<AtomicUsize>,
}

impl StubGateway {
    pub fn new(reply: StubReply) -> (Arc<Self>, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let stub = Arc::new(Self {
            reply,
            calls: Arc::clone(&calls),
        });
        (stub, calls)
    }
}

#[async_trait]
impl CompletionGateway for StubGateway {
    async fn complete(&self, _transcript: &[Message]) -> Result<Message, GatewayError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.reply {
            StubReply::Fixed(content) => Ok(Message::new(
                Role::Assistant,
                &format!("<span>{}</span>", content),
            )),
            StubReply::UpstreamStatus(code) => Err(GatewayError::UpstreamStatus {
                code: *code,
                body: String::from("stubbed upstream failure"),
            }),
        }
    }
}

/// Creates a test application router plus a handle to its shared
/// state so tests can assert on the transcript.
pub fn test_app(
    config: AppConfig,
    gateway: Option<Arc<dyn CompletionGateway>>,
) -> (Router, SharedState) {
    let app_state = AppState::new(config, gateway);
    let shared_state = Arc::new(RwLock::new(app_state));
    (app(Arc::clone(&shared_state)), shared_state)
}

pub async fn body_to_string(body: Body) -> String {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Failed to read response body");
    String::from_utf8(bytes.to_vec()).expect("Response body is not valid utf-8")
}
