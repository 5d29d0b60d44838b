use std::sync::Arc;

use axum_extra::extract::cookie::Key;

use crate::chat::Transcript;
use crate::core::AppConfig;
use crate::groq::CompletionGateway;

/// Shared application state.
///
/// Known limitation: the transcript is process-global, so every
/// visitor shares one conversation. There is no per-visitor session
/// isolation and no persistence across restarts.
pub struct AppState {
    pub transcript: Transcript,
    /// `None` when no upstream credential is configured. Handlers
    /// short-circuit with a configuration error instead of calling it.
    pub gateway: Option<Arc<dyn CompletionGateway>>,
    pub config: AppConfig,
    /// Key for signing the one-shot flash cookie, derived from the
    /// configured secret.
    pub signing_key: Key,
}

impl AppState {
    /// Panics when the configured secret is too short to derive a
    /// signing key from (less than 32 bytes).
    pub fn new(config: AppConfig, gateway: Option<Arc<dyn CompletionGateway>>) -> Self {
        let signing_key = Key::derive_from(config.secret_key.as_bytes());
        Self {
            transcript: Transcript::new(),
            gateway,
            config,
            signing_key,
        }
    }
}
