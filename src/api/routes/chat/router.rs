//! Router for the chat front-end

use std::sync::{Arc, RwLock};

use axum::{
    Form, Router,
    extract::State,
    response::{Html, IntoResponse, Redirect},
    routing::{get, post},
};
use axum_extra::extract::cookie::{Cookie, SignedCookieJar};
use http::HeaderMap;

use super::public::ChatForm;
use super::view;
use crate::api::state::AppState;
use crate::groq::{GatewayError, Role};

type SharedState = Arc<RwLock<AppState>>;

// One-shot operator notice, set on a failed turn and cleared on the
// next page render
const FLASH_COOKIE: &str = "flash";

fn flash(jar: SignedCookieJar, notice: &str) -> SignedCookieJar {
    jar.add(
        Cookie::build((FLASH_COOKIE, notice.to_string()))
            .path("/")
            .http_only(true),
    )
}

/// Maps a failed completion to the operator-visible flash notice and
/// the assistant message recorded in place of a reply. The failing
/// turn stays in the transcript so the conversation can continue.
fn error_reply(err: &GatewayError) -> (String, String) {
    match err {
        GatewayError::Transport(_) => (
            "Error connecting to AI service. Please try again.".to_string(),
            "I'm sorry, I'm having trouble connecting to my knowledge source. Please try again in a moment."
                .to_string(),
        ),
        GatewayError::UpstreamStatus { code, .. } => (
            format!("Error connecting to AI service. Status code: {}", code),
            "I'm sorry, I'm having trouble connecting to my knowledge source. Please try again in a moment."
                .to_string(),
        ),
        GatewayError::MalformedResponse(_) => (
            format!("An error occurred: {}", err),
            format!("<span>I'm sorry, I encountered an error: {}</span>", err),
        ),
    }
}

/// Render the current transcript along with any pending flash notice
async fn index(
    State(state): State<SharedState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, crate::api::public::ApiError> {
    let (messages, signing_key) = {
        let shared_state = state.read().expect("Unable to read shared state");
        (
            shared_state.transcript.snapshot(),
            shared_state.signing_key.clone(),
        )
    };

    let jar = SignedCookieJar::from_headers(&headers, signing_key);
    let notice = jar
        .get(FLASH_COOKIE)
        .map(|cookie| cookie.value().to_string());
    let jar = jar.remove(Cookie::build((FLASH_COOKIE, "")).path("/"));

    let page = view::render_chat_page(&messages, notice.as_deref())?;
    Ok((jar, Html(page)))
}

/// Append the user's turn, run the next completion, and record the
/// reply (or an explanatory assistant message on failure). Always
/// redirects back to `GET /` to avoid duplicate submissions on
/// refresh.
async fn post_message(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Form(form): Form<ChatForm>,
) -> Result<impl IntoResponse, crate::api::public::ApiError> {
    let (gateway, signing_key) = {
        let shared_state = state.read().expect("Unable to read shared state");
        // Fail closed: without a credential the gateway is never called
        let gateway = if shared_state.config.groq_api_key.is_some() {
            shared_state.gateway.clone()
        } else {
            None
        };
        (gateway, shared_state.signing_key.clone())
    };
    let mut jar = SignedCookieJar::from_headers(&headers, signing_key);

    let user_message = form.user_message.trim().to_string();

    // Whitespace-only input is a no-op
    if user_message.is_empty() {
        return Ok((jar, Redirect::to("/")));
    }

    {
        let mut shared_state = state.write().expect("Unable to write shared state");
        shared_state.transcript.append(Role::User, &user_message);
    }

    match gateway {
        None => {
            tracing::error!("No model service credential is configured");
            jar = flash(jar, "Server configuration error. Please check API key.");
            let mut shared_state = state.write().expect("Unable to write shared state");
            shared_state.transcript.append(
                Role::Assistant,
                "I'm sorry, the server is not properly configured. Please contact support.",
            );
        }
        Some(gateway) => {
            // Clone the transcript out of the lock before awaiting the
            // upstream call
            let transcript = {
                let shared_state = state.read().expect("Unable to read shared state");
                shared_state.transcript.snapshot()
            };

            match gateway.complete(&transcript).await {
                Ok(reply) => {
                    let mut shared_state =
                        state.write().expect("Unable to write shared state");
                    shared_state.transcript.append(reply.role, &reply.content);
                }
                Err(err) => {
                    tracing::error!("Chat turn failed: {}", err);
                    let (notice, reply) = error_reply(&err);
                    jar = flash(jar, &notice);
                    let mut shared_state =
                        state.write().expect("Unable to write shared state");
                    shared_state.transcript.append(Role::Assistant, &reply);
                }
            }
        }
    }

    Ok((jar, Redirect::to("/")))
}

/// Clear the transcript back to the seed greeting
async fn reset_chat(State(state): State<SharedState>) -> Redirect {
    let mut shared_state = state.write().expect("Unable to write shared state");
    shared_state.transcript.reset();
    Redirect::to("/")
}

/// Diagnostic endpoint reporting whether a credential is configured.
/// Only ever exposes a first 4 / last 4 preview, never the middle or
/// the full value.
async fn check_api_key(State(state): State<SharedState>) -> String {
    let api_key = {
        let shared_state = state.read().expect("Unable to read shared state");
        shared_state.config.groq_api_key.clone()
    };

    match api_key {
        Some(key) => {
            let chars: Vec<char> = key.chars().collect();
            if chars.len() > 8 {
                let first: String = chars[..4].iter().collect();
                let last: String = chars[chars.len() - 4..].iter().collect();
                format!("API key is loaded. Preview: {}...{}", first, last)
            } else {
                "API key is loaded. Preview: [REDACTED]".to_string()
            }
        }
        None => "API key is NOT loaded. Check your environment variables.".to_string(),
    }
}

/// Create the chat router
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/", get(index).post(post_message))
        .route("/reset", post(reset_chat))
        .route("/check_api_key", get(check_api_key))
}
