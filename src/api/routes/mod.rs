//! API routes module

pub mod chat;

use std::sync::{Arc, RwLock};

use crate::api::state::AppState;
use axum::Router;

type SharedState = Arc<RwLock<AppState>>;

/// Create the combined router. The chat front-end owns the site root.
pub fn router() -> Router<SharedState> {
    Router::new().merge(chat::router())
}
