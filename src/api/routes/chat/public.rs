//! Public types for the chat front-end
use serde::Deserialize;

#[derive(Deserialize)]
pub struct ChatForm {
    // Missing field behaves like an empty submission
    #[serde(default)]
    pub user_message: String,
}
