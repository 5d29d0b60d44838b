use std::env;

// Instruction prefix sent ahead of the transcript on every completion
// request. Overridable via `BEDSIDE_SYSTEM_PROMPT`.
const DEFAULT_SYSTEM_PROMPT: &str = "\
You are a friendly, conversational medical assistant. Follow these guidelines:

1. Start by greeting the user and asking for their name and age. Also ask about any previous health issues they've experienced.
2. Always address the user by their name once you know it.
3. Keep track of their name, age, and health history throughout the conversation.
4. Keep responses short and conversational - use 1-3 sentences where possible.
5. Speak naturally like a real doctor or nurse would in conversation.
6. Ask focused follow-up questions about symptoms - one question at a time.
7. Avoid lengthy explanations unless specifically requested.
8. Use a warm, empathetic tone while maintaining professionalism.
9. Clearly state you're an AI assistant, not a replacement for professional medical care.
10. When the conversation appears to be concluding OR when discussing serious symptoms, offer to connect the user to a real doctor with a message like: \"Would you like me to connect you with a healthcare professional to discuss this further?\"
11. Prioritize clarity and brevity over comprehensiveness.

Remember: Be conversational and human-like. Gather essential personal information first, then address the user by name throughout the conversation. Look for natural opportunities to suggest a connection to a real doctor.";

// Development-only default. Long enough to derive a signing key from;
// anything real must come from `SECRET_KEY`.
const DEFAULT_SECRET_KEY: &str = "insecure-dev-secret-key-change-me-before-deploying";

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub groq_api_hostname: String,
    /// Upstream credential. `None` when unset or empty; the chat handler
    /// fails closed and never calls upstream without one.
    pub groq_api_key: Option<String>,
    pub groq_model: String,
    pub system_prompt: String,
    pub secret_key: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        let groq_api_hostname = env::var("BEDSIDE_GROQ_API_HOST")
            .unwrap_or_else(|_| "https://api.groq.com".to_string());
        let groq_api_key = env::var("GROQ_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty());
        let groq_model =
            env::var("BEDSIDE_MODEL").unwrap_or_else(|_| "gemma2-9b-it".to_string());
        let system_prompt = env::var("BEDSIDE_SYSTEM_PROMPT")
            .unwrap_or_else(|_| DEFAULT_SYSTEM_PROMPT.to_string());
        let secret_key =
            env::var("SECRET_KEY").unwrap_or_else(|_| DEFAULT_SECRET_KEY.to_string());

        Self {
            groq_api_hostname,
            groq_api_key,
            groq_model,
            system_prompt,
            secret_key,
        }
    }
}
