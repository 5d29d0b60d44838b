//! In-memory store for the conversation transcript. Ordered,
//! append-only between resets. All mutation goes through `append` and
//! `reset` so the web layer can hand out read-only snapshots.

use crate::groq::{Message, Role};

/// The fixed assistant greeting shown before any user interaction and
/// restored by a reset.
pub const SEED_GREETING: &str = "<span>Hello! I'm your medical assistant. \
Could you please tell me your name and age? Also, have you had any \
significant health issues in the past?</span>";

pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    pub fn new() -> Self {
        Self {
            messages: vec![Message::new(Role::Assistant, SEED_GREETING)],
        }
    }

    /// Adds a message to the end of the transcript. Empty or
    /// whitespace-only user input is ignored.
    pub fn append(&mut self, role: Role, content: &str) {
        if role == Role::User && content.trim().is_empty() {
            return;
        }
        self.messages.push(Message::new(role, content));
    }

    /// Replaces the entire transcript with the seed greeting. There is
    /// no undo.
    pub fn reset(&mut self) {
        self.messages = vec![Message::new(Role::Assistant, SEED_GREETING)];
    }

    /// The current ordered sequence, oldest first. Callers must not
    /// mutate the result; mutation goes through `append` and `reset`.
    pub fn snapshot(&self) -> Vec<Message> {
        self.messages.clone()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl Default for Transcript {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_transcript_has_seed_greeting() {
        let transcript = Transcript::new();
        let messages = transcript.snapshot();

        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].role, Role::Assistant);
        assert_eq!(messages[0].content, SEED_GREETING);
    }

    #[test]
    fn test_append_preserves_insertion_order() {
        let mut transcript = Transcript::new();
        transcript.append(Role::User, "first");
        transcript.append(Role::Assistant, "second");
        transcript.append(Role::User, "third");

        let messages = transcript.snapshot();
        assert_eq!(messages.len(), 4);
        assert_eq!(messages[1].content, "first");
        assert_eq!(messages[2].content, "second");
        assert_eq!(messages[3].content, "third");
    }

    #[test]
    fn test_snapshot_length_is_seed_plus_appends() {
        let mut transcript = Transcript::new();
        for i in 0..10 {
            transcript.append(Role::User, &format!("message {}", i));
        }
        assert_eq!(transcript.snapshot().len(), 1 + 10);
    }

    #[test]
    fn test_append_ignores_whitespace_only_user_input() {
        let mut transcript = Transcript::new();
        let before = transcript.snapshot();

        transcript.append(Role::User, "");
        transcript.append(Role::User, "   ");
        transcript.append(Role::User, "\n\t ");

        assert_eq!(transcript.snapshot(), before);
    }

    #[test]
    fn test_append_allows_any_assistant_content() {
        // Only user turns are validated
        let mut transcript = Transcript::new();
        transcript.append(Role::Assistant, "");
        assert_eq!(transcript.len(), 2);
    }

    #[test]
    fn test_reset_restores_seed_greeting() {
        let mut transcript = Transcript::new();
        transcript.append(Role::User, "Hi");
        transcript.append(Role::Assistant, "<span>Hello!</span>");
        transcript.reset();

        let messages = transcript.snapshot();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0], Message::new(Role::Assistant, SEED_GREETING));
    }

    #[test]
    fn test_snapshot_is_a_copy() {
        let mut transcript = Transcript::new();
        let mut snapshot = transcript.snapshot();
        snapshot.push(Message::new(Role::User, "not in the store"));

        transcript.append(Role::User, "in the store");
        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript.snapshot()[1].content, "in the store");
    }
}
