//! UI-agnostic conversation state
//!
//! The conversation is a plain append-only log. Rendering, input handling
//! and the request lifecycle all live elsewhere; nothing here depends on a
//! UI framework or on the network.

use serde::{Deserialize, Serialize};

/// Opening assistant turn, present before any user interaction.
pub const GREETING: &str =
    "Hi! I'm 💊 MediBot. Ask about a medicine or symptom. Quick chips below can guide the topic.";

/// A single turn in the conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

/// The role of a chat message sender
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChatRole {
    User,
    Assistant,
}

/// Ordered log of conversation turns.
///
/// Turns are only ever appended; no turn is mutated or removed after
/// insertion. Readers get a shared slice, so the log cannot be edited
/// from outside.
#[derive(Debug)]
pub struct Conversation {
    messages: Vec<ChatMessage>,
}

impl Conversation {
    /// Start a conversation seeded with the assistant greeting.
    pub fn new() -> Self {
        Self {
            messages: vec![ChatMessage {
                role: ChatRole::Assistant,
                content: GREETING.to_string(),
            }],
        }
    }

    pub fn push(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_seeds_greeting() {
        let conversation = Conversation::new();
        let messages = conversation.messages();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].role, ChatRole::Assistant);
        assert_eq!(messages[0].content, GREETING);
    }

    #[test]
    fn test_push_appends_in_order() {
        let mut conversation = Conversation::new();
        conversation.push(ChatMessage {
            role: ChatRole::User,
            content: "aspirin".to_string(),
        });
        conversation.push(ChatMessage {
            role: ChatRole::Assistant,
            content: "Take with food.".to_string(),
        });

        let messages = conversation.messages();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[1].role, ChatRole::User);
        assert_eq!(messages[1].content, "aspirin");
        assert_eq!(messages[2].role, ChatRole::Assistant);
        assert_eq!(messages[2].content, "Take with food.");
    }

    #[test]
    fn test_earlier_turns_survive_later_pushes() {
        let mut conversation = Conversation::new();
        let mut lengths = vec![conversation.messages().len()];

        for i in 0..4 {
            conversation.push(ChatMessage {
                role: if i % 2 == 0 { ChatRole::User } else { ChatRole::Assistant },
                content: format!("turn {}", i),
            });
            lengths.push(conversation.messages().len());
        }

        // Length only ever grows, one turn at a time.
        assert_eq!(lengths, vec![1, 2, 3, 4, 5]);
        // The greeting is still the first turn, untouched.
        assert_eq!(conversation.messages()[0].content, GREETING);
        assert_eq!(conversation.messages()[1].content, "turn 0");
    }
}
