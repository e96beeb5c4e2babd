//! The dialogue transcript for one user turn.

use kubepilot_provider::Message;

use crate::prompt::SYSTEM_PROMPT;

/// Ordered sequence of messages sent on every model call. Owned by the
/// reasoning loop for the duration of a turn; reset to the system prompt
/// between turns.
#[derive(Debug, Clone, Default)]
pub struct Conversation {
    messages: Vec<Message>,
}

impl Conversation {
    /// A conversation already reset to the system prompt.
    pub fn new() -> Self {
        let mut conversation = Self::default();
        conversation.clear();
        conversation
    }

    /// Reset to exactly one message: the system prompt.
    pub fn clear(&mut self) {
        self.messages.clear();
        self.messages.push(Message::system(SYSTEM_PROMPT));
    }

    pub fn push_user(&mut self, content: impl Into<String>) {
        self.messages.push(Message::user(content));
    }

    pub fn push_system(&mut self, content: impl Into<String>) {
        self.messages.push(Message::system(content));
    }

    /// Append the model's raw reply, keeping any tool-call metadata it
    /// carried, tagged as an assistant turn.
    pub fn push_assistant(&mut self, reply: Message) {
        self.messages.push(Message {
            role: kubepilot_provider::ROLE_ASSISTANT.to_string(),
            content: reply.content,
            tool_calls: reply.tool_calls,
        });
    }

    /// The full ordered transcript, as sent on the next model call.
    pub fn snapshot(&self) -> &[Message] {
        &self.messages
    }

    /// Content of the most recent message. Diagnostics only.
    pub fn last_content(&self) -> &str {
        self.messages
            .last()
            .map(|m| m.content.as_str())
            .unwrap_or("no messages in the conversation")
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
