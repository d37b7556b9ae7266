use std::fmt;

use chrono::{DateTime, Local};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    User,
    Assistant,
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Origin::User => write!(f, "You"),
            Origin::Assistant => write!(f, "SalesForecast Assistant"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationMessage {
    pub id: u64,
    pub text: String,
    pub origin: Origin,
    pub created_at: DateTime<Local>,
}

impl ConversationMessage {
    /// Clock time in the `hh:mm AM/PM` form shown next to each message.
    pub fn time_label(&self) -> String {
        self.created_at.format("%I:%M %p").to_string()
    }
}

/// Append-only transcript of one conversation.
///
/// Message ids start at 1 and keep increasing for the lifetime of the
/// transcript, including across [`ConversationState::clear`].
#[derive(Debug, Clone)]
pub struct ConversationState {
    messages: Vec<ConversationMessage>,
    next_id: u64,
}

impl Default for ConversationState {
    fn default() -> Self {
        Self::new()
    }
}

impl ConversationState {
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
            next_id: 1,
        }
    }

    pub fn add_user_message(&mut self, message: &str) -> &ConversationMessage {
        self.push(Origin::User, message)
    }

    pub fn add_assistant_message(&mut self, message: &str) -> &ConversationMessage {
        self.push(Origin::Assistant, message)
    }

    pub fn get_messages(&self) -> &[ConversationMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }

    fn push(&mut self, origin: Origin, text: &str) -> &ConversationMessage {
        let id = self.next_id;
        self.next_id += 1;
        self.messages.push(ConversationMessage {
            id,
            text: text.to_string(),
            origin,
            created_at: Local::now(),
        });
        &self.messages[self.messages.len() - 1]
    }
}
