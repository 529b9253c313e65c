//! Wellness coach chat messages.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::lenient;

/// First message of every conversation.
pub const CHAT_GREETING: &str = "Namaste! I'm your Yoga Wellness Coach. How can I help you today? I can assist with Sattvic nutrition, yoga practices, meal planning, and wellness guidance.";

/// Assistant reply recorded when a send fails.
pub const CHAT_ERROR_REPLY: &str = "Sorry, I encountered an error. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

impl ChatRole {
    pub fn label(&self) -> &'static str {
        match self {
            Self::User => "You",
            Self::Assistant => "Coach",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

impl fmt::Display for ChatMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.role.label(), self.content)
    }
}

/// Body of a chat send: the whole conversation so far.
#[derive(Debug, Serialize)]
pub struct ChatRequest<'a> {
    pub user_id: i64,
    pub messages: &'a [ChatMessage],
}

/// The service's reply. Only the text is used; the role is always the
/// assistant's.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ChatReply {
    #[serde(default, deserialize_with = "lenient::string")]
    pub message: String,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub role: Option<String>,
}

impl ChatReply {
    pub fn into_message(self) -> ChatMessage {
        ChatMessage::assistant(self.message)
    }
}
