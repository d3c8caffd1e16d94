//! Conversation between the author and the assistant.

use serde::{Deserialize, Serialize};

use crate::patch::Patch;
use crate::selection::Selection;

pub const GREETING: &str = "Hi! I'm your AI writing assistant. I can help you:\n\n\
• Generate blog posts from topics\n\
• Edit selected text with natural language\n\
• Suggest headlines and improvements\n\
• Rewrite content in different tones\n\n\
Just tell me what you need!";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// One entry of the transcript. Never mutated once appended.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
    /// Markup the author can apply to the document, if the message offers any.
    pub action: Option<String>,
    /// Selection the request behind this reply was sent with.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selection: Option<Selection>,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            action: None,
            selection: None,
        }
    }

    pub fn assistant(content: impl Into<String>, action: Option<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            action: action.filter(|a| !a.is_empty()),
            selection: None,
        }
    }

    pub fn with_selection(mut self, selection: Option<Selection>) -> Self {
        self.selection = selection;
        self
    }

    /// The edit this message offers: its action paired with the selection
    /// its request was issued with.
    pub fn patch(&self) -> Option<Patch> {
        self.action
            .as_ref()
            .map(|action| Patch::new(action.clone(), self.selection.clone()))
    }

    /// Whether the UI should offer Apply / Copy for this message.
    pub fn is_applicable(&self) -> bool {
        self.action.is_some()
    }
}

/// Append-only, ordered list of messages.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Default for Transcript {
    fn default() -> Self {
        Self {
            messages: vec![Message::assistant(GREETING, None)],
        }
    }
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: Message) -> &Message {
        self.messages.push(message);
        &self.messages[self.messages.len() - 1]
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Start over from the greeting.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
