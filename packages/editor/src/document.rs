//! The post body being written, as a versioned markup string.

use serde::{Deserialize, Serialize};

use crate::sanitize::sanitize;

/// Full markup of the blog post plus a version that advances on every real
/// content change. Selections remember the version they were captured at.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    content: String,
    version: u64,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a document with initial content.
    pub fn with_content(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            version: 0,
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// True when there is nothing but whitespace in the content.
    pub fn is_blank(&self) -> bool {
        self.content.trim().is_empty()
    }

    /// Replace the content. Returns `false` (and keeps the version) when the
    /// new value is identical to the current one.
    pub fn set_content(&mut self, content: impl Into<String>) -> bool {
        let content = content.into();
        if content == self.content {
            return false;
        }
        self.content = content;
        self.version += 1;
        true
    }

    /// Replace the content with untrusted markup, sanitizing it first.
    pub fn set_markup(&mut self, raw: &str) -> bool {
        self.set_content(sanitize(raw))
    }
}
