//! # Selection tracking
//!
//! The browser reports the highlighted text as a plain string on every
//! mouse-up and key-up. [`SelectionTracker`] turns that stream into
//! [`Selection`] snapshots: the trimmed text, where it sits in the document
//! markup, and the document version it was taken against. The snapshot is
//! what later lets a patch detect that the document moved on underneath it.

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::document::Document;

/// An immutable snapshot of highlighted text.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    text: String,
    /// Byte range of the text in the markup at capture time, if it could be found.
    anchor: Option<Range<usize>>,
    version: u64,
}

impl Selection {
    /// Snapshot `text` against the current state of `doc`.
    ///
    /// Returns `None` for blank text: an empty selection means "nothing selected".
    pub fn capture(text: &str, doc: &Document) -> Option<Self> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        Some(Self {
            text: text.to_string(),
            anchor: locate(doc.content(), text),
            version: doc.version(),
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn anchor(&self) -> Option<Range<usize>> {
        self.anchor.clone()
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// Short preview for display, cut on a character boundary.
    pub fn preview(&self, max_chars: usize) -> String {
        if self.text.chars().count() <= max_chars {
            return self.text.clone();
        }
        let cut: String = self.text.chars().take(max_chars).collect();
        format!("{cut}...")
    }
}

/// Find the first occurrence of rendered `text` inside `markup`.
///
/// Tries the literal text first, then its HTML-escaped form, since the
/// browser reports `a & b` for markup that reads `a &amp; b`.
pub fn locate(markup: &str, text: &str) -> Option<Range<usize>> {
    if text.is_empty() {
        return None;
    }
    if let Some(start) = markup.find(text) {
        return Some(start..start + text.len());
    }
    let escaped = escape_text(text);
    if escaped != text {
        if let Some(start) = markup.find(&escaped) {
            return Some(start..start + escaped.len());
        }
    }
    None
}

/// How `text` appears inside an element's markup.
pub(crate) fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// What a call to [`SelectionTracker::observe`] did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SelectionChange {
    Captured,
    Cleared,
    Unchanged,
}

/// Holds the currently active selection, if any.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SelectionTracker {
    current: Option<Selection>,
}

impl SelectionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&Selection> {
        self.current.as_ref()
    }

    /// Feed the raw browser selection string.
    pub fn observe(&mut self, raw: &str, doc: &Document) -> SelectionChange {
        match Selection::capture(raw, doc) {
            None => {
                if self.current.take().is_some() {
                    tracing::debug!("selection cleared");
                    SelectionChange::Cleared
                } else {
                    SelectionChange::Unchanged
                }
            }
            Some(selection) => {
                if self.current.as_ref() == Some(&selection) {
                    return SelectionChange::Unchanged;
                }
                tracing::debug!(
                    len = selection.text.len(),
                    version = selection.version,
                    "selection captured"
                );
                self.current = Some(selection);
                SelectionChange::Captured
            }
        }
    }

    /// Drop the active selection (click-away or after an apply).
    pub fn clear(&mut self) -> bool {
        self.current.take().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_trims_and_anchors() {
        let doc = Document::with_content("Hello <em>world</em> today");
        let sel = Selection::capture("  world \n", &doc).unwrap();
        assert_eq!(sel.text(), "world");
        assert_eq!(sel.anchor(), Some(10..15));
        assert_eq!(&doc.content()[10..15], "world");
        assert_eq!(sel.version(), 0);
    }

    #[test]
    fn test_blank_capture_is_none() {
        let doc = Document::with_content("abc");
        assert!(Selection::capture("   ", &doc).is_none());
        assert!(Selection::capture("", &doc).is_none());
    }

    #[test]
    fn test_locate_escaped_text() {
        let markup = "<p>salt &amp; pepper</p>";
        assert_eq!(locate(markup, "salt & pepper"), Some(3..20));
        assert_eq!(locate(markup, "vinegar"), None);
    }

    #[test]
    fn test_selection_spanning_tags_has_no_anchor() {
        let doc = Document::with_content("Hello <em>world</em>");
        let sel = Selection::capture("Hello world", &doc).unwrap();
        assert!(sel.anchor().is_none());
    }

    #[test]
    fn test_tracker_transitions() {
        let doc = Document::with_content("<p>one two</p>");
        let mut tracker = SelectionTracker::new();

        assert_eq!(tracker.observe("", &doc), SelectionChange::Unchanged);
        assert_eq!(tracker.observe("one", &doc), SelectionChange::Captured);
        assert_eq!(tracker.observe(" one ", &doc), SelectionChange::Unchanged);
        assert_eq!(tracker.observe("two", &doc), SelectionChange::Captured);
        assert_eq!(tracker.current().unwrap().text(), "two");
        assert_eq!(tracker.observe("  ", &doc), SelectionChange::Cleared);
        assert!(tracker.current().is_none());
    }

    #[test]
    fn test_tracker_clear() {
        let doc = Document::with_content("abc");
        let mut tracker = SelectionTracker::new();
        assert!(!tracker.clear());
        tracker.observe("abc", &doc);
        assert!(tracker.clear());
        assert!(tracker.current().is_none());
    }

    #[test]
    fn test_preview() {
        let doc = Document::with_content("abcdefghij");
        let sel = Selection::capture("abcdefghij", &doc).unwrap();
        assert_eq!(sel.preview(30), "abcdefghij");
        assert_eq!(sel.preview(4), "abcd...");
    }
}
