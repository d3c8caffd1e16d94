//! # Editable surface synchronization
//!
//! The contenteditable element is shared mutable state: the browser edits it
//! as the author types, and the application pushes new content into it after
//! templates and applied patches. [`EditableSurface`] mirrors what the element
//! currently renders and decides when a write is actually needed, so an echo
//! of the author's own input never resets the caret.
//!
//! | Event | Method | Result |
//! |-------|--------|--------|
//! | external content changed | [`sync_external`](EditableSurface::sync_external) | sanitized markup to write, or `None` to leave the DOM alone |
//! | author typed | [`on_input`](EditableSurface::on_input) | rendered markup to propagate as content (unsanitized) |
//! | paste | [`on_paste`](EditableSurface::on_paste) | sanitized fragment to insert at the caret |
//! | paste without `insertHTML` | [`paste_fallback`](EditableSurface::paste_fallback) | rendered markup with the fragment appended |
//! | focus | [`on_focus`](EditableSurface::on_focus) | `Some("")` when the DOM should be cleared |

use serde::{Deserialize, Serialize};

use crate::sanitize::{clipboard_fragment, is_visually_empty, sanitize};

/// Placeholder-relevant state of the surface.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SurfaceState {
    #[default]
    Empty,
    Composing,
}

/// The two clipboard representations a paste can carry.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClipboardData {
    pub html: Option<String>,
    pub text: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EditableSurface {
    rendered: String,
    state: SurfaceState,
}

impl EditableSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// What the surface is believed to render right now.
    pub fn rendered(&self) -> &str {
        &self.rendered
    }

    pub fn state(&self) -> SurfaceState {
        self.state
    }

    pub fn is_empty(&self) -> bool {
        self.state == SurfaceState::Empty
    }

    /// Bring the surface in line with externally owned content.
    ///
    /// Returns the sanitized markup to write into the DOM, or `None` when the
    /// surface already shows this content.
    pub fn sync_external(&mut self, content: &str) -> Option<String> {
        if content == self.rendered {
            return None;
        }
        let clean = sanitize(content);
        if clean == self.rendered {
            return None;
        }
        self.record(clean.clone());
        Some(clean)
    }

    /// The author edited the surface; returns the new content to propagate.
    pub fn on_input(&mut self, rendered: &str) -> String {
        self.record(rendered.to_string());
        self.rendered.clone()
    }

    /// Sanitized fragment to insert at the caret for a paste.
    pub fn on_paste(&self, clipboard: &ClipboardData) -> String {
        clipboard_fragment(clipboard.html.as_deref(), clipboard.text.as_deref())
    }

    /// Degraded paste for runtimes without an HTML insertion primitive: the
    /// fragment goes to the end of the surface.
    pub fn paste_fallback(&mut self, fragment: &str) -> String {
        let merged = format!("{}{}", self.rendered, fragment);
        self.record(merged);
        self.rendered.clone()
    }

    /// Focus on an empty surface clears any stray placeholder markup.
    pub fn on_focus(&mut self) -> Option<String> {
        if self.state != SurfaceState::Empty {
            return None;
        }
        let stray = !self.rendered.is_empty();
        self.rendered.clear();
        stray.then(String::new)
    }

    fn record(&mut self, rendered: String) {
        self.state = if is_visually_empty(&rendered) {
            SurfaceState::Empty
        } else {
            SurfaceState::Composing
        };
        self.rendered = rendered;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_external_sync_writes_sanitized_value() {
        let mut surface = EditableSurface::new();
        let write = surface.sync_external("<h1 style=\"x\">Title</h1><script>bad()</script>");
        assert_eq!(write.as_deref(), Some("<h1>Title</h1>"));
        assert_eq!(surface.state(), SurfaceState::Composing);
    }

    #[test]
    fn test_echo_of_own_input_is_skipped() {
        let mut surface = EditableSurface::new();
        let content = surface.on_input("<p>typing<span>now</span></p>");
        assert_eq!(surface.sync_external(&content), None);
        assert_eq!(surface.rendered(), "<p>typing<span>now</span></p>");
    }

    #[test]
    fn test_unchanged_sanitized_value_is_skipped() {
        let mut surface = EditableSurface::new();
        assert!(surface.sync_external("<p onclick=\"x\">hi</p>").is_some());
        assert_eq!(surface.sync_external("<p onclick=\"x\">hi</p>"), None);
        assert_eq!(surface.sync_external("<p>hi</p>"), None);
    }

    #[test]
    fn test_input_tracks_emptiness() {
        let mut surface = EditableSurface::new();
        assert!(surface.is_empty());
        surface.on_input("<p>x</p>");
        assert_eq!(surface.state(), SurfaceState::Composing);
        surface.on_input("<br>");
        assert!(surface.is_empty());
    }

    #[test]
    fn test_paste_fragment_and_fallback() {
        let mut surface = EditableSurface::new();
        surface.on_input("<p>start</p>");
        let fragment = surface.on_paste(&ClipboardData {
            html: None,
            text: Some("one\ntwo".to_string()),
        });
        assert_eq!(fragment, "one<br>two");

        let rendered = surface.paste_fallback(&fragment);
        assert_eq!(rendered, "<p>start</p>one<br>two");
        assert_eq!(surface.sync_external(&rendered), None);
    }

    #[test]
    fn test_focus_clears_only_empty_surface() {
        let mut surface = EditableSurface::new();
        surface.on_input("<br>");
        assert_eq!(surface.on_focus(), Some(String::new()));
        assert_eq!(surface.on_focus(), None);

        surface.on_input("<p>text</p>");
        assert_eq!(surface.on_focus(), None);
        assert_eq!(surface.rendered(), "<p>text</p>");
    }

    #[test]
    fn test_focus_clear_propagates_as_blank_content() {
        use crate::document::Document;
        use crate::patch::Patch;

        let mut surface = EditableSurface::new();
        let mut doc = Document::new();
        doc.set_content(surface.on_input("<br>"));

        let cleared = surface.on_focus().unwrap();
        doc.set_content(cleared.clone());
        assert_eq!(surface.sync_external(&cleared), None);

        doc.apply(&Patch::new("<h1>Title</h1>", None)).unwrap();
        assert_eq!(doc.content(), "<h1>Title</h1>");
    }
}
