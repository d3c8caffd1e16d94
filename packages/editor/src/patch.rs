//! # Applying assistant actions to the document
//!
//! An assistant reply carries an *action*: markup to put into the post. How it
//! lands depends on whether a selection was active when the request was sent:
//!
//! - **Editing** (selection present): the selected text is replaced by the action.
//! - **Generating** (no selection): the action is appended, separated from
//!   existing content by a paragraph break, or becomes the whole content when
//!   the document is blank.
//!
//! A selection that is exactly the text of an inline element (`<em>world</em>`
//! with `world` selected) replaces the whole element, so the action's own
//! formatting wins. Block wrappers (`<p>`, headings, lists, quotes) are only
//! absorbed when the action is itself block markup.
//!
//! [`apply_action`] is the plain string form. [`Document::apply`] is the
//! versioned form used by the editor: it checks the selection snapshot against
//! the document version and reports a stale selection instead of guessing.

use std::ops::Range;

use thiserror::Error;

use crate::document::Document;
use crate::sanitize::sanitize;
use crate::selection::{escape_text, locate, Selection};

/// Inserted between existing content and an appended action.
pub const PARAGRAPH_SEPARATOR: &str = "\n\n";

const INLINE_WRAPPERS: &[&str] = &["strong", "b", "em", "i", "u", "a"];
const BLOCK_WRAPPERS: &[&str] = &[
    "p", "h1", "h2", "h3", "h4", "h5", "h6", "li", "blockquote", "ul", "ol",
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatchError {
    #[error("the selected text \"{0}\" is no longer in the document")]
    SelectionStale(String),
    #[error("the suggestion contains no markup that can be inserted")]
    EmptyAction,
}

/// How a patch landed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Applied {
    /// The selection was replaced. `relocated` is true when the text had to
    /// be searched for again because the document changed since capture.
    Replaced { relocated: bool },
    Appended,
}

/// An action together with the selection that was active when it was requested.
#[derive(Debug, Clone, PartialEq)]
pub struct Patch {
    pub action: String,
    pub selection: Option<Selection>,
}

impl Patch {
    pub fn new(action: impl Into<String>, selection: Option<Selection>) -> Self {
        Self {
            action: action.into(),
            selection,
        }
    }
}

/// Merge `action` into `content`.
///
/// With a non-empty `selection`, the first occurrence of it is replaced; if it
/// does not occur the content comes back unchanged. With an empty `selection`
/// the action is appended.
pub fn apply_action(action: &str, selection: &str, content: &str) -> String {
    if !selection.is_empty() {
        return match content.find(selection) {
            Some(start) => {
                let range = widen_to_wrappers(content, start..start + selection.len(), action);
                splice(content, range, action)
            }
            None => content.to_string(),
        };
    }
    append(content, action)
}

fn append(content: &str, action: &str) -> String {
    if content.trim().is_empty() {
        action.to_string()
    } else {
        format!("{content}{PARAGRAPH_SEPARATOR}{action}")
    }
}

/// Grow `range` over element tags that wrap it exactly.
fn widen_to_wrappers(content: &str, mut range: Range<usize>, action: &str) -> Range<usize> {
    let block_action = tag_name(action.trim_start())
        .is_some_and(|name| BLOCK_WRAPPERS.contains(&name.as_str()));
    loop {
        let before = &content[..range.start];
        let Some(open_start) = before.rfind('<') else {
            break;
        };
        let open = &before[open_start..];
        if open.starts_with("</") || open.find('>') != Some(open.len() - 1) {
            break;
        }
        let Some(name) = tag_name(open) else {
            break;
        };
        let close = format!("</{name}>");
        let closes = content
            .get(range.end..range.end + close.len())
            .is_some_and(|after| after.eq_ignore_ascii_case(&close));
        let widen = INLINE_WRAPPERS.contains(&name.as_str())
            || (block_action && BLOCK_WRAPPERS.contains(&name.as_str()));
        if !closes || !widen {
            break;
        }
        range = open_start..range.end + close.len();
    }
    range
}

/// Lowercased element name of an opening tag at the start of `markup`.
fn tag_name(markup: &str) -> Option<String> {
    let rest = markup.strip_prefix('<')?;
    let name: String = rest
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric())
        .collect();
    if name.is_empty() {
        None
    } else {
        Some(name.to_ascii_lowercase())
    }
}

fn splice(content: &str, range: Range<usize>, replacement: &str) -> String {
    let mut out = String::with_capacity(content.len() - range.len() + replacement.len());
    out.push_str(&content[..range.start]);
    out.push_str(replacement);
    out.push_str(&content[range.end..]);
    out
}

impl Document {
    /// Apply a patch, checking its selection snapshot against this document.
    ///
    /// The action is sanitized before it is merged. On any error the content
    /// and version are untouched.
    pub fn apply(&mut self, patch: &Patch) -> Result<Applied, PatchError> {
        let action = sanitize(&patch.action);
        if action.trim().is_empty() {
            return Err(PatchError::EmptyAction);
        }

        let Some(selection) = &patch.selection else {
            let merged = append(self.content(), &action);
            self.set_content(merged);
            return Ok(Applied::Appended);
        };

        // A moved-on document keeps the anchor only if it still spans exactly
        // the selected text, literal or escaped.
        let anchored = selection.anchor().filter(|range| {
            selection.version() == self.version()
                || self.content().get(range.clone()).is_some_and(|at| {
                    at == selection.text() || at == escape_text(selection.text())
                })
        });

        let (range, relocated) = match anchored {
            Some(range) => (range, false),
            None => match locate(self.content(), selection.text()) {
                Some(range) => (range, true),
                None => {
                    tracing::warn!(
                        version = self.version(),
                        captured = selection.version(),
                        "selection is stale"
                    );
                    return Err(PatchError::SelectionStale(selection.text().to_string()));
                }
            },
        };

        let range = widen_to_wrappers(self.content(), range, &action);
        let merged = splice(self.content(), range, &action);
        self.set_content(merged);
        Ok(Applied::Replaced { relocated })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replace_selection() {
        let out = apply_action("<strong>Earth</strong>", "world", "Hello <em>world</em> today");
        assert_eq!(out, "Hello <strong>Earth</strong> today");
    }

    #[test]
    fn test_block_wrapper_absorbed_only_by_block_action() {
        let content = "<p>Intro</p>\n<p>Body</p>";
        assert_eq!(
            apply_action("<h2>Intro</h2>", "Intro", content),
            "<h2>Intro</h2>\n<p>Body</p>"
        );
        assert_eq!(
            apply_action("<strong>Intro</strong>", "Intro", content),
            "<p><strong>Intro</strong></p>\n<p>Body</p>"
        );
    }

    #[test]
    fn test_partial_wrapper_not_absorbed() {
        assert_eq!(
            apply_action("planet", "world", "<em>big world</em>"),
            "<em>big planet</em>"
        );
    }

    #[test]
    fn test_replace_selection_with_markup_boundaries() {
        let out = apply_action(
            "<strong>Earth</strong>",
            "<em>world</em>",
            "Hello <em>world</em> today",
        );
        assert_eq!(out, "Hello <strong>Earth</strong> today");
    }

    #[test]
    fn test_replace_first_occurrence_only() {
        assert_eq!(apply_action("X", "a", "a a a"), "X a a");
    }

    #[test]
    fn test_append_to_blank() {
        assert_eq!(apply_action("<h1>Title</h1>", "", ""), "<h1>Title</h1>");
        assert_eq!(apply_action("<h1>Title</h1>", "", "  \n"), "<h1>Title</h1>");
    }

    #[test]
    fn test_append_to_existing() {
        assert_eq!(
            apply_action("<p>More</p>", "", "<p>Intro</p>"),
            format!("<p>Intro</p>{PARAGRAPH_SEPARATOR}<p>More</p>")
        );
    }

    #[test]
    fn test_stale_selection_is_noop() {
        assert_eq!(apply_action("new", "xyz", "abc"), "abc");
    }

    #[test]
    fn test_document_apply_at_anchor() {
        let mut doc = Document::with_content("one two one");
        let doc_snapshot = doc.clone();
        let sel = Selection::capture("one", &doc_snapshot).unwrap();
        let applied = doc.apply(&Patch::new("1", Some(sel))).unwrap();
        assert_eq!(applied, Applied::Replaced { relocated: false });
        assert_eq!(doc.content(), "1 two one");
        assert_eq!(doc.version(), 1);
    }

    #[test]
    fn test_document_apply_anchor_survives_unrelated_edit() {
        let mut doc = Document::with_content("alpha beta");
        let sel = Selection::capture("alpha", &doc).unwrap();
        doc.set_content("alpha beta gamma");
        let applied = doc.apply(&Patch::new("ALPHA", Some(sel))).unwrap();
        assert_eq!(applied, Applied::Replaced { relocated: false });
        assert_eq!(doc.content(), "ALPHA beta gamma");
    }

    #[test]
    fn test_document_apply_relocates_moved_text() {
        let mut doc = Document::with_content("alpha beta");
        let sel = Selection::capture("beta", &doc).unwrap();
        doc.set_content("intro: alpha beta");
        let applied = doc.apply(&Patch::new("BETA", Some(sel))).unwrap();
        assert_eq!(applied, Applied::Replaced { relocated: true });
        assert_eq!(doc.content(), "intro: alpha BETA");
    }

    #[test]
    fn test_document_apply_stale_selection() {
        let mut doc = Document::with_content("alpha beta");
        let sel = Selection::capture("beta", &doc).unwrap();
        doc.set_content("alpha gamma");
        let version = doc.version();
        let err = doc.apply(&Patch::new("BETA", Some(sel))).unwrap_err();
        assert_eq!(err, PatchError::SelectionStale("beta".to_string()));
        assert_eq!(doc.content(), "alpha gamma");
        assert_eq!(doc.version(), version);
    }

    #[test]
    fn test_document_apply_escaped_selection() {
        let mut doc = Document::with_content("<p>salt &amp; pepper</p>");
        let sel = Selection::capture("salt & pepper", &doc).unwrap();
        doc.apply(&Patch::new("<strong>spice</strong>", Some(sel))).unwrap();
        assert_eq!(doc.content(), "<p><strong>spice</strong></p>");
    }

    #[test]
    fn test_document_apply_appends_without_selection() {
        let mut doc = Document::new();
        assert_eq!(doc.apply(&Patch::new("<h1>Title</h1>", None)).unwrap(), Applied::Appended);
        assert_eq!(doc.content(), "<h1>Title</h1>");
        doc.apply(&Patch::new("<p>Body</p>", None)).unwrap();
        assert_eq!(doc.content(), "<h1>Title</h1>\n\n<p>Body</p>");
    }

    #[test]
    fn test_escaped_anchor_rejected_when_span_no_longer_matches() {
        let mut doc = Document::with_content("<p>a &amp; b</p>");
        let sel = Selection::capture("a & b", &doc).unwrap();
        doc.set_content("<p>Xa & bYYYY</p>");
        let applied = doc.apply(&Patch::new("Z", Some(sel))).unwrap();
        assert_eq!(applied, Applied::Replaced { relocated: true });
        assert_eq!(doc.content(), "<p>XZYYYY</p>");
    }

    #[test]
    fn test_escaped_anchor_kept_when_span_still_matches() {
        let mut doc = Document::with_content("<p>a &amp; b</p>");
        let sel = Selection::capture("a & b", &doc).unwrap();
        doc.set_content("<p>a &amp; b</p><p>more</p>");
        let applied = doc.apply(&Patch::new("c", Some(sel))).unwrap();
        assert_eq!(applied, Applied::Replaced { relocated: false });
        assert_eq!(doc.content(), "<p>c</p><p>more</p>");
    }

    #[test]
    fn test_document_apply_sanitizes_action() {
        let mut doc = Document::new();
        doc.apply(&Patch::new(r#"<p onclick="x">Hi</p><script>a()</script>"#, None))
            .unwrap();
        assert_eq!(doc.content(), "<p>Hi</p>");
        assert!(!doc.content().contains("onclick"));
        assert!(!doc.content().contains("script"));
    }

    #[test]
    fn test_document_apply_rejects_action_with_nothing_left() {
        let mut doc = Document::with_content("<p>keep</p>");
        let err = doc.apply(&Patch::new("<script>a()</script>", None)).unwrap_err();
        assert_eq!(err, PatchError::EmptyAction);
        assert_eq!(doc.content(), "<p>keep</p>");
        assert_eq!(doc.version(), 0);
    }
}
