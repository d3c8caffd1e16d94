//! # Allow-list HTML sanitizer
//!
//! Every piece of markup that did not come from the author's own keystrokes
//! (clipboard content, assistant replies, template bodies) passes through
//! [`sanitize`] before it reaches the editable surface.
//!
//! The policy is a strict allow-list on top of [`ammonia`]:
//!
//! | Kept | Tags |
//! |------|------|
//! | Blocks | `h1`–`h6`, `p`, `blockquote`, `ul`, `ol`, `li` |
//! | Inline | `br`, `strong`, `b`, `em`, `i`, `u`, `a` |
//!
//! Only `a` carries attributes (`href`, `target`, `rel`). `script` and `style`
//! are dropped together with their content; any other element is unwrapped so
//! its (sanitized) children survive.

use std::collections::{HashMap, HashSet};

const ALLOWED_TAGS: &[&str] = &[
    "h1", "h2", "h3", "h4", "h5", "h6", "p", "br", "strong", "b", "em", "i", "u", "ul", "ol",
    "li", "blockquote", "a",
];

const ANCHOR_ATTRIBUTES: &[&str] = &["href", "target", "rel"];

const URL_SCHEMES: &[&str] = &["http", "https", "mailto"];

const DROPPED_WITH_CONTENT: &[&str] = &["script", "style"];

fn policy() -> ammonia::Builder<'static> {
    let mut anchor_attributes = HashMap::new();
    anchor_attributes.insert("a", ANCHOR_ATTRIBUTES.iter().copied().collect::<HashSet<_>>());

    let mut builder = ammonia::Builder::new();
    builder
        .tags(ALLOWED_TAGS.iter().copied().collect())
        .clean_content_tags(DROPPED_WITH_CONTENT.iter().copied().collect())
        .generic_attributes(HashSet::new())
        .tag_attributes(anchor_attributes)
        .url_schemes(URL_SCHEMES.iter().copied().collect())
        // `rel` is author-controlled here, so ammonia must not inject its own.
        .link_rel(None)
        .strip_comments(true);
    builder
}

/// Clean untrusted markup down to the allow-listed tag and attribute set.
///
/// Never fails: malformed input degrades to whatever safe content the HTML
/// parser could recover, possibly the empty string.
pub fn sanitize(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }
    policy().clean(raw).to_string()
}

/// Escape plain text and turn its line breaks into `<br>`.
pub fn plain_text_to_html(text: &str) -> String {
    let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
    normalized
        .split('\n')
        .map(html_escape)
        .collect::<Vec<_>>()
        .join("<br>")
}

/// Build the sanitized fragment for a paste from the clipboard's HTML and
/// plain-text representations. HTML wins when it is present and non-empty.
pub fn clipboard_fragment(html: Option<&str>, text: Option<&str>) -> String {
    match (html.filter(|h| !h.trim().is_empty()), text) {
        (Some(html), _) => sanitize(html),
        (None, Some(text)) if !text.is_empty() => sanitize(&plain_text_to_html(text)),
        _ => String::new(),
    }
}

/// Text content of a markup string with every tag removed.
pub fn visible_text(markup: &str) -> String {
    let stripped = ammonia::Builder::empty().clean(markup).to_string();
    stripped
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

/// True when the markup renders nothing but whitespace or bare line breaks.
pub fn is_visually_empty(markup: &str) -> bool {
    visible_text(markup).trim().is_empty()
}

pub(crate) fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
