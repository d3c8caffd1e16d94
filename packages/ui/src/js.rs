//! Small helpers for talking to the page through `document::eval`.

use dioxus::prelude::*;

/// Escape a string so it's safe to embed inside a JS string literal (double-quoted).
pub fn js_string_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            c if c < '\x20' => {
                out.push_str(&format!("\\u{:04x}", c as u32));
            }
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Replace the inner HTML of the element with `id`.
pub fn set_inner_html(id: &str, html: &str) {
    let js = format!(
        r#"(function() {{
            var el = document.getElementById({id_js});
            if (el && el.innerHTML !== {html_js}) {{ el.innerHTML = {html_js}; }}
        }})();"#,
        id_js = js_string_escape(id),
        html_js = js_string_escape(html),
    );
    document::eval(&js);
}

/// Write plain text to the system clipboard.
pub fn copy_to_clipboard(text: &str) {
    let js = format!(
        r#"(function() {{
            if (navigator.clipboard && navigator.clipboard.writeText) {{
                navigator.clipboard.writeText({text_js});
            }}
        }})();"#,
        text_js = js_string_escape(text),
    );
    document::eval(&js);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_js_string_escape() {
        assert_eq!(js_string_escape("plain"), "\"plain\"");
        assert_eq!(js_string_escape("a\"b"), "\"a\\\"b\"");
        assert_eq!(js_string_escape("line\nnext"), "\"line\\nnext\"");
        assert_eq!(js_string_escape("back\\slash"), "\"back\\\\slash\"");
        assert_eq!(js_string_escape("\u{1}"), "\"\\u0001\"");
    }
}
