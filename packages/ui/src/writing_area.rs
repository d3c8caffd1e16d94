use dioxus::prelude::*;
use editor::{ClipboardData, EditableSurface};
use serde::Deserialize;

use crate::js::{js_string_escape, set_inner_html};

const EDITOR_CSS: Asset = asset!("/assets/styling/editor.css");

/// Simple counter for unique IDs
static SURFACE_COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(0);

/// Events the page-side bridge reports for the editable element.
#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
enum SurfaceEvent {
    Input {
        html: String,
    },
    Select {
        text: String,
    },
    Paste {
        html: Option<String>,
        text: Option<String>,
    },
    /// Sent after the bridge tried to insert a sanitized paste fragment.
    Pasted {
        html: String,
        inserted: bool,
    },
    Focus,
}

/// Contenteditable writing surface.
///
/// `content` is owned by the caller; edits come back through `on_change` and
/// the highlighted text through `on_select` (empty string when nothing is
/// selected).
#[component]
pub fn WritingArea(
    content: Signal<String>,
    on_change: EventHandler<String>,
    on_select: EventHandler<String>,
    #[props(default = "Start writing your blog post here, or ask the AI to generate one for you...".to_string())]
    placeholder: String,
) -> Element {
    let surface_id = use_signal(|| {
        let n = SURFACE_COUNTER.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
        format!("writing-surface-{n}")
    });
    let mut surface = use_signal(EditableSurface::new);
    let mut bridged = use_signal(|| false);

    // ── Event bridge: DOM events → Rust ──
    use_effect(move || {
        let sid = surface_id.peek().clone();
        spawn(async move {
            let bridge_js = format!(
                r#"(function() {{
                    var el = document.getElementById({sid_js});
                    if (!el || el._wfBridge) return;
                    el._wfBridge = true;

                    el.addEventListener('input', function() {{
                        dioxus.send({{ kind: 'input', html: el.innerHTML }});
                    }});
                    el.addEventListener('focus', function() {{
                        dioxus.send({{ kind: 'focus' }});
                    }});
                    var reportSelection = function() {{
                        var sel = window.getSelection();
                        var text = sel ? sel.toString().trim() : '';
                        dioxus.send({{ kind: 'select', text: text }});
                    }};
                    el.addEventListener('mouseup', reportSelection);
                    el.addEventListener('keyup', reportSelection);

                    el.addEventListener('paste', async function(e) {{
                        e.preventDefault();
                        var data = e.clipboardData || window.clipboardData;
                        var html = data ? data.getData('text/html') : '';
                        var text = data ? data.getData('text/plain') : '';
                        dioxus.send({{ kind: 'paste', html: html || null, text: text || null }});
                        var fragment = await dioxus.recv();
                        var inserted = false;
                        if (fragment && document.queryCommandSupported
                            && document.queryCommandSupported('insertHTML')) {{
                            inserted = document.execCommand('insertHTML', false, fragment);
                        }}
                        dioxus.send({{ kind: 'pasted', html: el.innerHTML, inserted: !!inserted || !fragment }});
                    }});
                }})();"#,
                sid_js = js_string_escape(&sid),
            );
            let mut eval = document::eval(&bridge_js);
            bridged.set(true);

            let mut pending_fragment = String::new();
            loop {
                let event = match eval.recv::<SurfaceEvent>().await {
                    Ok(event) => event,
                    Err(e) => {
                        tracing::debug!("writing surface bridge closed: {e:?}");
                        break;
                    }
                };
                match event {
                    SurfaceEvent::Input { html } => {
                        let value = surface.write().on_input(&html);
                        on_change.call(value);
                    }
                    SurfaceEvent::Select { text } => on_select.call(text),
                    SurfaceEvent::Focus => {
                        // Leftover `<br>`-style markup is dropped from the
                        // document too, not only from the DOM.
                        let cleared = surface.write().on_focus();
                        if let Some(cleared) = cleared {
                            set_inner_html(&sid, &cleared);
                            on_change.call(cleared);
                        }
                    }
                    SurfaceEvent::Paste { html, text } => {
                        let clipboard = ClipboardData { html, text };
                        pending_fragment = surface.peek().on_paste(&clipboard);
                        if let Err(e) = eval.send(pending_fragment.clone()) {
                            tracing::warn!("could not hand paste fragment to the page: {e:?}");
                        }
                    }
                    SurfaceEvent::Pasted { html, inserted } => {
                        let value = if inserted {
                            surface.write().on_input(&html)
                        } else {
                            tracing::debug!("insertHTML unavailable, appending paste");
                            let merged = surface.write().paste_fallback(&pending_fragment);
                            set_inner_html(&sid, &merged);
                            merged
                        };
                        pending_fragment.clear();
                        on_change.call(value);
                    }
                }
            }
        });
    });

    // ── Sync external content changes into the surface ──
    // Only writes when the incoming value differs from what is rendered, so
    // the caret is left alone while the author types.
    use_effect(move || {
        let text = content();
        if !bridged() {
            return;
        }
        let write = surface.write().sync_external(&text);
        if let Some(html) = write {
            set_inner_html(&surface_id.peek(), &html);
        }
    });

    let is_empty = surface.read().is_empty();

    rsx! {
        document::Stylesheet { href: EDITOR_CSS }
        div {
            class: "writing-area",
            div {
                id: "{surface_id}",
                class: if is_empty { "writing-surface is-empty" } else { "writing-surface" },
                contenteditable: "true",
                spellcheck: "true",
                "data-placeholder": "{placeholder}",
            }
        }
    }
}
