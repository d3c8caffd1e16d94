//! Top-level editor page: owns the document, the selection and the assistant
//! session, and wires them to the writing surface and the chat panel.

use dioxus::prelude::*;
use editor::templates::Template;
use editor::{
    Applied, AssistantSession, CredentialState, Document, Patch, SelectionChange, SelectionTracker,
};

use crate::activity_log::{log_activity, use_activity_log, LogLevel};
use crate::activity_log_panel::{ActivityLogPanel, ActivityLogToggle};
use crate::assistant_chat::AssistantChat;
use crate::header::Header;
use crate::icons::{FaComments, FaFileLines, FaWandMagicSparkles};
use crate::notices::{notify, notify_persistent, use_notices, NoticeTray};
use crate::template_selector::TemplateSelector;
use crate::writing_area::WritingArea;
use crate::Icon;

#[component]
pub fn BlogEditor() -> Element {
    let mut doc = use_signal(Document::new);
    // Mirror of `doc.content()` handed to the surface.
    let mut content = use_signal(String::new);
    let mut tracker = use_signal(SelectionTracker::new);
    let mut session = use_signal(AssistantSession::default);

    let mut online = use_signal(|| false);
    let mut show_templates = use_signal(|| false);
    let mut show_chat = use_signal(|| true);

    let mut log = use_activity_log();
    let mut notices = use_notices();

    // Ask the server once whether the assistant can be used.
    use_effect(move || {
        spawn(async move {
            match api::assistant_status().await {
                Ok(status) if status.token_configured => {
                    online.set(true);
                    log_activity(
                        &mut log,
                        LogLevel::Info,
                        &format!("Assistant ready ({})", status.config.model),
                    );
                    let mut session = session.write();
                    session.set_config(status.config);
                    session.set_credential(CredentialState::Available);
                }
                Ok(status) => {
                    online.set(false);
                    session.write().set_config(status.config);
                    session.write().set_credential(CredentialState::Missing);
                    log_activity(&mut log, LogLevel::Warning, "No API token configured");
                    notify_persistent(
                        &mut notices,
                        LogLevel::Warning,
                        "API token missing",
                        "Set HF_API_TOKEN on the server to enable the AI assistant.",
                    );
                }
                Err(e) => {
                    online.set(false);
                    session.write().set_credential(CredentialState::Missing);
                    log_activity(
                        &mut log,
                        LogLevel::Error,
                        &format!("Could not reach the assistant service: {e}"),
                    );
                    notify_persistent(
                        &mut notices,
                        LogLevel::Warning,
                        "AI assistant unavailable",
                        "The assistant service could not be reached.",
                    );
                }
            }
        });
    });

    let on_change = move |value: String| {
        if doc.write().set_content(value.clone()) {
            content.set(value);
        }
    };

    let on_select = move |raw: String| {
        let change = tracker.write().observe(&raw, &doc.read());
        if change != SelectionChange::Unchanged && session.write().on_selection_changed() {
            log_activity(&mut log, LogLevel::Info, "Selection changed, chat reset");
        }
    };

    // Each reply carries the selection its request was sent with.
    let on_apply = move |patch: Patch| {
        let result = doc.write().apply(&patch);
        match result {
            Ok(applied) => {
                content.set(doc.read().content().to_string());
                tracker.write().clear();
                let body = match applied {
                    Applied::Replaced { .. } => "The selected text was replaced.",
                    Applied::Appended => "The text was added to your post.",
                };
                log_activity(&mut log, LogLevel::Success, "Edit applied");
                notify(&mut notices, LogLevel::Success, "Edit Applied", body);
            }
            Err(e) => {
                log_activity(&mut log, LogLevel::Warning, &e.to_string());
                notify(&mut notices, LogLevel::Warning, "Couldn't apply edit", &e.to_string());
            }
        }
    };

    let on_template = move |template: Template| {
        doc.write().set_markup(template.content);
        content.set(doc.read().content().to_string());
        tracker.write().clear();
        show_templates.set(false);
        log_activity(
            &mut log,
            LogLevel::Info,
            &format!("Loaded the {} template", template.title),
        );
    };

    rsx! {
        div {
            class: "app-shell",
            Header {
                online: online(),
                button {
                    class: if show_templates() { "header-button active" } else { "header-button" },
                    onclick: move |_| show_templates.set(!show_templates()),
                    Icon { icon: FaFileLines, width: 14, height: 14 }
                    " Templates"
                }
                button {
                    class: if show_chat() { "header-button active" } else { "header-button" },
                    onclick: move |_| show_chat.set(!show_chat()),
                    Icon { icon: FaComments, width: 14, height: 14 }
                    if show_chat() { " Hide AI" } else { " Show AI" }
                }
                ActivityLogToggle {}
            }

            main {
                class: "editor-layout",
                div {
                    class: "editor-main",
                    if show_templates() {
                        TemplateSelector { on_select: on_template }
                    }
                    WritingArea {
                        content: content,
                        on_change: on_change,
                        on_select: on_select,
                    }
                }

                if show_chat() {
                    AssistantChat {
                        session: session,
                        tracker: tracker,
                        on_apply: on_apply,
                        on_close: move |_| show_chat.set(false),
                    }
                } else {
                    div {
                        class: "assistant-cta",
                        Icon { icon: FaWandMagicSparkles, width: 20, height: 20 }
                        h3 { "Need help writing?" }
                        p { "Open the AI assistant to draft, rewrite or polish your post." }
                        button {
                            class: "assistant-cta-button",
                            onclick: move |_| show_chat.set(true),
                            "Open AI Assistant"
                        }
                    }
                }
            }

            ActivityLogPanel {}
            NoticeTray {}
        }
    }
}
