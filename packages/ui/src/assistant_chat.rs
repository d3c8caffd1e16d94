//! Chat panel for the writing assistant.

use dioxus::prelude::*;
use editor::{
    AssistantSession, InferenceError, Outcome, Patch, Role, SelectionTracker, SendRejected,
    SessionState,
};

use crate::activity_log::{log_activity, use_activity_log, LogLevel};
use crate::icons::{FaCheck, FaCopy, FaPaperPlane, FaRobot, FaWandMagicSparkles, FaXmark};
use crate::js::copy_to_clipboard;
use crate::notices::{notify, use_notices};
use crate::Icon;

const CHAT_CSS: Asset = asset!("/assets/styling/chat.css");

/// How long the "Copied!" label stays on a message.
#[cfg(target_arch = "wasm32")]
const COPIED_FEEDBACK_MS: u32 = 2_000;

/// Characters of the active selection shown above the input.
const SELECTION_PREVIEW_CHARS: usize = 30;

#[component]
pub fn AssistantChat(
    session: Signal<AssistantSession>,
    tracker: Signal<SelectionTracker>,
    on_apply: EventHandler<Patch>,
    #[props(default)] on_close: EventHandler<()>,
) -> Element {
    let mut input = use_signal(String::new);
    let mut copied = use_signal(|| None::<usize>);
    let mut log = use_activity_log();
    let mut notices = use_notices();

    let mut send = move || {
        let text = input();
        let selection = tracker.read().current().cloned();

        let request = match session.write().begin_send(&text, selection.as_ref()) {
            Ok(request) => request,
            Err(SendRejected::Blank) => return,
            Err(e) => {
                log_activity(&mut log, LogLevel::Warning, &format!("Message not sent: {e}"));
                return;
            }
        };
        input.set(String::new());
        log_activity(
            &mut log,
            LogLevel::Info,
            if selection.is_some() {
                "Asking the assistant to edit the selection"
            } else {
                "Asking the assistant"
            },
        );

        spawn(async move {
            let result = api::complete_chat(request)
                .await
                .map_err(|e| InferenceError::Transport(e.to_string()));
            let outcome = session.write().complete(result);
            match outcome {
                Outcome::Answered => {
                    log_activity(&mut log, LogLevel::Success, "Assistant replied");
                }
                Outcome::Unrecognized => {
                    let message = "Assistant reply had an unexpected shape";
                    log_activity(&mut log, LogLevel::Warning, message);
                }
                Outcome::Failed(e) => {
                    let message = format!("Assistant request failed: {e}");
                    log_activity(&mut log, LogLevel::Error, &message);
                    notify(&mut notices, LogLevel::Error, "AI request failed", &e.to_string());
                }
            }
        });
    };

    let mut copy = move |index: usize, text: String| {
        copy_to_clipboard(&text);
        copied.set(Some(index));
        log_activity(&mut log, LogLevel::Info, "Copied assistant reply to clipboard");

        #[cfg(target_arch = "wasm32")]
        spawn(async move {
            gloo_timers::future::TimeoutFuture::new(COPIED_FEEDBACK_MS).await;
            if copied() == Some(index) {
                copied.set(None);
            }
        });
    };

    let state = session.read().state();
    let can_send = session.read().can_send();
    let busy = state == SessionState::AwaitingResponse;
    let messages = session.read().transcript().messages().to_vec();
    let preview = tracker.read().current().map(|s| s.preview(SELECTION_PREVIEW_CHARS));
    let send_disabled = !can_send || input().trim().is_empty();

    rsx! {
        document::Stylesheet { href: CHAT_CSS }

        aside {
            class: "assistant-chat",
            div {
                class: "assistant-chat-header",
                Icon { icon: FaRobot, width: 16, height: 16 }
                span { "AI Writing Assistant" }
                button {
                    class: "assistant-chat-close",
                    title: "Hide assistant",
                    onclick: move |_| on_close.call(()),
                    Icon { icon: FaXmark, width: 14, height: 14 }
                }
            }

            div {
                class: "assistant-chat-messages",
                for (index, message) in messages.into_iter().enumerate() {
                    div {
                        key: "{index}",
                        class: match message.role {
                            Role::User => "chat-message chat-message--user",
                            _ => "chat-message chat-message--assistant",
                        },
                        div { class: "chat-message-content", "{message.content}" }
                        if let Some(patch) = message.patch() {
                            div {
                                class: "chat-message-actions",
                                button {
                                    class: "chat-action chat-action--apply",
                                    onclick: {
                                        let patch = patch.clone();
                                        move |_| on_apply.call(patch.clone())
                                    },
                                    Icon { icon: FaWandMagicSparkles, width: 12, height: 12 }
                                    " Apply"
                                }
                                button {
                                    class: "chat-action",
                                    onclick: move |_| copy(index, patch.action.clone()),
                                    if copied() == Some(index) {
                                        Icon { icon: FaCheck, width: 12, height: 12 }
                                        " Copied!"
                                    } else {
                                        Icon { icon: FaCopy, width: 12, height: 12 }
                                        " Copy"
                                    }
                                }
                            }
                        }
                    }
                }
                if busy {
                    div {
                        class: "chat-message chat-message--assistant chat-thinking",
                        "AI is thinking..."
                    }
                }
            }

            if let Some(preview) = preview {
                div {
                    class: "assistant-chat-selection",
                    "Selected: \"{preview}\""
                }
            }

            div {
                class: "assistant-chat-input",
                input {
                    r#type: "text",
                    placeholder: "Ask AI to write, edit, or improve your content...",
                    value: "{input}",
                    disabled: !can_send,
                    oninput: move |evt: FormEvent| input.set(evt.value()),
                    onkeydown: move |evt: KeyboardEvent| {
                        if evt.key() == Key::Enter {
                            evt.prevent_default();
                            send();
                        }
                    },
                }
                button {
                    class: "assistant-chat-send",
                    title: "Send",
                    disabled: send_disabled,
                    onclick: move |_| send(),
                    Icon { icon: FaPaperPlane, width: 14, height: 14 }
                }
            }
        }
    }
}
