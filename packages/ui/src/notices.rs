//! Toast-style notices shown over the editor.

use dioxus::prelude::*;

use crate::activity_log::LogLevel;

const NOTICES_CSS: Asset = asset!("/assets/styling/notices.css");

/// How long a transient notice stays on screen.
pub const NOTICE_TIMEOUT_MS: u32 = 4_000;

#[derive(Clone, Debug, PartialEq)]
pub struct Notice {
    pub id: u64,
    pub level: LogLevel,
    pub title: String,
    pub body: String,
    /// Persistent notices stay until dismissed.
    pub persistent: bool,
}

#[derive(Clone, Debug, Default)]
pub struct Notices {
    pub items: Vec<Notice>,
    next_id: u64,
}

impl Notices {
    /// Queue a notice and return its id.
    pub fn push(&mut self, level: LogLevel, title: &str, body: &str, persistent: bool) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.items.push(Notice {
            id,
            level,
            title: title.to_string(),
            body: body.to_string(),
            persistent,
        });
        id
    }

    pub fn dismiss(&mut self, id: u64) {
        self.items.retain(|n| n.id != id);
    }
}

pub fn use_notices() -> Signal<Notices> {
    use_context::<Signal<Notices>>()
}

/// Show a notice. Transient notices dismiss themselves after [`NOTICE_TIMEOUT_MS`].
pub fn notify(notices: &mut Signal<Notices>, level: LogLevel, title: &str, body: &str) {
    let _id = notices.write().push(level, title, body, false);

    #[cfg(target_arch = "wasm32")]
    {
        let mut notices = *notices;
        spawn(async move {
            gloo_timers::future::TimeoutFuture::new(NOTICE_TIMEOUT_MS).await;
            notices.write().dismiss(_id);
        });
    }
}

/// Show a notice that stays until the author closes it.
pub fn notify_persistent(notices: &mut Signal<Notices>, level: LogLevel, title: &str, body: &str) {
    notices.write().push(level, title, body, true);
}

#[component]
pub fn NoticeTray() -> Element {
    let mut notices = use_notices();
    let items = notices().items.clone();

    if items.is_empty() {
        return rsx! {};
    }

    rsx! {
        document::Stylesheet { href: NOTICES_CSS }

        div {
            class: "notice-tray",
            for notice in items {
                div {
                    key: "{notice.id}",
                    class: match notice.level {
                        LogLevel::Error => "notice error",
                        LogLevel::Warning => "notice warning",
                        LogLevel::Success => "notice success",
                        LogLevel::Info => "notice info",
                    },
                    div {
                        class: "notice-text",
                        strong { "{notice.title}" }
                        if !notice.body.is_empty() {
                            p { "{notice.body}" }
                        }
                    }
                    button {
                        class: "notice-close",
                        title: "Dismiss",
                        onclick: move |_| notices.write().dismiss(notice.id),
                        "×"
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_assigns_increasing_ids() {
        let mut notices = Notices::default();
        let a = notices.push(LogLevel::Success, "Edit Applied", "", false);
        let b = notices.push(LogLevel::Warning, "API token missing", "", true);
        assert!(b > a);
        assert_eq!(notices.items.len(), 2);
        assert!(notices.items[1].persistent);
    }

    #[test]
    fn test_dismiss_removes_only_target() {
        let mut notices = Notices::default();
        let a = notices.push(LogLevel::Info, "one", "", false);
        let b = notices.push(LogLevel::Info, "two", "", false);
        notices.dismiss(a);
        assert_eq!(notices.items.len(), 1);
        assert_eq!(notices.items[0].id, b);
        notices.dismiss(a);
        assert_eq!(notices.items.len(), 1);
    }
}
