//! Floating list of assistant requests, applied edits and their failures.

use dioxus::prelude::*;

use crate::activity_log::{use_activity_log, LogEntry};
use crate::icons::{FaListUl, FaTriangleExclamation};
use crate::js::copy_to_clipboard;
use crate::Icon;

const ACTIVITY_LOG_CSS: Asset = asset!("/assets/styling/activity_log.css");

/// Entries to show, newest first.
fn visible_entries(entries: &[LogEntry], problems_only: bool) -> Vec<LogEntry> {
    entries
        .iter()
        .rev()
        .filter(|e| !problems_only || e.level.is_problem())
        .cloned()
        .collect()
}

#[component]
pub fn ActivityLogPanel() -> Element {
    let mut log = use_activity_log();
    let mut problems_only = use_signal(|| false);

    if !log().visible {
        return rsx! {};
    }

    let total = log().entries.len();
    let problems = log().problem_count();
    let shown = visible_entries(&log().entries, problems_only());

    rsx! {
        document::Stylesheet { href: ACTIVITY_LOG_CSS }

        aside {
            class: "activity-log-panel",
            div {
                class: "activity-log-header",
                span { "Assistant activity" }
                label {
                    class: "activity-log-filter",
                    input {
                        r#type: "checkbox",
                        checked: problems_only(),
                        oninput: move |evt| problems_only.set(evt.checked()),
                    }
                    "Problems only ({problems})"
                }
                div {
                    class: "activity-log-header-actions",
                    button {
                        disabled: total == 0,
                        title: "Copy the log as text",
                        onclick: move |_| copy_to_clipboard(&log.read().to_text()),
                        "Copy"
                    }
                    button {
                        disabled: total == 0,
                        onclick: move |_| log.write().entries.clear(),
                        "Clear"
                    }
                    button {
                        onclick: move |_| log.write().visible = false,
                        "Close"
                    }
                }
            }
            ol {
                class: "activity-log-entries",
                if shown.is_empty() {
                    li {
                        class: "activity-log-empty",
                        if problems_only() && total > 0 {
                            "No stale selections or failed requests."
                        } else {
                            "No assistant activity yet."
                        }
                    }
                }
                for entry in shown {
                    li {
                        class: "activity-log-entry {entry.level.css_class()}",
                        time { class: "activity-log-time", "{entry.timestamp}" }
                        " {entry.message}"
                    }
                }
            }
        }
    }
}

/// Header button that opens the panel. The badge counts problems when there
/// are any, otherwise every entry.
#[component]
pub fn ActivityLogToggle() -> Element {
    let mut log = use_activity_log();
    let problems = log().problem_count();
    let count = log().entries.len();

    rsx! {
        button {
            class: if problems > 0 { "header-button activity-log-toggle has-problems" } else { "header-button activity-log-toggle" },
            onclick: move |_| {
                let visible = log().visible;
                log.write().visible = !visible;
            },
            title: "Assistant activity",
            if problems > 0 {
                Icon { icon: FaTriangleExclamation, width: 14, height: 14 }
                span { class: "activity-log-count", "{problems}" }
            } else {
                Icon { icon: FaListUl, width: 14, height: 14 }
                if count > 0 {
                    span { class: "activity-log-count", "{count}" }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activity_log::{ActivityLog, LogLevel};

    fn sample() -> ActivityLog {
        let mut log = ActivityLog::default();
        log.record("10:00:00".into(), LogLevel::Info, "Asking the assistant");
        log.record("10:00:03".into(), LogLevel::Error, "request failed");
        log.record("10:00:09".into(), LogLevel::Success, "Edit applied");
        log.record("10:00:12".into(), LogLevel::Warning, "selection is stale");
        log
    }

    #[test]
    fn test_visible_entries_newest_first() {
        let log = sample();
        let shown = visible_entries(&log.entries, false);
        assert_eq!(shown.len(), 4);
        assert_eq!(shown[0].message, "selection is stale");
        assert_eq!(shown[3].message, "Asking the assistant");
    }

    #[test]
    fn test_visible_entries_problems_only() {
        let log = sample();
        let shown: Vec<_> = visible_entries(&log.entries, true)
            .into_iter()
            .map(|e| e.message)
            .collect();
        assert_eq!(shown, vec!["selection is stale", "request failed"]);
    }
}
