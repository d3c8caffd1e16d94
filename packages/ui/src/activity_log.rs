//! In-app record of what the assistant and editor did this session.

use dioxus::prelude::*;

/// Oldest entries are dropped beyond this.
pub const MAX_ENTRIES: usize = 200;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl LogLevel {
    pub fn is_problem(&self) -> bool {
        matches!(self, LogLevel::Warning | LogLevel::Error)
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            LogLevel::Info => "info",
            LogLevel::Success => "success",
            LogLevel::Warning => "warning",
            LogLevel::Error => "error",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct LogEntry {
    pub timestamp: String,
    pub level: LogLevel,
    pub message: String,
}

#[derive(Clone, Debug, Default)]
pub struct ActivityLog {
    pub entries: Vec<LogEntry>,
    pub visible: bool,
}

impl ActivityLog {
    pub fn record(&mut self, timestamp: String, level: LogLevel, message: &str) {
        self.entries.push(LogEntry {
            timestamp,
            level,
            message: message.to_string(),
        });
        if self.entries.len() > MAX_ENTRIES {
            let excess = self.entries.len() - MAX_ENTRIES;
            self.entries.drain(..excess);
        }
    }

    /// Warnings and errors, i.e. stale edits and failed requests.
    pub fn problem_count(&self) -> usize {
        self.entries.iter().filter(|e| e.level.is_problem()).count()
    }

    /// Plain-text export, oldest first, for pasting into a bug report.
    pub fn to_text(&self) -> String {
        self.entries
            .iter()
            .map(|e| format!("{} [{}] {}", e.timestamp, e.level.css_class(), e.message))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

pub fn use_activity_log() -> Signal<ActivityLog> {
    use_context::<Signal<ActivityLog>>()
}

/// Append to the activity log and mirror the message to `tracing`.
pub fn log_activity(log: &mut Signal<ActivityLog>, level: LogLevel, message: &str) {
    match level {
        LogLevel::Error => tracing::error!("{message}"),
        LogLevel::Warning => tracing::warn!("{message}"),
        LogLevel::Info | LogLevel::Success => tracing::debug!("{message}"),
    }
    log.write().record(current_time(), level, message);
}

#[cfg(target_arch = "wasm32")]
fn current_time() -> String {
    let date = js_sys::Date::new_0();
    let h = date.get_hours();
    let m = date.get_minutes();
    let s = date.get_seconds();
    format!("{h:02}:{m:02}:{s:02}")
}

#[cfg(not(target_arch = "wasm32"))]
fn current_time() -> String {
    "00:00:00".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_caps_entries() {
        let mut log = ActivityLog::default();
        for i in 0..MAX_ENTRIES + 5 {
            log.record("00:00:00".into(), LogLevel::Info, &format!("entry {i}"));
        }
        assert_eq!(log.entries.len(), MAX_ENTRIES);
        assert_eq!(log.entries[0].message, "entry 5");
    }

    #[test]
    fn test_warnings_and_errors_are_problems() {
        let mut log = ActivityLog::default();
        log.record("00:00:00".into(), LogLevel::Success, "Edit applied");
        assert_eq!(log.problem_count(), 0);
        log.record("00:00:01".into(), LogLevel::Warning, "stale selection");
        log.record("00:00:02".into(), LogLevel::Error, "request failed");
        assert_eq!(log.problem_count(), 2);
    }

    #[test]
    fn test_problem_count_and_export() {
        let mut log = ActivityLog::default();
        log.record("10:00:00".into(), LogLevel::Info, "Asking the assistant");
        log.record("10:00:02".into(), LogLevel::Success, "Edit applied");
        log.record("10:00:05".into(), LogLevel::Warning, "selection is stale");
        assert_eq!(log.problem_count(), 1);
        assert_eq!(
            log.to_text(),
            "10:00:00 [info] Asking the assistant\n\
             10:00:02 [success] Edit applied\n\
             10:00:05 [warning] selection is stale"
        );
    }
}
