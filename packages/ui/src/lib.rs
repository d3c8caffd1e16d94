//! This crate contains all shared UI for the workspace.

// Re-export icon library
pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}

mod js;

mod header;
pub use header::Header;

mod writing_area;
pub use writing_area::WritingArea;

mod assistant_chat;
pub use assistant_chat::AssistantChat;

mod template_selector;
pub use template_selector::TemplateSelector;

mod blog_editor;
pub use blog_editor::BlogEditor;

pub mod notices;
pub use notices::{notify, use_notices, Notice, NoticeTray, Notices};

pub mod activity_log;
pub use activity_log::{log_activity, use_activity_log, ActivityLog, LogLevel};

mod activity_log_panel;
pub use activity_log_panel::{ActivityLogPanel, ActivityLogToggle};
