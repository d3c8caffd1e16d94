use dioxus::prelude::*;
use editor::templates::{Template, TEMPLATES};

use crate::icons::FaFileLines;
use crate::Icon;

/// Grid of starter templates. Picking one replaces the document content.
#[component]
pub fn TemplateSelector(on_select: EventHandler<Template>) -> Element {
    rsx! {
        section {
            class: "template-selector",
            h3 { "Start from a template" }
            div {
                class: "template-grid",
                for template in TEMPLATES.iter() {
                    button {
                        key: "{template.id}",
                        class: "template-card",
                        onclick: move |_| on_select.call(*template),
                        Icon { icon: FaFileLines, width: 16, height: 16 }
                        span { class: "template-title", "{template.title}" }
                        span { class: "template-description", "{template.description}" }
                    }
                }
            }
        }
    }
}
