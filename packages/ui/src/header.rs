//! Top bar with the product name and assistant status.

use dioxus::prelude::*;

use crate::icons::{FaPenNib, FaRobot};
use crate::Icon;

const LAYOUT_CSS: Asset = asset!("/assets/styling/layout.css");

/// - **online**: "AI Assistant Active"
/// - **offline**: "AI Assistant Offline" (no API token configured)
#[component]
pub fn Header(online: bool, children: Element) -> Element {
    rsx! {
        document::Stylesheet { href: LAYOUT_CSS }
        header {
            class: "app-header",
            div {
                class: "app-brand",
                Icon { icon: FaPenNib, width: 18, height: 18 }
                h1 { "WriteFlow AI" }
            }
            span {
                class: if online { "assistant-status assistant-status--active" } else { "assistant-status assistant-status--offline" },
                title: if online { "Connected to the hosted model" } else { "Set HF_API_TOKEN on the server to enable the assistant" },
                Icon { icon: FaRobot, width: 14, height: 14 }
                if online { " AI Assistant Active" } else { " AI Assistant Offline" }
            }
            div {
                class: "app-header-actions",
                {children}
            }
        }
    }
}
