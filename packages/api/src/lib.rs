//! # API crate: server functions for the WriteFlow assistant
//!
//! Defines the Dioxus server functions the web frontend calls to reach the
//! hosted language model. Each function is compiled twice: once with the real
//! server logic (behind `#[cfg(feature = "server")]`) and once as a thin client
//! stub that forwards the call over HTTP.
//!
//! ## Modules
//!
//! | Module | Feature gate | Purpose |
//! |--------|-------------|---------|
//! | [`inference`] | `server` | Environment settings and the `reqwest` client for the hosted endpoint |
//!
//! ## Server functions exposed here
//!
//! - `assistant_status`: whether an API token is configured, and the assistant settings
//! - `complete_chat`: forwards one [`ChatRequest`] and returns the decoded [`InferenceReply`]

use dioxus::prelude::*;
use serde::{Deserialize, Serialize};

#[cfg(feature = "server")]
pub mod inference;

pub use editor::{AssistantConfig, ChatRequest, InferenceError, InferenceReply};

/// Assistant availability, safe to send to the client (never includes the token).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AssistantStatus {
    pub token_configured: bool,
    /// Deployment settings from `writeflow.toml`, for the client-side session.
    pub config: AssistantConfig,
}

/// Report whether the assistant can be used.
#[cfg(feature = "server")]
#[get("/api/assistant/status")]
pub async fn assistant_status() -> Result<AssistantStatus, ServerFnError> {
    let settings = inference::InferenceSettings::from_env();
    if !settings.has_token() {
        tracing::warn!("{} is not set; the writing assistant is disabled", inference::TOKEN_VAR);
    }
    Ok(AssistantStatus {
        token_configured: settings.has_token(),
        config: settings.config,
    })
}

#[cfg(not(feature = "server"))]
#[get("/api/assistant/status")]
pub async fn assistant_status() -> Result<AssistantStatus, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Run one chat completion against the hosted model. No retry.
#[cfg(feature = "server")]
#[post("/api/assistant/complete")]
pub async fn complete_chat(request: ChatRequest) -> Result<InferenceReply, ServerFnError> {
    use editor::InferenceBackend;

    let client = inference::get_client()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    client
        .complete(&request)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))
}

#[cfg(not(feature = "server"))]
#[post("/api/assistant/complete")]
pub async fn complete_chat(request: ChatRequest) -> Result<InferenceReply, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}
