//! # Inference module: hosted model client
//!
//! Server-side half of the writing assistant. The API token never leaves the
//! server: the browser sends a [`editor::ChatRequest`] through the
//! `complete_chat` server function and this module forwards it to the hosted
//! endpoint.
//!
//! ## Design
//!
//! The client is a **lazy, process-wide singleton** backed by a
//! [`tokio::sync::OnceCell`]. The first call to [`get_client`] reads the
//! environment (via `dotenvy`) and caches the client when a token is present.
//! Without `HF_API_TOKEN` every call fails with
//! [`editor::InferenceError::MissingToken`] and the UI keeps the assistant
//! disabled.
//!
//! ## Re-exports
//!
//! - [`get_client`]: returns `&'static HostedInference`, initialising it on first use.
//! - [`InferenceSettings`]: the `writeflow.toml` assistant section with
//!   endpoint and model overridden from the environment, plus the token.

mod client;
mod settings;

pub use client::{get_client, HostedInference};
pub use settings::{
    config_path, load_config, InferenceSettings, CONFIG_VAR, ENDPOINT_VAR, MODEL_VAR, TOKEN_VAR,
};
