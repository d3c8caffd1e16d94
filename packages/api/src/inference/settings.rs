//! Inference settings: `writeflow.toml` plus environment overrides.

use std::path::{Path, PathBuf};

use editor::{AssistantConfig, WriteFlowConfig};

pub const TOKEN_VAR: &str = "HF_API_TOKEN";
pub const ENDPOINT_VAR: &str = "WRITEFLOW_INFERENCE_URL";
pub const MODEL_VAR: &str = "WRITEFLOW_MODEL";
/// Overrides where `writeflow.toml` is read from.
pub const CONFIG_VAR: &str = "WRITEFLOW_CONFIG";

/// Where and how to reach the hosted model.
#[derive(Debug, Clone, PartialEq)]
pub struct InferenceSettings {
    pub config: AssistantConfig,
    /// Bearer token. `None` disables the assistant.
    pub token: Option<String>,
}

impl InferenceSettings {
    /// Read the config file and the process environment (and `.env`, if present).
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let lookup = |name: &str| std::env::var(name).ok();
        let config = load_config(&config_path(lookup));
        Self::from_lookup(config, lookup)
    }

    /// Apply variable overrides from an arbitrary lookup on top of `config`.
    pub fn from_lookup(config: AssistantConfig, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_blank = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let mut config = config;
        if let Some(endpoint) = non_blank(ENDPOINT_VAR) {
            config = config.with_endpoint(endpoint.trim());
        }
        if let Some(model) = non_blank(MODEL_VAR) {
            config = config.with_model(model.trim());
        }
        Self {
            config,
            token: non_blank(TOKEN_VAR).map(|t| t.trim().to_string()),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.config.endpoint
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }
}

/// `$WRITEFLOW_CONFIG`, or `writeflow.toml` in the working directory.
pub fn config_path(lookup: impl Fn(&str) -> Option<String>) -> PathBuf {
    lookup(CONFIG_VAR)
        .filter(|v| !v.trim().is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(WriteFlowConfig::filename()))
}

/// Load the assistant section of the config file.
///
/// A missing file means defaults; an unreadable or invalid one is logged and
/// also falls back to defaults.
pub fn load_config(path: &Path) -> AssistantConfig {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return AssistantConfig::default();
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), "could not read config file: {e}");
            return AssistantConfig::default();
        }
    };
    match WriteFlowConfig::from_toml(&text) {
        Ok(config) => config.assistant,
        Err(e) => {
            tracing::warn!(path = %path.display(), "invalid config file: {e}");
            AssistantConfig::default()
        }
    }
}
