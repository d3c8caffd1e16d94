//! # Assistant configuration: `writeflow.toml`
//!
//! Generation settings for the writing assistant. The values are fixed for a
//! deployment rather than tuned per request, so they live in a small TOML
//! document (filename: [`WriteFlowConfig::filename`]) with production
//! defaults baked in.
//!
//! ```toml
//! [assistant]
//! model = "mistralai/Mistral-7B-Instruct-v0.3"
//! endpoint = "https://api-inference.huggingface.co/models/mistralai/Mistral-7B-Instruct-v0.3/v1/chat/completions"
//! max_tokens = 500
//! temperature = 0.7
//! top_p = 0.9
//! reset_on_selection_change = false
//! ```
//!
//! Every field has a default, so a missing or empty file equals
//! [`WriteFlowConfig::default`].

use serde::{Deserialize, Serialize};

pub const DEFAULT_MODEL: &str = "mistralai/Mistral-7B-Instruct-v0.3";
pub const DEFAULT_ENDPOINT: &str =
    concat!(
        "https://api-inference.huggingface.co/models/",
        "mistralai/Mistral-7B-Instruct-v0.3/v1/chat/completions"
    );

/// Top-level configuration stored in `writeflow.toml`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WriteFlowConfig {
    #[serde(default)]
    pub assistant: AssistantConfig,
}

/// Inference settings used for every request.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AssistantConfig {
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_top_p")]
    pub top_p: f32,
    /// Start a fresh transcript whenever the selection changes.
    #[serde(default)]
    pub reset_on_selection_change: bool,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_max_tokens() -> u32 {
    500
}

fn default_temperature() -> f32 {
    0.7
}

fn default_top_p() -> f32 {
    0.9
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            endpoint: default_endpoint(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            top_p: default_top_p(),
            reset_on_selection_change: false,
        }
    }
}

impl AssistantConfig {
    /// Builder method to override the model identifier.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Builder method to override the endpoint URL.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

impl WriteFlowConfig {
    /// The well-known filename for the config file.
    pub fn filename() -> &'static str {
        "writeflow.toml"
    }

    /// Parse from TOML string.
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }
}
