//! Hosted inference client using the OnceCell pattern.

use editor::{ChatRequest, InferenceBackend, InferenceError, InferenceReply};
use reqwest::Client;
use tokio::sync::OnceCell;

use super::settings::InferenceSettings;

static CLIENT: OnceCell<HostedInference> = OnceCell::const_new();

/// Get or initialize the shared inference client.
/// Fails with [`InferenceError::MissingToken`] until a token is configured.
pub async fn get_client() -> Result<&'static HostedInference, InferenceError> {
    CLIENT
        .get_or_try_init(|| async { HostedInference::new(InferenceSettings::from_env()) })
        .await
}

/// Chat-completion client for a hosted model endpoint.
#[derive(Debug, Clone)]
pub struct HostedInference {
    client: Client,
    endpoint: String,
    model: String,
    token: String,
}

impl HostedInference {
    pub fn new(settings: InferenceSettings) -> Result<Self, InferenceError> {
        let token = settings.token.ok_or(InferenceError::MissingToken)?;
        Ok(Self {
            client: Client::new(),
            endpoint: settings.config.endpoint,
            model: settings.config.model,
            token,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl InferenceBackend for HostedInference {
    async fn complete(&self, request: &ChatRequest) -> Result<InferenceReply, InferenceError> {
        let mut body = request.clone();
        body.model = self.model.clone();

        tracing::debug!(
            endpoint = %self.endpoint,
            model = %body.model,
            messages = body.messages.len(),
            "sending inference request"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .await
            .map_err(|e| InferenceError::Transport(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| InferenceError::Decode(e.to_string()))?;

        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "inference endpoint returned an error");
            return Err(InferenceError::Endpoint {
                status: status.as_u16(),
                body: text,
            });
        }

        let reply = InferenceReply::from_body(&text);
        if reply == InferenceReply::Unrecognized {
            let preview: String = text.chars().take(500).collect();
            tracing::warn!("unrecognized inference response: {preview}");
        }
        Ok(reply)
    }
}
