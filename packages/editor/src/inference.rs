//! # Inference endpoint boundary
//!
//! Wire types for the single chat-completion round trip, the tagged union the
//! endpoint's reply is decoded into, and the [`InferenceBackend`] trait the
//! assistant session talks to.
//!
//! ## Reply shapes
//!
//! Hosted endpoints answer in one of two shapes:
//!
//! | Shape | Example |
//! |-------|---------|
//! | Chat completion | `{"choices": [{"message": {"content": "..."}}]}` |
//! | Text generation | `{"generated_text": "..."}` or `[{"generated_text": "..."}]` |
//!
//! [`InferenceReply::from_value`] maps these onto [`InferenceReply::Choice`] and
//! [`InferenceReply::Generated`]; anything else becomes
//! [`InferenceReply::Unrecognized`] rather than an error.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::AssistantConfig;
use crate::transcript::Role;

/// One `{role, content}` pair of the request.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WireMessage {
    pub role: Role,
    pub content: String,
}

/// Request body for one chat completion.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<WireMessage>,
    pub max_tokens: u32,
    pub temperature: f32,
    pub top_p: f32,
}

impl ChatRequest {
    pub fn new(config: &AssistantConfig, messages: Vec<WireMessage>) -> Self {
        Self {
            model: config.model.clone(),
            messages,
            max_tokens: config.max_tokens,
            temperature: config.temperature,
            top_p: config.top_p,
        }
    }
}

/// Decoded reply from the endpoint.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum InferenceReply {
    /// `choices[0].message.content`
    Choice(String),
    /// `generated_text`
    Generated(String),
    Unrecognized,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: String,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct Generation {
    generated_text: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawReply {
    Choices { choices: Vec<Choice> },
    Generated(Generation),
    GeneratedList(Vec<Generation>),
}

impl InferenceReply {
    pub fn from_value(value: serde_json::Value) -> Self {
        match serde_json::from_value::<RawReply>(value) {
            Ok(RawReply::Choices { choices }) => match choices.into_iter().next() {
                Some(choice) => InferenceReply::Choice(choice.message.content),
                None => InferenceReply::Unrecognized,
            },
            Ok(RawReply::Generated(generation)) => {
                InferenceReply::Generated(generation.generated_text)
            }
            Ok(RawReply::GeneratedList(list)) => match list.into_iter().next() {
                Some(generation) => InferenceReply::Generated(generation.generated_text),
                None => InferenceReply::Unrecognized,
            },
            Err(_) => InferenceReply::Unrecognized,
        }
    }

    /// Decode a raw response body. Bodies that are not JSON are unrecognized.
    pub fn from_body(body: &str) -> Self {
        match serde_json::from_str::<serde_json::Value>(body) {
            Ok(value) => Self::from_value(value),
            Err(_) => InferenceReply::Unrecognized,
        }
    }

    /// The generated text, if the reply carried any.
    pub fn text(&self) -> Option<&str> {
        match self {
            InferenceReply::Choice(text) | InferenceReply::Generated(text) => Some(text),
            InferenceReply::Unrecognized => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
pub enum InferenceError {
    #[error("no inference API token is configured")]
    MissingToken,
    #[error("request failed: {0}")]
    Transport(String),
    #[error("endpoint returned {status}: {body}")]
    Endpoint { status: u16, body: String },
    #[error("could not read response: {0}")]
    Decode(String),
}

/// Anything that can answer a [`ChatRequest`] with one round trip.
pub trait InferenceBackend {
    fn complete(
        &self,
        request: &ChatRequest,
    ) -> impl std::future::Future<Output = Result<InferenceReply, InferenceError>>;
}

/// In-memory backend that replays queued results, for tests and offline demos.
#[derive(Clone, Debug, Default)]
pub struct ScriptedBackend {
    replies: Arc<Mutex<VecDeque<Result<InferenceReply, InferenceError>>>>,
    requests: Arc<Mutex<Vec<ChatRequest>>>,
}

impl ScriptedBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the result for the next call.
    pub fn push(&self, reply: Result<InferenceReply, InferenceError>) -> &Self {
        if let Ok(mut replies) = self.replies.lock() {
            replies.push_back(reply);
        }
        self
    }

    /// Every request received so far.
    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().map(|r| r.len()).unwrap_or_default()
    }
}

impl InferenceBackend for ScriptedBackend {
    async fn complete(&self, request: &ChatRequest) -> Result<InferenceReply, InferenceError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request.clone());
        }
        self.replies
            .lock()
            .ok()
            .and_then(|mut replies| replies.pop_front())
            .unwrap_or_else(|| Err(InferenceError::Transport("no scripted reply".to_string())))
    }
}
