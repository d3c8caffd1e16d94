//! # Assistant session
//!
//! The conversation with the model as an explicit two-state machine:
//!
//! ```text
//! Idle ──begin_send──▶ AwaitingResponse ──complete──▶ Idle
//! ```
//!
//! `AwaitingResponse` doubles as the lock that keeps at most one request in
//! flight: [`AssistantSession::begin_send`] refuses to start a second one.
//! Sending is split in two so a UI can release its borrow of the session while
//! the request is out; [`AssistantSession::send`] runs both halves against an
//! [`InferenceBackend`] for callers that can hold the session across the await.
//!
//! Whatever the endpoint does, exactly one assistant message is appended per
//! accepted send. Failures become a message without an action, never an error
//! that escapes the session.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::AssistantConfig;
use crate::inference::{ChatRequest, InferenceBackend, InferenceError, InferenceReply};
use crate::prompt::build_messages;
use crate::selection::Selection;
use crate::transcript::{Message, Transcript};

pub const UNRECOGNIZED_REPLY: &str =
    "I couldn't understand the model's response. Please try again.";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    #[default]
    Idle,
    AwaitingResponse,
}

/// Whether an API token is available to the endpoint client.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CredentialState {
    #[default]
    Available,
    Missing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SendRejected {
    #[error("message is blank")]
    Blank,
    #[error("a request is already in flight")]
    Busy,
    #[error("the assistant is disabled: no API token configured")]
    Disabled,
}

/// How a request ended, as seen by the UI.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Answered,
    /// The endpoint answered in a shape we could not read.
    Unrecognized,
    Failed(InferenceError),
}

#[derive(Clone, Debug, PartialEq)]
pub struct AssistantSession {
    config: AssistantConfig,
    transcript: Transcript,
    state: SessionState,
    credential: CredentialState,
    /// Selection the in-flight (or last) request was issued with.
    request_selection: Option<Selection>,
}

impl Default for AssistantSession {
    fn default() -> Self {
        Self::new(AssistantConfig::default())
    }
}

impl AssistantSession {
    pub fn new(config: AssistantConfig) -> Self {
        Self {
            config,
            transcript: Transcript::new(),
            state: SessionState::Idle,
            credential: CredentialState::Available,
            request_selection: None,
        }
    }

    pub fn config(&self) -> &AssistantConfig {
        &self.config
    }

    /// Swap in the deployment's settings. Applies from the next request on.
    pub fn set_config(&mut self, config: AssistantConfig) {
        self.config = config;
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn credential(&self) -> CredentialState {
        self.credential
    }

    pub fn set_credential(&mut self, credential: CredentialState) {
        self.credential = credential;
    }

    /// Whether a send would currently be accepted, ignoring the message text.
    pub fn can_send(&self) -> bool {
        self.state == SessionState::Idle && self.credential == CredentialState::Available
    }

    /// Selection captured with the request currently in flight.
    pub fn request_selection(&self) -> Option<&Selection> {
        self.request_selection.as_ref()
    }

    /// Tell the session the active selection changed.
    ///
    /// Only has an effect when configured with `reset_on_selection_change`,
    /// and never while a request is in flight.
    pub fn on_selection_changed(&mut self) -> bool {
        if self.config.reset_on_selection_change && self.state == SessionState::Idle {
            self.transcript.reset();
            return true;
        }
        false
    }

    /// Accept a user message and build the request for it.
    ///
    /// Rejections leave the transcript and state untouched.
    pub fn begin_send(
        &mut self,
        user_text: &str,
        selection: Option<&Selection>,
    ) -> Result<ChatRequest, SendRejected> {
        if user_text.trim().is_empty() {
            return Err(SendRejected::Blank);
        }
        if self.credential == CredentialState::Missing {
            return Err(SendRejected::Disabled);
        }
        if self.state == SessionState::AwaitingResponse {
            return Err(SendRejected::Busy);
        }

        self.transcript.push(Message::user(user_text));
        self.state = SessionState::AwaitingResponse;
        self.request_selection = selection.cloned();
        tracing::debug!(
            messages = self.transcript.len(),
            editing = selection.is_some(),
            "assistant request started"
        );

        let messages = build_messages(&self.transcript, selection, user_text);
        Ok(ChatRequest::new(&self.config, messages))
    }

    /// Record the result of the in-flight request and return to `Idle`.
    pub fn complete(&mut self, result: Result<InferenceReply, InferenceError>) -> Outcome {
        if self.state != SessionState::AwaitingResponse {
            tracing::warn!("completion received with no request in flight");
        }
        self.state = SessionState::Idle;
        let selection = self.request_selection.take();

        let (message, outcome) = match result {
            Ok(reply) => match reply.text() {
                Some(text) => (
                    Message::assistant(text, Some(text.to_string())).with_selection(selection),
                    Outcome::Answered,
                ),
                None => (Message::assistant(UNRECOGNIZED_REPLY, None), Outcome::Unrecognized),
            },
            Err(e) => {
                tracing::warn!(error = %e, "assistant request failed");
                (
                    Message::assistant(
                        format!("Sorry, I couldn't reach the AI service: {e}"),
                        None,
                    ),
                    Outcome::Failed(e),
                )
            }
        };
        self.transcript.push(message);
        outcome
    }

    /// Run a whole send against `backend`: exactly one call, no retry.
    pub async fn send<B: InferenceBackend>(
        &mut self,
        backend: &B,
        user_text: &str,
        selection: Option<&Selection>,
    ) -> Result<Outcome, SendRejected> {
        let request = self.begin_send(user_text, selection)?;
        let result = backend.complete(&request).await;
        Ok(self.complete(result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;
    use crate::inference::ScriptedBackend;
    use crate::patch::{Applied, Patch};
    use crate::transcript::Role;

    #[tokio::test]
    async fn test_successful_send() {
        let backend = ScriptedBackend::new();
        backend.push(Ok(InferenceReply::Choice("<h1>Tea</h1>".to_string())));
        let mut session = AssistantSession::default();

        let outcome = session.send(&backend, "Write a blog about tea", None).await.unwrap();
        assert_eq!(outcome, Outcome::Answered);
        assert_eq!(session.state(), SessionState::Idle);
        assert_eq!(session.transcript().len(), 3);

        let reply = session.transcript().last().unwrap();
        assert_eq!(reply.role, Role::Assistant);
        assert_eq!(reply.content, "<h1>Tea</h1>");
        assert_eq!(reply.action.as_deref(), Some("<h1>Tea</h1>"));
    }

    #[tokio::test]
    async fn test_failed_send_appends_one_message_without_action() {
        let backend = ScriptedBackend::new();
        backend.push(Err(InferenceError::Endpoint {
            status: 503,
            body: "overloaded".to_string(),
        }));
        let mut session = AssistantSession::default();
        let before = session.transcript().len();

        let outcome = session.send(&backend, "hello", None).await.unwrap();
        assert!(matches!(outcome, Outcome::Failed(InferenceError::Endpoint { status: 503, .. })));
        assert_eq!(session.transcript().len(), before + 2);

        let messages = session.transcript().messages();
        assert_eq!(messages[before].role, Role::User);
        let reply = &messages[before + 1];
        assert_eq!(reply.role, Role::Assistant);
        assert!(reply.action.is_none());
        assert!(reply.content.contains("overloaded"));
        assert_eq!(session.state(), SessionState::Idle);
        assert_eq!(backend.calls(), 1);
    }

    #[tokio::test]
    async fn test_unrecognized_reply_is_not_an_error() {
        let backend = ScriptedBackend::new();
        backend.push(Ok(InferenceReply::Unrecognized));
        let mut session = AssistantSession::default();

        let outcome = session.send(&backend, "hello", None).await.unwrap();
        assert_eq!(outcome, Outcome::Unrecognized);
        let reply = session.transcript().last().unwrap();
        assert_eq!(reply.content, UNRECOGNIZED_REPLY);
        assert!(!reply.is_applicable());
    }

    #[test]
    fn test_send_while_awaiting_is_noop() {
        let mut session = AssistantSession::default();
        session.begin_send("first", None).unwrap();
        let len = session.transcript().len();

        assert_eq!(session.begin_send("second", None), Err(SendRejected::Busy));
        assert_eq!(session.transcript().len(), len);
        assert_eq!(session.state(), SessionState::AwaitingResponse);
    }

    #[tokio::test]
    async fn test_busy_session_makes_no_network_call() {
        let backend = ScriptedBackend::new();
        let mut session = AssistantSession::default();
        session.begin_send("first", None).unwrap();

        let rejected = session.send(&backend, "second", None).await;
        assert_eq!(rejected, Err(SendRejected::Busy));
        assert_eq!(backend.calls(), 0);
    }

    #[test]
    fn test_blank_send_rejected() {
        let mut session = AssistantSession::default();
        assert_eq!(session.begin_send("   ", None), Err(SendRejected::Blank));
        assert_eq!(session.transcript().len(), 1);
        assert_eq!(session.state(), SessionState::Idle);
    }

    #[test]
    fn test_missing_credential_disables_send() {
        let mut session = AssistantSession::default();
        session.set_credential(CredentialState::Missing);
        assert!(!session.can_send());
        assert_eq!(session.begin_send("hello", None), Err(SendRejected::Disabled));
        assert_eq!(session.transcript().len(), 1);
    }

    #[test]
    fn test_editing_request_carries_selection() {
        let doc = Document::with_content("<p>The cat sat.</p>");
        let selection = Selection::capture("cat", &doc).unwrap();
        let mut session = AssistantSession::default();

        let request = session.begin_send("make it a dog", Some(&selection)).unwrap();
        assert_eq!(request.messages[0].role, Role::System);
        assert!(request.messages[0].content.contains("cat"));
        assert_eq!(request.max_tokens, 500);
        assert_eq!(session.request_selection(), Some(&selection));
    }

    #[test]
    fn test_selection_change_resets_only_when_configured() {
        let mut session = AssistantSession::default();
        session.begin_send("hi", None).unwrap();
        session.complete(Ok(InferenceReply::Generated("hello".to_string())));
        assert!(!session.on_selection_changed());
        assert_eq!(session.transcript().len(), 3);

        let config = AssistantConfig {
            reset_on_selection_change: true,
            ..AssistantConfig::default()
        };
        let mut session = AssistantSession::new(config);
        session.begin_send("hi", None).unwrap();
        assert!(!session.on_selection_changed());
        session.complete(Ok(InferenceReply::Generated("hello".to_string())));
        assert!(session.on_selection_changed());
        assert_eq!(session.transcript().len(), 1);
    }

    #[tokio::test]
    async fn test_each_reply_keeps_its_own_selection() {
        let backend = ScriptedBackend::new();
        backend
            .push(Ok(InferenceReply::Choice("<h1>Tea</h1>".to_string())))
            .push(Ok(InferenceReply::Choice("<strong>keep</strong>".to_string())));
        let mut doc = Document::with_content("<p>keep this paragraph</p>");
        let mut session = AssistantSession::default();

        session.send(&backend, "write a blog about tea", None).await.unwrap();
        let keep = Selection::capture("keep", &doc).unwrap();
        session.send(&backend, "bold it", Some(&keep)).await.unwrap();
        assert_eq!(session.request_selection(), None);

        let messages = session.transcript().messages();
        let generated = messages[2].patch().unwrap();
        let edited = messages[4].patch().unwrap();
        assert_eq!(generated, Patch::new("<h1>Tea</h1>", None));
        assert_eq!(edited, Patch::new("<strong>keep</strong>", Some(keep)));

        assert_eq!(doc.apply(&generated), Ok(Applied::Appended));
        assert_eq!(doc.content(), "<p>keep this paragraph</p>\n\n<h1>Tea</h1>");
        assert_eq!(doc.apply(&edited), Ok(Applied::Replaced { relocated: false }));
        assert_eq!(
            doc.content(),
            "<p><strong>keep</strong> this paragraph</p>\n\n<h1>Tea</h1>"
        );
    }

    #[test]
    fn test_set_config_applies_to_next_request() {
        let mut session = AssistantSession::default();
        session.set_config(AssistantConfig {
            max_tokens: 64,
            reset_on_selection_change: true,
            ..AssistantConfig::default()
        });

        let request = session.begin_send("hi", None).unwrap();
        assert_eq!(request.max_tokens, 64);
        session.complete(Ok(InferenceReply::Generated("hello".to_string())));
        assert!(session.on_selection_changed());
    }
}
