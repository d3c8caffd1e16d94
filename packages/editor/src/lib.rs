//! # Editor core for WriteFlow
//!
//! Everything between the browser and the model that does not depend on a UI
//! toolkit: the sanitizer guarding the editable surface, the surface's sync
//! rules, selection snapshots, the patch applicator that merges assistant
//! actions into the post, and the assistant session state machine.
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`sanitize`] | Allow-list HTML cleaner for pasted and generated markup |
//! | [`surface`] | When to write into / read from the contenteditable element |
//! | [`selection`] | Snapshots of highlighted text against a document version |
//! | [`patch`] | Replace-or-append merge of an action into the document |
//! | [`session`] | `Idle` / `AwaitingResponse` conversation state machine |
//! | [`inference`] | Request/reply wire types and the backend trait |

pub mod config;
pub mod document;
pub mod inference;
pub mod patch;
pub mod prompt;
pub mod sanitize;
pub mod selection;
pub mod session;
pub mod surface;
pub mod templates;
pub mod transcript;

pub use config::{AssistantConfig, WriteFlowConfig};
pub use document::Document;
pub use inference::{
    ChatRequest, InferenceBackend, InferenceError, InferenceReply, ScriptedBackend, WireMessage,
};
pub use patch::{apply_action, Applied, Patch, PatchError};
pub use sanitize::sanitize;
pub use selection::{Selection, SelectionChange, SelectionTracker};
pub use session::{AssistantSession, CredentialState, Outcome, SendRejected, SessionState};
pub use surface::{ClipboardData, EditableSurface, SurfaceState};
pub use transcript::{Message, Role, Transcript};
