//! Request payload construction.

use crate::inference::WireMessage;
use crate::selection::Selection;
use crate::transcript::{Role, Transcript};

/// System instruction prepended when the author is editing a selection.
pub fn editing_instruction(selected: &str, instruction: &str) -> String {
    format!(
        "You are a writing assistant editing part of a blog post.\n\
         The author selected this text:\n\
         \"\"\"\n{selected}\n\"\"\"\n\
         The author's instruction: {instruction}\n\
         Reply with the edited text only, as HTML using simple tags \
         (p, h1-h3, strong, em, ul, ol, li, blockquote, a), so it can replace \
         the selection directly. Do not add commentary before or after it."
    )
}

/// Map the transcript to wire messages, prefixed with an editing
/// instruction when a selection is active.
pub fn build_messages(
    transcript: &Transcript,
    selection: Option<&Selection>,
    instruction: &str,
) -> Vec<WireMessage> {
    let mut messages = Vec::with_capacity(transcript.len() + 1);
    if let Some(selection) = selection {
        messages.push(WireMessage {
            role: Role::System,
            content: editing_instruction(selection.text(), instruction),
        });
    }
    messages.extend(transcript.messages().iter().map(|message| WireMessage {
        role: message.role,
        content: message.content.clone(),
    }));
    messages
}
