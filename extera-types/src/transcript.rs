use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One turn of the caller-supplied conversation.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct TranscriptMessage {
    pub role: String,
    pub content: String,
}

/// Render a transcript as one `role: content` line per message.
///
/// Order is conversation order and is preserved verbatim; no reordering,
/// no deduplication, no trailing separator.
pub fn format_transcript(transcript: &[TranscriptMessage]) -> String {
    transcript
        .iter()
        .map(|message| format!("{}: {}", message.role, message.content))
        .collect::<Vec<_>>()
        .join("\n")
}
