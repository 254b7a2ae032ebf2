use std::sync::LazyLock;

use regex::Regex;

use crate::classify::{Classification, FENCED_HTML, INLINE_DOCUMENT};

/// Shown instead of the markup when the whole response is a document.
pub const FULL_DOCUMENT_REPLY: &str =
    "I've created your website! Open the live preview to see how it looks.";

/// Shown when removing the embedded document leaves nothing worth reading.
pub const DOCUMENT_ONLY_REPLY: &str =
    "I've generated your website! Check out the preview to see how it looks.";

/// Shown when the agent answered with no text at all.
pub const EMPTY_REPLY: &str = "The agent sent back an empty response.";

/// Default for [`ParseSettings::min_chat_chars`].
pub const DEFAULT_MIN_CHAT_CHARS: usize = 10;

static BLANK_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\s*\n").expect("blank run pattern"));

/// Tunables for turning agent responses into chat text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseSettings {
    /// Leftover commentary shorter than this many characters is replaced by
    /// [`DOCUMENT_ONLY_REPLY`].
    pub min_chat_chars: usize,
}

impl Default for ParseSettings {
    fn default() -> Self {
        Self {
            min_chat_chars: DEFAULT_MIN_CHAT_CHARS,
        }
    }
}

/// Produce the human-readable part of a response. Never returns an empty string.
pub fn sanitize(text: &str, classification: Classification, settings: &ParseSettings) -> String {
    match classification {
        Classification::FullDocument => FULL_DOCUMENT_REPLY.to_string(),
        Classification::FencedBlock | Classification::InlineDocument => {
            let without_fences = FENCED_HTML.replace_all(text, "");
            let without_documents = INLINE_DOCUMENT.replace_all(&without_fences, "");
            let collapsed = BLANK_RUN.replace_all(&without_documents, "\n");
            let remaining = collapsed.trim();
            if remaining.chars().count() < settings.min_chat_chars {
                DOCUMENT_ONLY_REPLY.to_string()
            } else {
                remaining.to_string()
            }
        }
        Classification::PlainText => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                EMPTY_REPLY.to_string()
            } else {
                trimmed.to_string()
            }
        }
    }
}

/// Encode every line break as a markdown hard break (two trailing spaces).
pub fn to_hard_breaks(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\n', "  \n")
}
