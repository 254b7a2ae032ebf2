//! PageGenie core: response parsing pipeline and the pure chat/preview state machine.
mod classify;
mod conversation;
mod effect;
mod extract;
mod msg;
mod pipeline;
mod preview;
mod sanitize;
mod state;
mod update;
mod view_model;

pub use classify::{classify, Classification};
pub use conversation::{
    ConversationStore, Message, MessageId, MessageStatus, Role, CLEARED_GREETING, GREETING,
};
pub use effect::Effect;
pub use extract::extract;
pub use msg::Msg;
pub use pipeline::{parse_response, ParsedResponse, INCOMPLETE_DOCUMENT_REPLY};
pub use preview::{ExtractedDocument, PreviewState, PLACEHOLDER_DOCUMENT};
pub use sanitize::{
    sanitize, to_hard_breaks, ParseSettings, DEFAULT_MIN_CHAT_CHARS, DOCUMENT_ONLY_REPLY,
    EMPTY_REPLY, FULL_DOCUMENT_REPLY,
};
pub use state::{AppState, Notice, PreviewInfo, TurnId, COPY_FEEDBACK_MS, DEFAULT_ENDPOINT};
pub use update::{error_reply, update};
pub use view_model::{AppViewModel, MessageView};
