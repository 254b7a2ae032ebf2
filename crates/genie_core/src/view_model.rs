use chrono::{DateTime, Utc};

use crate::conversation::{Message, MessageId, MessageStatus, Role};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub messages: Vec<MessageView>,
    /// A turn is outstanding; input is disabled.
    pub busy: bool,
    /// The last turn failed and nothing has cleared the error since.
    pub connection_error: bool,
    pub endpoint: String,
    pub copy_success: bool,
    pub preview_is_placeholder: bool,
    pub should_quit: bool,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageView {
    pub id: MessageId,
    pub role: Role,
    pub text: String,
    pub is_error: bool,
    pub created_at: DateTime<Utc>,
}

impl From<&Message> for MessageView {
    fn from(message: &Message) -> Self {
        Self {
            id: message.id,
            role: message.role,
            text: message.text.clone(),
            is_error: message.status == MessageStatus::Error,
            created_at: message.created_at,
        }
    }
}
