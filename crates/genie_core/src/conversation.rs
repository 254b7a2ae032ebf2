use chrono::{DateTime, Utc};

pub type MessageId = u64;

/// First message of a fresh session.
pub const GREETING: &str = "Hi! I'm your web page generator assistant. Tell me what kind of website you'd like to create and I'll generate the HTML, CSS, and JavaScript for you. The live preview updates as we go.";

/// First message after the chat has been cleared.
pub const CLEARED_GREETING: &str =
    "Chat cleared! Tell me what kind of website you'd like to create.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Bot,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageStatus {
    Normal,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: MessageId,
    pub role: Role,
    pub text: String,
    pub status: MessageStatus,
    pub created_at: DateTime<Utc>,
}

impl Message {
    pub fn is_error(&self) -> bool {
        self.status == MessageStatus::Error
    }
}

/// Append-only chat transcript. Ids are assigned here and never reused, even
/// across [`ConversationStore::clear`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationStore {
    messages: Vec<Message>,
    next_id: MessageId,
}

impl ConversationStore {
    pub fn new(greeting: &str, at: DateTime<Utc>) -> Self {
        let mut store = Self {
            messages: Vec::new(),
            next_id: 1,
        };
        store.append(Role::Bot, greeting, MessageStatus::Normal, at);
        store
    }

    pub fn append(
        &mut self,
        role: Role,
        text: impl Into<String>,
        status: MessageStatus,
        at: DateTime<Utc>,
    ) -> MessageId {
        let id = self.next_id;
        self.next_id += 1;
        self.messages.push(Message {
            id,
            role,
            text: text.into(),
            status,
            created_at: at,
        });
        id
    }

    /// Replace the whole log with a single greeting.
    pub fn clear(&mut self, greeting: &str, at: DateTime<Utc>) {
        self.messages.clear();
        self.append(Role::Bot, greeting, MessageStatus::Normal, at);
    }

    pub fn all(&self) -> &[Message] {
        &self.messages
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
