use chrono::{DateTime, TimeDelta, Utc};

use crate::conversation::{ConversationStore, MessageId, MessageStatus, Role, GREETING};
use crate::preview::{ExtractedDocument, PreviewState};
use crate::sanitize::ParseSettings;
use crate::view_model::{AppViewModel, MessageView};

pub type TurnId = u64;

/// Service endpoint used when none is configured.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8000";

/// How long the "copied" indicator stays on, in milliseconds.
pub const COPY_FEEDBACK_MS: i64 = 2_000;

/// Where the live preview was written and what it is called.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewInfo {
    pub path: String,
    pub title: Option<String>,
}

/// One-shot feedback for the front-end, consumed with [`AppState::take_notice`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// A prompt or clear arrived while a turn was outstanding.
    Busy,
    EndpointChanged(String),
    PreviewRendered(PreviewInfo),
    PreviewFailed(String),
    Copied,
    CopyFailed(String),
    Exported(String),
    ExportFailed(String),
}

/// The single owner of all mutable front-end state. Only [`crate::update`]
/// mutates it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    conversation: ConversationStore,
    preview: PreviewState,
    settings: ParseSettings,
    endpoint: String,
    input: String,
    in_flight: Option<TurnId>,
    next_turn: TurnId,
    last_error: Option<String>,
    copied_at: Option<DateTime<Utc>>,
    notice: Option<Notice>,
    quit: bool,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(
            DEFAULT_ENDPOINT,
            ParseSettings::default(),
            DateTime::<Utc>::default(),
        )
    }
}

impl AppState {
    pub fn new(endpoint: impl Into<String>, settings: ParseSettings, now: DateTime<Utc>) -> Self {
        Self {
            conversation: ConversationStore::new(GREETING, now),
            preview: PreviewState::new(),
            settings,
            endpoint: endpoint.into(),
            input: String::new(),
            in_flight: None,
            next_turn: 1,
            last_error: None,
            copied_at: None,
            notice: None,
            quit: false,
            dirty: true,
        }
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            messages: self
                .conversation
                .all()
                .iter()
                .map(MessageView::from)
                .collect(),
            busy: self.is_busy(),
            connection_error: self.last_error.is_some(),
            endpoint: self.endpoint.clone(),
            copy_success: self.copied_at.is_some(),
            preview_is_placeholder: self.preview.is_placeholder(),
            should_quit: self.quit,
            dirty: self.dirty,
        }
    }

    pub fn conversation(&self) -> &ConversationStore {
        &self.conversation
    }

    pub fn preview(&self) -> &PreviewState {
        &self.preview
    }

    pub fn settings(&self) -> &ParseSettings {
        &self.settings
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn in_flight(&self) -> Option<TurnId> {
        self.in_flight
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Returns whether a render is pending and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn set_notice(&mut self, notice: Notice) {
        self.notice = Some(notice);
    }

    pub(crate) fn set_input(&mut self, text: String) {
        self.input = text;
    }

    pub(crate) fn take_input(&mut self) -> String {
        std::mem::take(&mut self.input)
    }

    /// Records the user message and marks a new turn as outstanding.
    pub(crate) fn begin_turn(&mut self, prompt: &str, at: DateTime<Utc>) -> TurnId {
        let turn_id = self.next_turn;
        self.next_turn += 1;
        self.conversation
            .append(Role::User, prompt, MessageStatus::Normal, at);
        self.in_flight = Some(turn_id);
        self.last_error = None;
        self.mark_dirty();
        turn_id
    }

    /// Ends the outstanding turn if it is `turn_id`. Stale ids are rejected.
    pub(crate) fn finish_turn(&mut self, turn_id: TurnId) -> bool {
        if self.in_flight == Some(turn_id) {
            self.in_flight = None;
            self.mark_dirty();
            true
        } else {
            false
        }
    }

    pub(crate) fn append_bot(
        &mut self,
        text: impl Into<String>,
        status: MessageStatus,
        at: DateTime<Utc>,
    ) -> MessageId {
        self.mark_dirty();
        self.conversation.append(Role::Bot, text, status, at)
    }

    pub(crate) fn record_error(&mut self, reason: String) {
        self.last_error = Some(reason);
    }

    pub(crate) fn clear_error(&mut self) {
        self.last_error = None;
    }

    pub(crate) fn clear_conversation(&mut self, greeting: &str, at: DateTime<Utc>) {
        self.conversation.clear(greeting, at);
        self.mark_dirty();
    }

    pub(crate) fn update_preview(&mut self, document: ExtractedDocument) {
        self.preview.update(document);
        self.mark_dirty();
    }

    pub(crate) fn set_endpoint(&mut self, endpoint: String) {
        self.endpoint = endpoint;
        self.mark_dirty();
    }

    pub(crate) fn mark_copied(&mut self, at: DateTime<Utc>) {
        self.copied_at = Some(at);
        self.mark_dirty();
    }

    /// Drops the copy indicator once [`COPY_FEEDBACK_MS`] have elapsed.
    pub(crate) fn expire_copy_feedback(&mut self, now: DateTime<Utc>) {
        if let Some(copied_at) = self.copied_at {
            if now - copied_at >= TimeDelta::milliseconds(COPY_FEEDBACK_MS) {
                self.copied_at = None;
                self.mark_dirty();
            }
        }
    }

    pub(crate) fn request_quit(&mut self) {
        self.quit = true;
        self.mark_dirty();
    }
}
