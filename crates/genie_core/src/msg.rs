use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the prompt input.
    InputChanged(String),
    /// User submitted the current prompt input.
    PromptSubmitted { at: DateTime<Utc> },
    /// The agent answered a turn with response text.
    AgentReplied {
        turn_id: crate::TurnId,
        text: String,
        at: DateTime<Utc>,
    },
    /// The agent call for a turn failed (transport or non-success status).
    AgentFailed {
        turn_id: crate::TurnId,
        reason: String,
        at: DateTime<Utc>,
    },
    /// User asked to clear the chat.
    ClearClicked { at: DateTime<Utc> },
    /// User entered a new service endpoint.
    EndpointChanged(String),
    /// User asked to re-render the preview.
    PreviewRequested,
    /// The live preview was written.
    PreviewRendered(Result<crate::PreviewInfo, String>),
    /// User clicked Copy.
    CopyClicked,
    /// Clipboard copy finished.
    CopyFinished {
        result: Result<(), String>,
        at: DateTime<Utc>,
    },
    /// User clicked Download.
    DownloadClicked,
    /// Export finished; `Ok` carries the written path.
    ExportFinished(Result<String, String>),
    /// User asked to leave.
    QuitRequested,
    /// Periodic tick for time-based indicators.
    Tick { at: DateTime<Utc> },
    /// Fallback for placeholder wiring.
    NoOp,
}
