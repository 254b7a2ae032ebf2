use crate::TurnId;

/// Side effects requested by [`crate::update`]; executed by the front-end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Send a prompt to the agent service at `endpoint`.
    SendPrompt {
        turn_id: TurnId,
        endpoint: String,
        prompt: String,
    },
    /// Push the current preview document to the live preview.
    RenderPreview { html: String },
    /// Copy the current preview document to the clipboard.
    CopyDocument { html: String },
    /// Save the current preview document as a downloadable file.
    ExportDocument { html: String },
}
