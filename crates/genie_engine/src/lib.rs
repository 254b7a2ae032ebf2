//! PageGenie engine: agent gateway, IO thread and document output.
mod clipboard;
mod engine;
mod export;
mod gateway;
mod inspect;
mod persist;
mod types;

pub use clipboard::{copy_with_fallback, ClipboardError, ClipboardSink, CopyMethod, SystemClipboard};
pub use engine::EngineHandle;
pub use export::{
    export_document, write_preview, ExportError, ExportSummary, EXPORT_FILENAME, EXPORT_MIME,
    PREVIEW_FILENAME,
};
pub use gateway::{AgentGateway, GatewaySettings, ReqwestGateway};
pub use inspect::document_title;
pub use persist::{OutputDir, PersistError};
pub use types::{
    AgentResponse, AgentStatus, EngineEvent, FailureKind, GatewayError, TurnId, SUCCESS_STATUS,
};
