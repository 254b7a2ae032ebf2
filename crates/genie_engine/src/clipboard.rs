use genie_logging::{genie_debug, genie_warn};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyMethod {
    Clipboard,
    /// Selection-based fallback (X11/Wayland primary selection).
    PrimarySelection,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClipboardError {
    #[error("clipboard not available")]
    Unavailable,
    #[error("copy failed: {primary}; fallback failed: {fallback}")]
    Failed { primary: String, fallback: String },
}

pub trait ClipboardSink {
    fn copy_text(&mut self, text: &str) -> Result<CopyMethod, ClipboardError>;
}

/// The OS clipboard. Kept alive for the whole session because on Linux the
/// copied contents are served by this process.
pub struct SystemClipboard {
    clipboard: Option<arboard::Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        let clipboard = match arboard::Clipboard::new() {
            Ok(clipboard) => Some(clipboard),
            Err(err) => {
                genie_warn!("Clipboard not available: {}", err);
                None
            }
        };
        Self { clipboard }
    }
}

impl Default for SystemClipboard {
    fn default() -> Self {
        Self::new()
    }
}

impl ClipboardSink for SystemClipboard {
    fn copy_text(&mut self, text: &str) -> Result<CopyMethod, ClipboardError> {
        let Some(clipboard) = self.clipboard.as_mut() else {
            return Err(ClipboardError::Unavailable);
        };
        copy_with_fallback(
            clipboard,
            |clipboard| {
                clipboard
                    .set_text(text.to_string())
                    .map_err(|e| e.to_string())
            },
            |clipboard| set_primary_selection(clipboard, text),
        )
    }
}

#[cfg(target_os = "linux")]
fn set_primary_selection(clipboard: &mut arboard::Clipboard, text: &str) -> Result<(), String> {
    use arboard::SetExtLinux;

    clipboard
        .set()
        .clipboard(arboard::LinuxClipboardKind::Primary)
        .text(text.to_string())
        .map_err(|e| e.to_string())
}

#[cfg(not(target_os = "linux"))]
fn set_primary_selection(_clipboard: &mut arboard::Clipboard, _text: &str) -> Result<(), String> {
    Err("no selection-based fallback on this platform".to_string())
}

/// Try `primary`, then `fallback`; report both failures if neither works.
pub fn copy_with_fallback<T, P, F>(
    target: &mut T,
    primary: P,
    fallback: F,
) -> Result<CopyMethod, ClipboardError>
where
    P: FnOnce(&mut T) -> Result<(), String>,
    F: FnOnce(&mut T) -> Result<(), String>,
{
    let primary_err = match primary(target) {
        Ok(()) => return Ok(CopyMethod::Clipboard),
        Err(err) => err,
    };
    genie_debug!("clipboard copy failed ({}), trying selection", primary_err);
    match fallback(target) {
        Ok(()) => Ok(CopyMethod::PrimarySelection),
        Err(fallback_err) => Err(ClipboardError::Failed {
            primary: primary_err,
            fallback: fallback_err,
        }),
    }
}
