use std::path::{Path, PathBuf};

use crate::inspect::document_title;
use crate::persist::{OutputDir, PersistError};

/// File name of the downloadable document.
pub const EXPORT_FILENAME: &str = "generated-website.html";
/// MIME type of exported documents.
pub const EXPORT_MIME: &str = "text/html";
/// File the live preview is rendered into.
pub const PREVIEW_FILENAME: &str = "preview.html";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub path: PathBuf,
    pub mime: &'static str,
    pub bytes: u64,
    pub title: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("persist error: {0}")]
    Persist(#[from] PersistError),
}

/// Write `html` byte-for-byte to [`EXPORT_FILENAME`] in `output_dir`.
pub fn export_document(output_dir: &Path, html: &str) -> Result<ExportSummary, ExportError> {
    write_document(output_dir, EXPORT_FILENAME, html)
}

/// Render `html` into the live preview file in `output_dir`.
pub fn write_preview(output_dir: &Path, html: &str) -> Result<ExportSummary, ExportError> {
    write_document(output_dir, PREVIEW_FILENAME, html)
}

fn write_document(
    output_dir: &Path,
    filename: &str,
    html: &str,
) -> Result<ExportSummary, ExportError> {
    let out = OutputDir::open(output_dir)?;
    let path = out.write_atomic(filename, html.as_bytes())?;
    Ok(ExportSummary {
        path,
        mime: EXPORT_MIME,
        bytes: html.len() as u64,
        title: document_title(html),
    })
}
