use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("output directory {path:?} unusable: {reason}")]
    OutputDir { path: PathBuf, reason: String },
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// A directory that generated documents are written into.
#[derive(Debug, Clone)]
pub struct OutputDir {
    dir: PathBuf,
}

impl OutputDir {
    /// Use `dir`, creating it if missing. Fails if it is a file or not writable.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, PersistError> {
        let dir = dir.into();
        let unusable = |reason: String| PersistError::OutputDir {
            path: dir.clone(),
            reason,
        };
        if dir.exists() {
            let meta = fs::metadata(&dir).map_err(|e| unusable(e.to_string()))?;
            if !meta.is_dir() {
                return Err(unusable("path is not a directory".into()));
            }
        } else {
            fs::create_dir_all(&dir).map_err(|e| unusable(e.to_string()))?;
        }
        // Writability probe.
        NamedTempFile::new_in(&dir).map_err(|e| unusable(e.to_string()))?;
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        &self.dir
    }

    /// Write `content` to `{dir}/{filename}` via a temp file and rename, so
    /// readers never observe a half-written document.
    pub fn write_atomic(&self, filename: &str, content: &[u8]) -> Result<PathBuf, PersistError> {
        let target = self.dir.join(filename);
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(content)?;
        tmp.flush()?;
        tmp.as_file_mut().sync_all()?;
        tmp.persist(&target).map_err(|e| PersistError::Io(e.error))?;
        Ok(target)
    }
}
