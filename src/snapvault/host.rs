//! The host seam: the single capability snapvault needs from whatever owns
//! the live document.
//!
//! The original consumer is an editor that must write the copy from its own
//! main thread; the production CLI host is a plain file on disk. Abstracting
//! the copy behind [`DocumentHost`] keeps the engine testable and keeps the
//! threading rule in one place.

use crate::error::{Result, VaultError};
use std::fs;
use std::path::{Path, PathBuf};

/// "Save the current document as a copy at path P", synchronously.
///
/// `save_copy` is invoked from whichever thread drives the snapshot — under
/// [`crate::controller::AutosaveController`] that is the scheduler thread.
/// Implementations whose document is owned by a specific execution context
/// must dispatch the copy back to that context and block until it completes.
/// Only post-copy file operations (compression, purge) run on worker threads.
pub trait DocumentHost {
    /// Path of the live document, if it has been saved anywhere yet.
    fn document_path(&self) -> Option<&Path>;

    /// Produce a copy of the current document at `target`, or fail having
    /// produced nothing.
    fn save_copy(&self, target: &Path) -> Result<()>;
}

/// Host for documents that are ordinary files: a copy is a byte-for-byte
/// `fs::copy` of the tracked file.
#[derive(Debug, Clone)]
pub struct FileCopyHost {
    source: Option<PathBuf>,
}

impl FileCopyHost {
    pub fn new(source: Option<PathBuf>) -> Self {
        Self { source }
    }
}

impl DocumentHost for FileCopyHost {
    fn document_path(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    fn save_copy(&self, target: &Path) -> Result<()> {
        let Some(source) = &self.source else {
            return Err(VaultError::Copy {
                path: target.to_path_buf(),
                reason: "no document to copy (unsaved project)".to_string(),
            });
        };
        fs::copy(source, target).map_err(|e| VaultError::Copy {
            path: target.to_path_buf(),
            reason: e.to_string(),
        })?;
        if !target.exists() {
            return Err(VaultError::Copy {
                path: target.to_path_buf(),
                reason: "copy produced no file".to_string(),
            });
        }
        Ok(())
    }
}
