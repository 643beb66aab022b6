use crate::model::VersionEntry;
use std::path::PathBuf;

pub mod backup;
pub mod compress;
pub mod delete;
pub mod list;
pub mod purge;
pub mod restore;
pub mod snapshot;

#[derive(Debug, Clone)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A short human-readable status line, distinct from debug-level tracing.
#[derive(Debug, Clone)]
pub struct OpMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl OpMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// Structured outcome of an operation, for the host's UI layer to render.
#[derive(Debug, Default)]
pub struct OpResult {
    /// Entries created or mutated by the operation.
    pub affected: Vec<VersionEntry>,
    /// Entries returned by a listing operation, in index order.
    pub listed: Vec<VersionEntry>,
    /// Filesystem paths touched (snapshot targets, purged files).
    pub paths: Vec<PathBuf>,
    pub messages: Vec<OpMessage>,
}

impl OpResult {
    pub fn add_message(&mut self, message: OpMessage) {
        self.messages.push(message);
    }

    pub fn with_listed(mut self, entries: Vec<VersionEntry>) -> Self {
        self.listed = entries;
        self
    }

    pub fn with_paths(mut self, paths: Vec<PathBuf>) -> Self {
        self.paths = paths;
        self
    }
}
