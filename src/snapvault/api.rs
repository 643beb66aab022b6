//! The facade hosts talk to.
//!
//! [`VaultApi`] dispatches to the operation modules in [`crate::ops`] and
//! returns structured [`OpResult`] values; it performs no terminal I/O and
//! makes no presentation decisions. It is generic over [`DocumentHost`] so
//! the engine can be driven by any host that can produce a document copy.

use crate::error::Result;
use crate::host::DocumentHost;
use crate::ops::{self, OpMessage, OpResult};
use crate::vault::Vault;
use std::path::Path;
use std::sync::Arc;

pub struct VaultApi<H: DocumentHost> {
    vault: Arc<Vault>,
    host: H,
}

impl<H: DocumentHost> VaultApi<H> {
    pub fn new(vault: Arc<Vault>, host: H) -> Self {
        Self { vault, host }
    }

    /// Opens the project directory derived from the host's document path.
    pub fn open(host: H, root_dir: &Path) -> Result<Self> {
        let vault = Arc::new(Vault::open(host.document_path(), root_dir)?);
        Ok(Self { vault, host })
    }

    pub fn create_snapshot(&self, note: &str) -> Result<OpResult> {
        ops::snapshot::run(&self.vault, &self.host, note)
    }

    pub fn manual_backup(&self, target_dir: Option<&Path>) -> Result<OpResult> {
        ops::backup::run(&self.vault, &self.host, target_dir)
    }

    pub fn list_versions(&self, include_deleted: bool) -> Result<OpResult> {
        ops::list::run(&self.vault, include_deleted)
    }

    pub fn move_to_deleted(&self, basename: &str) -> Result<OpResult> {
        ops::delete::run(&self.vault, basename)
    }

    pub fn restore_deleted(&self, basename: &str) -> Result<OpResult> {
        ops::restore::run(&self.vault, basename)
    }

    pub fn compress_old(&self, keep_uncompressed: usize) -> Result<OpResult> {
        ops::compress::run(&self.vault, keep_uncompressed)
    }

    /// Retention entry point for deleted versions. `days == 0` means "purge
    /// disabled" at this layer and does nothing; the underlying engine would
    /// read 0 as "purge everything older than now".
    pub fn purge_older_than(&self, days: u64) -> Result<OpResult> {
        if days == 0 {
            let mut result = OpResult::default();
            result.add_message(OpMessage::info("Purge is disabled (0 days)."));
            return Ok(result);
        }
        ops::purge::run(&self.vault, days)
    }

    pub fn vault(&self) -> &Arc<Vault> {
        &self.vault
    }

    pub fn host(&self) -> &H {
        &self.host
    }
}
