//! The autosave loop: a per-document controller owning its enable state.
//!
//! Each tick performs the snapshot on the scheduler thread (the host copy
//! must not race mutations of the live document), then hands compression and
//! purge to a detached maintenance worker. Both sides mutate the index only
//! under the [`Vault`] mutex, so a registration overlapping a maintenance
//! pass cannot lose either mutation.

use crate::config::VaultConfig;
use crate::host::DocumentHost;
use crate::ops;
use crate::scheduler::Scheduler;
use crate::vault::Vault;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

// First snapshot shortly after enabling, then on the configured interval.
const FIRST_DELAY: Duration = Duration::from_secs(1);

pub struct AutosaveController<H> {
    vault: Arc<Vault>,
    host: H,
    config: VaultConfig,
    scheduler: Option<Scheduler>,
}

impl<H> AutosaveController<H>
where
    H: DocumentHost + Clone + Send + 'static,
{
    pub fn new(vault: Arc<Vault>, host: H, config: VaultConfig) -> Self {
        Self {
            vault,
            host,
            config,
            scheduler: None,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.scheduler.is_some()
    }

    /// Starts the autosave loop. No-op when already enabled.
    pub fn enable(&mut self) {
        if self.scheduler.is_some() {
            return;
        }
        let vault = Arc::clone(&self.vault);
        let host = self.host.clone();
        let interval = Duration::from_secs(self.config.autosave_interval_secs.max(1));
        let keep = self.config.keep_uncompressed;
        let purge_days = self.config.purge_days;

        self.scheduler = Some(Scheduler::spawn(FIRST_DELAY, move || {
            tick(&vault, &host, keep, purge_days);
            Some(interval)
        }));
    }

    /// Prevents further scheduled runs. Maintenance already in flight runs
    /// to completion on its own thread.
    pub fn disable(&mut self) {
        if let Some(scheduler) = self.scheduler.take() {
            scheduler.stop();
        }
    }

    /// One immediate autosave pass, outside the schedule. Returns the
    /// maintenance worker handle so callers can wait for it if they care.
    pub fn run_once(&self) -> JoinHandle<()> {
        tick(&self.vault, &self.host, self.config.keep_uncompressed, self.config.purge_days)
    }
}

fn tick<H: DocumentHost>(
    vault: &Arc<Vault>,
    host: &H,
    keep_uncompressed: usize,
    purge_days: u64,
) -> JoinHandle<()> {
    match ops::snapshot::run(vault, host, "auto") {
        Ok(result) => {
            for path in &result.paths {
                tracing::debug!(target = %path.display(), "autosave snapshot written");
            }
        }
        Err(e) => tracing::warn!(error = %e, "autosave snapshot failed"),
    }
    spawn_maintenance(Arc::clone(vault), keep_uncompressed, purge_days)
}

/// Compression and purge for one project, off the snapshot thread. These
/// operate only on already-finalized copies.
pub fn spawn_maintenance(
    vault: Arc<Vault>,
    keep_uncompressed: usize,
    purge_days: u64,
) -> JoinHandle<()> {
    thread::spawn(move || {
        if let Err(e) = ops::compress::run(&vault, keep_uncompressed) {
            tracing::warn!(error = %e, "background compression failed");
        }
        // purge_days == 0 means purge disabled; the engine itself has no
        // such guard, so it lives here at the call site.
        if purge_days > 0 {
            if let Err(e) = ops::purge::run(&vault, purge_days) {
                tracing::warn!(error = %e, "background purge failed");
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::FileCopyHost;
    use crate::index;
    use std::fs;

    fn setup() -> (tempfile::TempDir, Arc<Vault>, FileCopyHost) {
        let dir = tempfile::tempdir().unwrap();
        let doc = dir.path().join("scene.blend");
        fs::write(&doc, b"bytes").unwrap();
        let vault =
            Arc::new(Vault::open(Some(&doc), &dir.path().join("store")).unwrap());
        let host = FileCopyHost::new(Some(doc));
        (dir, vault, host)
    }

    #[test]
    fn run_once_snapshots_and_runs_maintenance() {
        let (_dir, vault, host) = setup();
        let controller =
            AutosaveController::new(Arc::clone(&vault), host, VaultConfig::default());

        controller.run_once().join().unwrap();

        let entries = index::load(vault.layout()).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].note, "auto");
    }

    #[test]
    fn enable_is_idempotent_and_disable_stops_the_loop() {
        let (_dir, vault, host) = setup();
        let mut config = VaultConfig::default();
        config.autosave_interval_secs = 3600;
        let mut controller = AutosaveController::new(vault, host, config);

        assert!(!controller.is_enabled());
        controller.enable();
        controller.enable();
        assert!(controller.is_enabled());
        controller.disable();
        assert!(!controller.is_enabled());
    }

    #[test]
    fn maintenance_with_purge_disabled_leaves_deleted_files() {
        let (_dir, vault, host) = setup();
        crate::ops::snapshot::run(&vault, &host, "auto").unwrap();
        let name = index::load(vault.layout()).unwrap()[0].file.clone();
        crate::ops::delete::run(&vault, &name).unwrap();

        spawn_maintenance(Arc::clone(&vault), 3, 0).join().unwrap();

        assert!(vault.layout().deleted_dir().unwrap().join(&name).exists());
    }
}
