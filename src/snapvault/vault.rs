use crate::error::Result;
use crate::paths::ProjectLayout;
use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Per-project handle shared between the foreground actor and background
/// maintenance workers.
///
/// The index file is read-modify-written as a whole document, so an
/// unguarded writer can silently discard a concurrent registration
/// (last-writer-wins). Every load-mutate-save sequence must therefore run
/// while holding the vault's guard; the operations in [`crate::ops`] all do.
pub struct Vault {
    layout: ProjectLayout,
    index_lock: Mutex<()>,
}

impl Vault {
    /// Opens (creating if needed) the project directory for `document_path`
    /// under `root_dir`.
    pub fn open(document_path: Option<&Path>, root_dir: &Path) -> Result<Self> {
        Ok(Self::with_layout(ProjectLayout::resolve(
            document_path,
            root_dir,
        )?))
    }

    pub fn with_layout(layout: ProjectLayout) -> Self {
        Self {
            layout,
            index_lock: Mutex::new(()),
        }
    }

    pub fn layout(&self) -> &ProjectLayout {
        &self.layout
    }

    /// The index critical section. A poisoned lock means a worker panicked
    /// mid-operation; the on-disk index is still a whole, parseable document
    /// (writes are whole-file), so the guard is recovered rather than
    /// propagating the poison.
    pub(crate) fn guard(&self) -> MutexGuard<'_, ()> {
        self.index_lock.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_creates_layout() {
        let root = tempfile::tempdir().unwrap();
        let vault = Vault::open(Some(Path::new("a scene.blend")), root.path()).unwrap();
        assert_eq!(vault.layout().identity(), "a_scene");
        assert!(vault.layout().dir().is_dir());
    }
}
