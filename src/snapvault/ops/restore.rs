use crate::error::{Result, VaultError};
use crate::index;
use crate::model::{VersionEntry, VersionStatus};
use crate::ops::{OpMessage, OpResult};
use crate::paths::DELETED_DIR;
use crate::vault::Vault;
use std::fs;

/// Moves a version from `deleted/` back into `history/` and marks its entry
/// active again. When the index has no matching entry (file present but
/// metadata lost), a fresh entry is synthesized with note `"restored"`.
pub fn run(vault: &Vault, basename: &str) -> Result<OpResult> {
    let layout = vault.layout();
    let src = layout.deleted_dir()?.join(basename);
    if !src.is_file() {
        return Err(VaultError::NotFound {
            dir: DELETED_DIR,
            name: basename.to_string(),
        });
    }
    let dst = layout.history_dir()?.join(basename);

    let _guard = vault.guard();
    fs::rename(&src, &dst)?;

    let mut entries = index::load(layout)?;
    let mut result = OpResult::default();
    if let Some(entry) = entries.iter_mut().find(|e| e.file == basename) {
        entry.status = VersionStatus::Active;
        result.affected.push(entry.clone());
    } else {
        let size_mb = fs::metadata(&dst)
            .ok()
            .map(|m| (m.len() as f64 / (1024.0 * 1024.0) * 100.0).round() / 100.0);
        let entry = VersionEntry::new(
            basename.to_string(),
            size_mb,
            "restored",
            basename.ends_with(".gz"),
        );
        result.affected.push(entry.clone());
        entries.push(entry);
    }
    index::save(layout, &entries)?;

    result.add_message(OpMessage::success(format!(
        "Restored {} into history/",
        basename
    )));
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::delete;
    use std::path::Path;

    fn vault_with_version(name: &str) -> (tempfile::TempDir, Vault) {
        let root = tempfile::tempdir().unwrap();
        let vault = Vault::open(Some(Path::new("scene.blend")), root.path()).unwrap();
        let path = vault.layout().history_dir().unwrap().join(name);
        fs::write(&path, b"version bytes").unwrap();
        index::register(vault.layout(), &path, "auto", false).unwrap();
        (root, vault)
    }

    #[test]
    fn delete_then_restore_roundtrips_content_and_status() {
        let (_root, vault) = vault_with_version("v1.blend");

        delete::run(&vault, "v1.blend").unwrap();
        run(&vault, "v1.blend").unwrap();

        let restored = vault.layout().history_dir().unwrap().join("v1.blend");
        assert_eq!(fs::read(&restored).unwrap(), b"version bytes");

        let entries = index::load(vault.layout()).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].status, VersionStatus::Active);
    }

    #[test]
    fn restore_without_entry_synthesizes_one() {
        let root = tempfile::tempdir().unwrap();
        let vault = Vault::open(Some(Path::new("scene.blend")), root.path()).unwrap();
        let orphan = vault.layout().deleted_dir().unwrap().join("lost.blend.gz");
        fs::write(&orphan, b"gz bytes").unwrap();

        let result = run(&vault, "lost.blend.gz").unwrap();
        assert_eq!(result.affected.len(), 1);
        assert_eq!(result.affected[0].note, "restored");
        assert!(result.affected[0].compressed);

        let entries = index::load(vault.layout()).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].status, VersionStatus::Active);
    }

    #[test]
    fn restore_missing_file_fails() {
        let (_root, vault) = vault_with_version("v1.blend");
        let err = run(&vault, "v1.blend").unwrap_err();
        assert!(matches!(err, VaultError::NotFound { .. }));
    }
}
