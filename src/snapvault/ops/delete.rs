use crate::error::{Result, VaultError};
use crate::index;
use crate::model::VersionStatus;
use crate::ops::{OpMessage, OpResult};
use crate::paths::HISTORY_DIR;
use crate::vault::Vault;
use std::fs;

/// Moves a version from `history/` into the `deleted/` holding area and
/// marks the matching entry deleted. Fails without mutating anything when
/// the source file is absent.
pub fn run(vault: &Vault, basename: &str) -> Result<OpResult> {
    let layout = vault.layout();
    let src = layout.history_dir()?.join(basename);
    if !src.is_file() {
        return Err(VaultError::NotFound {
            dir: HISTORY_DIR,
            name: basename.to_string(),
        });
    }
    let dst = layout.deleted_dir()?.join(basename);

    let _guard = vault.guard();
    fs::rename(&src, &dst)?;

    let mut entries = index::load(layout)?;
    let mut result = OpResult::default();
    if let Some(entry) = entries.iter_mut().find(|e| e.file == basename) {
        entry.status = VersionStatus::Deleted;
        result.affected.push(entry.clone());
    }
    index::save(layout, &entries)?;

    result.add_message(OpMessage::success(format!(
        "Moved {} to deleted/",
        basename
    )));
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
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
    fn moves_file_and_flips_status() {
        let (_root, vault) = vault_with_version("v1.blend");

        let result = run(&vault, "v1.blend").unwrap();
        assert_eq!(result.affected.len(), 1);
        assert_eq!(result.affected[0].status, VersionStatus::Deleted);

        let layout = vault.layout();
        assert!(!layout.history_dir().unwrap().join("v1.blend").exists());
        assert!(layout.deleted_dir().unwrap().join("v1.blend").exists());

        let entries = index::load(layout).unwrap();
        assert_eq!(entries[0].status, VersionStatus::Deleted);
    }

    #[test]
    fn missing_source_fails_without_mutation() {
        let (_root, vault) = vault_with_version("v1.blend");

        let err = run(&vault, "nope.blend").unwrap_err();
        assert!(matches!(err, VaultError::NotFound { .. }));

        let entries = index::load(vault.layout()).unwrap();
        assert_eq!(entries[0].status, VersionStatus::Active);
    }
}
