use crate::error::Result;
use crate::index;
use crate::ops::OpResult;
use crate::vault::Vault;

/// Lists version entries in index order. Reads take the lock too: the index
/// is rewritten wholesale, so an unguarded read can observe a half-written
/// document.
pub fn run(vault: &Vault, include_deleted: bool) -> Result<OpResult> {
    let entries = {
        let _guard = vault.guard();
        index::list(vault.layout(), include_deleted)?
    };
    Ok(OpResult::default().with_listed(entries))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::VersionStatus;
    use std::fs;
    use std::path::Path;

    #[test]
    fn listing_respects_include_deleted() {
        let root = tempfile::tempdir().unwrap();
        let vault = Vault::open(Some(Path::new("scene.blend")), root.path()).unwrap();
        let history = vault.layout().history_dir().unwrap();

        for name in ["a.blend", "b.blend"] {
            let path = history.join(name);
            fs::write(&path, b"x").unwrap();
            index::register(vault.layout(), &path, "auto", false).unwrap();
        }
        let mut entries = index::load(vault.layout()).unwrap();
        entries[0].status = VersionStatus::Deleted;
        index::save(vault.layout(), &entries).unwrap();

        assert_eq!(run(&vault, false).unwrap().listed.len(), 1);
        assert_eq!(run(&vault, true).unwrap().listed.len(), 2);
    }
}
