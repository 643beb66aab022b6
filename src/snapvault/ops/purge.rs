use crate::error::Result;
use crate::index;
use crate::model::VersionStatus;
use crate::ops::{OpMessage, OpResult};
use crate::vault::Vault;
use std::fs;
use std::time::{Duration, SystemTime};
use tracing::warn;

/// Permanently removes files in `deleted/` whose modification time is more
/// than `days` days old and flips their index entries to purged. Per-file
/// failures become warnings and the batch continues.
///
/// `days == 0` is not treated specially here: it purges everything older
/// than "now". Callers that mean "purge disabled" must not call at all —
/// [`crate::api::VaultApi::purge_older_than`] is that guard.
pub fn run(vault: &Vault, days: u64) -> Result<OpResult> {
    let layout = vault.layout();
    let deleted = layout.deleted_dir()?;
    let cutoff = Duration::from_secs(days.saturating_mul(86_400));
    let now = SystemTime::now();

    let mut result = OpResult::default();
    let mut removed = 0usize;
    for dir_entry in fs::read_dir(&deleted)? {
        let dir_entry = dir_entry?;
        let path = dir_entry.path();
        if !path.is_file() {
            continue;
        }
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_string();
        let age = dir_entry
            .metadata()
            .and_then(|m| m.modified())
            .ok()
            .and_then(|mtime| now.duration_since(mtime).ok());
        let Some(age) = age else { continue };
        if age <= cutoff {
            continue;
        }
        match fs::remove_file(&path) {
            Ok(()) => {
                // The entry flips as soon as its file is gone, one file at a
                // time: an interrupted pass strands at most one deleted entry
                // without a file, which restore reports as not found.
                let _guard = vault.guard();
                let mut entries = index::load(layout)?;
                if let Some(entry) = entries
                    .iter_mut()
                    .find(|e| e.file == name && e.status == VersionStatus::Deleted)
                {
                    entry.status = VersionStatus::Purged;
                    result.affected.push(entry.clone());
                }
                index::save(layout, &entries)?;
                result.paths.push(path);
                removed += 1;
            }
            Err(e) => {
                warn!(file = %path.display(), error = %e, "purge failed, skipping");
                result.add_message(OpMessage::warning(format!(
                    "Purge failed for {}: {}",
                    name, e
                )));
            }
        }
    }

    result.add_message(OpMessage::info(format!(
        "Purged {} file(s) from deleted/",
        removed
    )));
    Ok(result)
}
