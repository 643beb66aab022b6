use crate::error::Result;
use crate::host::DocumentHost;
use crate::index;
use crate::ops::{OpMessage, OpResult};
use crate::vault::Vault;
use chrono::Local;
use std::fs;
use std::path::Path;

/// Saves a manual backup. The default target is `<project>/backups`; an
/// explicit target may be anywhere. Backups are registered in the index only
/// when the target directory resolves under the project directory — the user
/// picking an external location explicitly opts out of tracking.
pub fn run<H: DocumentHost>(
    vault: &Vault,
    host: &H,
    target_dir: Option<&Path>,
) -> Result<OpResult> {
    let layout = vault.layout();
    let dir = match target_dir {
        Some(d) => {
            fs::create_dir_all(d)?;
            d.to_path_buf()
        }
        None => layout.backups_dir()?,
    };
    let filename = layout.backup_filename(&Local::now().naive_local());
    let target = dir.join(&filename);

    let mut result = OpResult::default().with_paths(vec![target.clone()]);
    if layout.contains(&dir) {
        // Tracked copies hold the index lock from copy through registration,
        // same as snapshots: maintenance must not see one without its entry.
        let entry = {
            let _guard = vault.guard();
            host.save_copy(&target)?;
            index::register(layout, &target, "manual", false)?
        };
        result.add_message(OpMessage::success(format!(
            "Backup saved and indexed: {}",
            entry.file
        )));
        result.affected.push(entry);
    } else {
        host.save_copy(&target)?;
        result.add_message(OpMessage::success(format!("Backup saved: {}", filename)));
        result.add_message(OpMessage::info(
            "Backup is outside the project directory; not tracked in the index.",
        ));
    }
    Ok(result)
}
