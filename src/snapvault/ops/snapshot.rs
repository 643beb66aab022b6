use crate::error::Result;
use crate::host::DocumentHost;
use crate::index;
use crate::ops::{OpMessage, OpResult};
use crate::vault::Vault;
use chrono::Local;

/// Creates a new version: the host writes a timestamped copy into
/// `history/`, then the copy is registered as an active entry.
///
/// The copy runs on the calling thread (see the [`DocumentHost`] contract).
/// The index lock is held across the copy and the registration: a
/// maintenance pass must never observe a copy that has landed in `history/`
/// without its entry, or it would gzip the file and leave the entry pointing
/// at a name that no longer exists.
pub fn run<H: DocumentHost>(vault: &Vault, host: &H, note: &str) -> Result<OpResult> {
    let layout = vault.layout();
    let history = layout.history_dir()?;
    let filename = layout.version_filename(&Local::now().naive_local());
    let target = history.join(&filename);

    let entry = {
        let _guard = vault.guard();
        host.save_copy(&target)?;
        index::register(layout, &target, note, false)?
    };

    let mut result = OpResult::default().with_paths(vec![target]);
    result.add_message(OpMessage::success(format!(
        "Versioned copy saved: {}",
        entry.file
    )));
    result.affected.push(entry);
    Ok(result)
}
