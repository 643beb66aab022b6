//! The version index: one JSON document per project, rewritten wholesale on
//! every mutation.
//!
//! The index is the single source of truth for entry *status*; the filesystem
//! holds the content. A missing index means an empty history. An unparseable
//! index is treated the same way: the metadata is reconstructable state and
//! losing it must never take the underlying files with it.
//!
//! Callers that mutate the index concurrently must serialize their
//! load-mutate-save sequences through the [`crate::vault::Vault`] mutex.

use crate::error::Result;
use crate::model::{IndexDocument, VersionEntry, VersionStatus};
use crate::paths::ProjectLayout;
use std::fs;
use std::path::Path;
use tracing::warn;

pub fn load(layout: &ProjectLayout) -> Result<Vec<VersionEntry>> {
    let path = layout.index_file();
    if !path.exists() {
        return Ok(Vec::new());
    }
    let raw = fs::read_to_string(&path)?;
    match serde_json::from_str::<IndexDocument>(&raw) {
        Ok(doc) => Ok(doc.versions),
        Err(e) => {
            warn!(index = %path.display(), error = %e, "unparseable index, treating history as empty");
            Ok(Vec::new())
        }
    }
}

pub fn save(layout: &ProjectLayout, entries: &[VersionEntry]) -> Result<()> {
    let doc = IndexDocument {
        versions: entries.to_vec(),
    };
    let content = serde_json::to_string_pretty(&doc)?;
    fs::write(layout.index_file(), content)?;
    Ok(())
}

/// Appends a new active entry computed from the live file and persists the
/// index. The size is taken at call time and never recomputed.
pub fn register(
    layout: &ProjectLayout,
    file_path: &Path,
    note: &str,
    compressed: bool,
) -> Result<VersionEntry> {
    let size_mb = fs::metadata(file_path)
        .ok()
        .map(|m| round2(m.len() as f64 / (1024.0 * 1024.0)));
    let basename = file_path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default()
        .to_string();

    let entry = VersionEntry::new(basename, size_mb, note, compressed);
    let mut entries = load(layout)?;
    entries.push(entry.clone());
    save(layout, &entries)?;
    Ok(entry)
}

/// Entries in index (creation) order. With `include_deleted` false, only
/// active entries are returned: purged entries are ghosts whose files no
/// longer exist, so they are hidden along with deleted ones.
pub fn list(layout: &ProjectLayout, include_deleted: bool) -> Result<Vec<VersionEntry>> {
    let entries = load(layout)?;
    if include_deleted {
        return Ok(entries);
    }
    Ok(entries
        .into_iter()
        .filter(|e| e.status == VersionStatus::Active)
        .collect())
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
