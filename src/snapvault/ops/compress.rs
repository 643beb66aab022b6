use crate::error::Result;
use crate::index;
use crate::ops::{OpMessage, OpResult};
use crate::vault::Vault;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::ffi::OsString;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::warn;

/// Gzips aging versions in `history/`, keeping the newest `keep_uncompressed`
/// files (by modification time) untouched. Each compressed file loses its
/// original, and the matching index entry is renamed to the `.gz` name with
/// `compressed` set. Per-file failures are reported and skipped.
///
/// Linear scan over `history/`; no pagination.
pub fn run(vault: &Vault, keep_uncompressed: usize) -> Result<OpResult> {
    let layout = vault.layout();
    let history = layout.history_dir()?;

    let mut candidates: Vec<(PathBuf, SystemTime)> = Vec::new();
    for dir_entry in fs::read_dir(&history)? {
        let dir_entry = dir_entry?;
        let path = dir_entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if !name.ends_with(layout.file_ext()) {
            continue;
        }
        let mtime = dir_entry.metadata()?.modified()?;
        candidates.push((path, mtime));
    }
    // Newest first; everything past the keep window gets compressed.
    candidates.sort_by(|a, b| b.1.cmp(&a.1));

    let mut result = OpResult::default();
    for (path, _) in candidates.into_iter().skip(keep_uncompressed) {
        let name = basename(&path);
        let _guard = vault.guard();
        match compress_file(&path) {
            Ok(gz_path) => {
                let gz_name = basename(&gz_path);
                let mut entries = index::load(layout)?;
                if let Some(entry) = entries.iter_mut().find(|e| e.file == name) {
                    entry.compressed = true;
                    entry.file = gz_name;
                    result.affected.push(entry.clone());
                }
                index::save(layout, &entries)?;
                result.add_message(OpMessage::success(format!("Compressed {}", name)));
            }
            Err(e) => {
                warn!(file = %path.display(), error = %e, "compression failed, skipping");
                result.add_message(OpMessage::warning(format!(
                    "Compression failed for {}: {}",
                    name, e
                )));
            }
        }
    }

    if result.messages.is_empty() {
        result.add_message(OpMessage::info("Nothing to compress."));
    }
    Ok(result)
}

/// Gzips `path` to `path.gz` and removes the original.
fn compress_file(path: &Path) -> Result<PathBuf> {
    let mut gz_os = OsString::from(path.as_os_str());
    gz_os.push(".gz");
    let gz_path = PathBuf::from(gz_os);

    let mut input = File::open(path)?;
    let output = File::create(&gz_path)?;
    let mut encoder = GzEncoder::new(output, Compression::default());
    io::copy(&mut input, &mut encoder)?;
    encoder.finish()?;

    fs::remove_file(path)?;
    Ok(gz_path)
}

fn basename(path: &Path) -> String {
    path.file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use std::path::Path;
    use std::thread;
    use std::time::Duration;

    fn vault_with_versions(names: &[&str]) -> (tempfile::TempDir, Vault) {
        let root = tempfile::tempdir().unwrap();
        let vault = Vault::open(Some(Path::new("scene.blend")), root.path()).unwrap();
        let history = vault.layout().history_dir().unwrap();
        for name in names {
            let path = history.join(name);
            fs::write(&path, format!("contents of {}", name)).unwrap();
            index::register(vault.layout(), &path, "auto", false).unwrap();
            // Distinct mtimes so the keep window is deterministic.
            thread::sleep(Duration::from_millis(20));
        }
        (root, vault)
    }

    #[test]
    fn keeps_newest_n_uncompressed() {
        let (_root, vault) = vault_with_versions(&["a.blend", "b.blend", "c.blend"]);

        let result = run(&vault, 1).unwrap();
        assert_eq!(result.affected.len(), 2);

        let history = vault.layout().history_dir().unwrap();
        assert!(history.join("c.blend").exists());
        assert!(history.join("a.blend.gz").exists());
        assert!(history.join("b.blend.gz").exists());
        assert!(!history.join("a.blend").exists());
        assert!(!history.join("b.blend").exists());

        let entries = index::load(vault.layout()).unwrap();
        assert_eq!(entries.len(), 3);
        assert!(entries[0].compressed && entries[0].file == "a.blend.gz");
        assert!(entries[1].compressed && entries[1].file == "b.blend.gz");
        assert!(!entries[2].compressed && entries[2].file == "c.blend");
    }

    #[test]
    fn keep_window_larger_than_history_is_a_noop() {
        let (_root, vault) = vault_with_versions(&["a.blend", "b.blend"]);

        let result = run(&vault, 5).unwrap();
        assert!(result.affected.is_empty());

        let history = vault.layout().history_dir().unwrap();
        assert!(history.join("a.blend").exists());
        assert!(history.join("b.blend").exists());
    }

    #[test]
    fn already_compressed_files_are_ignored() {
        let (_root, vault) = vault_with_versions(&["a.blend", "b.blend"]);
        run(&vault, 1).unwrap();
        // Second pass sees one .blend (kept) and one .gz (skipped).
        let result = run(&vault, 1).unwrap();
        assert!(result.affected.is_empty());
    }

    #[test]
    fn gzip_content_roundtrips() {
        let (_root, vault) = vault_with_versions(&["a.blend", "b.blend"]);
        run(&vault, 1).unwrap();

        let gz = vault.layout().history_dir().unwrap().join("a.blend.gz");
        let mut decoder = flate2::read::GzDecoder::new(File::open(&gz).unwrap());
        let mut decompressed = String::new();
        decoder.read_to_string(&mut decompressed).unwrap();
        assert_eq!(decompressed, "contents of a.blend");
    }
}
