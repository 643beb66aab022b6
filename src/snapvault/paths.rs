use crate::error::Result;
use crate::model::FILENAME_TIMESTAMP_FORMAT;
use chrono::NaiveDateTime;
use std::fs;
use std::path::{Path, PathBuf};

pub const INDEX_FILENAME: &str = "index.json";
pub const HISTORY_DIR: &str = "history";
pub const DELETED_DIR: &str = "deleted";
pub const BACKUPS_DIR: &str = "backups";

/// Project identity used when the document has never been saved.
pub const UNSAVED_PROJECT: &str = "unsaved_project";

const DEFAULT_FILE_EXT: &str = ".blend";

/// Derives the stable project identity for a document: its filename stem with
/// spaces replaced by underscores, or [`UNSAVED_PROJECT`] when there is no
/// document path yet.
pub fn project_identity(document_path: Option<&Path>) -> String {
    match document_path
        .and_then(|p| p.file_stem())
        .and_then(|s| s.to_str())
    {
        Some(stem) if !stem.is_empty() => stem.replace(' ', "_"),
        _ => UNSAVED_PROJECT.to_string(),
    }
}

/// The per-document directory everything lives under:
///
/// ```text
/// <root>/<identity>/
/// ├── index.json          # version metadata
/// ├── history/            # active and compressed versions
/// ├── deleted/            # versions pending purge
/// └── backups/            # default manual backup target
/// ```
///
/// Created on first access, never deleted by this crate.
#[derive(Debug, Clone)]
pub struct ProjectLayout {
    dir: PathBuf,
    identity: String,
    file_ext: String,
}

impl ProjectLayout {
    /// Resolves (and creates, idempotently) the project directory for a
    /// document under `root_dir`.
    pub fn resolve(document_path: Option<&Path>, root_dir: &Path) -> Result<Self> {
        let identity = project_identity(document_path);
        let dir = root_dir.join(&identity);
        fs::create_dir_all(&dir)?;
        Ok(Self {
            dir,
            identity,
            file_ext: DEFAULT_FILE_EXT.to_string(),
        })
    }

    pub fn with_file_ext(mut self, ext: &str) -> Self {
        if ext.starts_with('.') {
            self.file_ext = ext.to_string();
        } else {
            self.file_ext = format!(".{}", ext);
        }
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn identity(&self) -> &str {
        &self.identity
    }

    pub fn file_ext(&self) -> &str {
        &self.file_ext
    }

    pub fn index_file(&self) -> PathBuf {
        self.dir.join(INDEX_FILENAME)
    }

    pub fn history_dir(&self) -> Result<PathBuf> {
        self.subdir(HISTORY_DIR)
    }

    pub fn deleted_dir(&self) -> Result<PathBuf> {
        self.subdir(DELETED_DIR)
    }

    pub fn backups_dir(&self) -> Result<PathBuf> {
        self.subdir(BACKUPS_DIR)
    }

    fn subdir(&self, name: &str) -> Result<PathBuf> {
        let path = self.dir.join(name);
        if !path.exists() {
            fs::create_dir_all(&path)?;
        }
        Ok(path)
    }

    /// Filename for an automatic version. Second-resolution timestamps mean a
    /// second copy within the same second overwrites the first; accepted.
    pub fn version_filename(&self, ts: &NaiveDateTime) -> String {
        format!(
            "{}_{}{}",
            self.identity,
            ts.format(FILENAME_TIMESTAMP_FORMAT),
            self.file_ext
        )
    }

    pub fn backup_filename(&self, ts: &NaiveDateTime) -> String {
        format!(
            "{}_backup_{}{}",
            self.identity,
            ts.format(FILENAME_TIMESTAMP_FORMAT),
            self.file_ext
        )
    }

    /// Whether `path` resolves under the project directory. Used to decide
    /// whether a manual backup gets registered in the index.
    pub fn contains(&self, path: &Path) -> bool {
        let (Ok(dir), Ok(target)) = (self.dir.canonicalize(), path.canonicalize()) else {
            return false;
        };
        target.starts_with(dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn identity_from_stem_with_spaces() {
        let path = PathBuf::from("/work/My Great Scene.blend");
        assert_eq!(project_identity(Some(&path)), "My_Great_Scene");
    }

    #[test]
    fn identity_for_unsaved_document() {
        assert_eq!(project_identity(None), UNSAVED_PROJECT);
    }

    #[test]
    fn resolve_creates_project_dir_idempotently() {
        let root = tempfile::tempdir().unwrap();
        let doc = PathBuf::from("/work/scene.blend");

        let layout = ProjectLayout::resolve(Some(&doc), root.path()).unwrap();
        assert!(layout.dir().is_dir());
        assert_eq!(layout.dir(), root.path().join("scene"));

        // Second resolve is a no-op, not an error.
        let again = ProjectLayout::resolve(Some(&doc), root.path()).unwrap();
        assert_eq!(again.dir(), layout.dir());
    }

    #[test]
    fn filenames_follow_convention() {
        let root = tempfile::tempdir().unwrap();
        let doc = PathBuf::from("scene.blend");
        let layout = ProjectLayout::resolve(Some(&doc), root.path()).unwrap();
        let ts = NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(12, 30, 5)
            .unwrap();

        assert_eq!(
            layout.version_filename(&ts),
            "scene_2024-06-01_12-30-05.blend"
        );
        assert_eq!(
            layout.backup_filename(&ts),
            "scene_backup_2024-06-01_12-30-05.blend"
        );
    }

    #[test]
    fn file_ext_normalized_to_leading_dot() {
        let root = tempfile::tempdir().unwrap();
        let layout = ProjectLayout::resolve(None, root.path())
            .unwrap()
            .with_file_ext("max");
        assert_eq!(layout.file_ext(), ".max");
    }

    #[test]
    fn contains_distinguishes_inside_from_outside() {
        let root = tempfile::tempdir().unwrap();
        let layout = ProjectLayout::resolve(None, root.path()).unwrap();
        let inside = layout.backups_dir().unwrap();
        let outside = tempfile::tempdir().unwrap();

        assert!(layout.contains(&inside));
        assert!(!layout.contains(outside.path()));
    }
}
