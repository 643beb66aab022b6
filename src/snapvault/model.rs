use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Timestamp format used inside `index.json`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Timestamp format embedded in version filenames (no spaces or colons).
pub const FILENAME_TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// Lifecycle state of a tracked version.
///
/// Transitions: `Active -> Deleted -> Purged`, plus `Deleted -> Active`
/// (restore). There is no way out of `Purged`; the entry stays in the index
/// as history even though its file is gone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VersionStatus {
    Active,
    Deleted,
    Purged,
}

impl std::fmt::Display for VersionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VersionStatus::Active => write!(f, "active"),
            VersionStatus::Deleted => write!(f, "deleted"),
            VersionStatus::Purged => write!(f, "purged"),
        }
    }
}

/// One tracked copy of the document.
///
/// `timestamp` and `size_mb` are fixed at registration; compression later
/// renames `file` to the `.gz` name but does not recompute the size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VersionEntry {
    pub file: String,
    #[serde(with = "index_timestamp")]
    pub timestamp: NaiveDateTime,
    #[serde(rename = "size_MB")]
    pub size_mb: Option<f64>,
    pub note: String,
    pub status: VersionStatus,
    pub compressed: bool,
}

impl VersionEntry {
    pub fn new(file: String, size_mb: Option<f64>, note: &str, compressed: bool) -> Self {
        Self {
            file,
            timestamp: Local::now().naive_local(),
            size_mb,
            note: note.to_string(),
            status: VersionStatus::Active,
            compressed,
        }
    }
}

/// The on-disk shape of `index.json`: `{"versions": [...]}`.
///
/// Entries stay in insertion (creation) order and are never removed; purging
/// only flips an entry's status.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct IndexDocument {
    pub versions: Vec<VersionEntry>,
}

mod index_timestamp {
    use super::TIMESTAMP_FORMAT;
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(ts: &NaiveDateTime, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&ts.format(TIMESTAMP_FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(d)?;
        NaiveDateTime::parse_from_str(&raw, TIMESTAMP_FORMAT).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&VersionStatus::Active).unwrap(),
            "\"active\""
        );
        assert_eq!(
            serde_json::to_string(&VersionStatus::Purged).unwrap(),
            "\"purged\""
        );
    }

    #[test]
    fn entry_roundtrip_preserves_wire_format() {
        let entry = VersionEntry::new("scene_2024-01-02_03-04-05.blend".into(), Some(1.25), "auto", false);
        let json = serde_json::to_string(&entry).unwrap();

        assert!(json.contains("\"size_MB\":1.25"));
        assert!(json.contains("\"status\":\"active\""));

        let parsed: VersionEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, entry);
    }

    #[test]
    fn timestamp_uses_index_format() {
        let ts = NaiveDateTime::parse_from_str("2024-06-01 12:30:00", TIMESTAMP_FORMAT).unwrap();
        let entry = VersionEntry {
            timestamp: ts,
            ..VersionEntry::new("a.blend".into(), None, "auto", false)
        };
        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains("\"timestamp\":\"2024-06-01 12:30:00\""));
    }

    #[test]
    fn null_size_roundtrips() {
        let entry = VersionEntry::new("gone.blend".into(), None, "restored", true);
        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains("\"size_MB\":null"));
        let parsed: VersionEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.size_mb, None);
        assert!(parsed.compressed);
    }
}
