use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";

const DEFAULT_INTERVAL_SECS: u64 = 600;
const DEFAULT_KEEP_UNCOMPRESSED: usize = 3;
const DEFAULT_PURGE_DAYS: u64 = 30;
const DEFAULT_FILE_EXT: &str = ".blend";

/// Autosave and retention settings, stored as `config.json` under the root
/// directory (shared by all projects under that root).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VaultConfig {
    /// Seconds between automatic snapshots.
    #[serde(default = "default_interval")]
    pub autosave_interval_secs: u64,

    /// Newest versions to keep uncompressed; older ones are gzipped.
    #[serde(default = "default_keep")]
    pub keep_uncompressed: usize,

    /// Purge deleted versions older than this many days. 0 disables purge.
    #[serde(default = "default_purge_days")]
    pub purge_days: u64,

    /// Extension of version files (e.g. ".blend")
    #[serde(default = "default_file_ext")]
    pub file_ext: String,
}

fn default_interval() -> u64 {
    DEFAULT_INTERVAL_SECS
}

fn default_keep() -> usize {
    DEFAULT_KEEP_UNCOMPRESSED
}

fn default_purge_days() -> u64 {
    DEFAULT_PURGE_DAYS
}

fn default_file_ext() -> String {
    DEFAULT_FILE_EXT.to_string()
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            autosave_interval_secs: DEFAULT_INTERVAL_SECS,
            keep_uncompressed: DEFAULT_KEEP_UNCOMPRESSED,
            purge_days: DEFAULT_PURGE_DAYS,
            file_ext: DEFAULT_FILE_EXT.to_string(),
        }
    }
}

impl VaultConfig {
    /// Load config from the given directory, or return defaults if not found.
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);
        if !config_path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(&config_path)?;
        let config: VaultConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save config to the given directory.
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();
        if !config_dir.exists() {
            fs::create_dir_all(config_dir)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(config_dir.join(CONFIG_FILENAME), content)?;
        Ok(())
    }

    pub fn get_file_ext(&self) -> &str {
        &self.file_ext
    }

    /// Set the version file extension (normalizes to start with a dot).
    pub fn set_file_ext(&mut self, ext: &str) {
        if ext.starts_with('.') {
            self.file_ext = ext.to_string();
        } else {
            self.file_ext = format!(".{}", ext);
        }
    }
}
