use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "snapvault")]
#[command(version)]
#[command(about = "Timed version history, compression, and retention for a single file", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// The document to version (omit for the unsaved project)
    #[arg(short, long, global = true)]
    pub file: Option<PathBuf>,

    /// Base directory where project history folders are stored
    #[arg(short, long, global = true)]
    pub root: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Save a versioned copy into the project history
    #[command(alias = "snap")]
    Snapshot,

    /// Save a manual backup (defaults to <project>/backups)
    Backup {
        /// Target directory; outside the project it is not indexed
        #[arg(long)]
        dir: Option<PathBuf>,
    },

    /// List tracked versions
    #[command(alias = "ls")]
    List {
        /// Include deleted and purged entries
        #[arg(long)]
        deleted: bool,
    },

    /// Move versions into the deleted holding area
    #[command(alias = "rm")]
    Delete {
        /// Version basenames (as shown by list)
        #[arg(required = true, num_args = 1..)]
        names: Vec<String>,
    },

    /// Restore versions from the deleted holding area
    Restore {
        /// Version basenames (as shown by list --deleted)
        #[arg(required = true, num_args = 1..)]
        names: Vec<String>,
    },

    /// Gzip older versions, keeping the newest N uncompressed
    Compress {
        /// Newest versions to leave uncompressed (default from config)
        #[arg(long)]
        keep: Option<usize>,
    },

    /// Permanently remove deleted versions older than N days
    Purge {
        /// Age threshold in days; 0 disables (default from config)
        #[arg(long)]
        days: Option<u64>,
    },

    /// Run the autosave loop until interrupted
    Watch {
        /// Seconds between snapshots (default from config)
        #[arg(long)]
        interval: Option<u64>,
    },

    /// Get or set configuration
    Config {
        /// Configuration key (interval, keep, purge-days, file-ext)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}
