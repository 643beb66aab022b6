use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum VaultError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Copy to {path} failed: {reason}")]
    Copy { path: PathBuf, reason: String },

    #[error("{name} not found in {dir}/")]
    NotFound { dir: &'static str, name: String },

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, VaultError>;
