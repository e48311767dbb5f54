//! Persistent storage
//!
//! This module handles all data persistence for quotes, the selected
//! category filter, and application settings.

pub mod quotes;
pub mod settings;

use directories::ProjectDirs;
use std::path::PathBuf;
use thiserror::Error;

/// Errors from the storage layer
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Could not determine the application data directory")]
    DataDir,
}

/// Get the application data directory, creating nothing
pub fn get_data_dir() -> Result<PathBuf, StorageError> {
    let dirs = ProjectDirs::from("com", "quotedeck", "QuoteDeck").ok_or(StorageError::DataDir)?;
    Ok(dirs.data_dir().to_path_buf())
}
