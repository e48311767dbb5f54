//! Quote persistence
//!
//! The quote collection is mirrored to `quotes.json` in the data directory
//! after every mutation; the active category filter is kept in a separate
//! plain-text file so it survives restarts on its own.

use crate::storage::{get_data_dir, StorageError};
use crate::types::quote::Quote;
use std::fs;
use std::path::{Path, PathBuf};

const QUOTES_FILE: &str = "quotes.json";
const SELECTED_CATEGORY_FILE: &str = "selected_category";

/// The two-quote seed used when no persisted collection exists yet
pub fn default_quotes() -> Vec<Quote> {
    vec![
        Quote::new(
            "The only limit to our realization of tomorrow is our doubts of today.",
            "Motivation",
        ),
        Quote::new(
            "Life is what happens when you're busy making other plans.",
            "Life",
        ),
    ]
}

fn get_quotes_path() -> Result<PathBuf, StorageError> {
    Ok(get_data_dir()?.join(QUOTES_FILE))
}

fn get_selected_category_path() -> Result<PathBuf, StorageError> {
    Ok(get_data_dir()?.join(SELECTED_CATEGORY_FILE))
}

/// Load the quote collection from disk
///
/// Seeds and persists the defaults when no collection exists; falls back to
/// the defaults (without persisting) when the stored one cannot be read.
pub fn load_quotes() -> Vec<Quote> {
    match get_quotes_path().and_then(|path| load_quotes_from(&path)) {
        Ok(Some(quotes)) => quotes,
        Ok(None) => {
            tracing::info!("No stored quotes found, seeding defaults");
            let seeds = default_quotes();
            if let Err(e) = save_quotes(&seeds) {
                tracing::warn!("Failed to persist seed quotes: {}", e);
            }
            seeds
        }
        Err(e) => {
            tracing::warn!("Failed to load quotes, starting from defaults: {}", e);
            default_quotes()
        }
    }
}

fn load_quotes_from(path: &Path) -> Result<Option<Vec<Quote>>, StorageError> {
    if !path.exists() {
        return Ok(None);
    }
    let json = fs::read_to_string(path)?;
    let quotes: Vec<Quote> = serde_json::from_str(&json)?;
    tracing::debug!("Loaded {} quotes from disk", quotes.len());
    Ok(Some(quotes))
}

/// Save the quote collection to disk
pub fn save_quotes(quotes: &[Quote]) -> Result<(), StorageError> {
    let path = get_quotes_path()?;
    save_quotes_to(&path, quotes)
}

fn save_quotes_to(path: &Path, quotes: &[Quote]) -> Result<(), StorageError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(quotes)?;
    fs::write(path, json)?;
    tracing::debug!("Saved {} quotes to disk", quotes.len());
    Ok(())
}

/// Where an exported document lands: the user's download directory, or an
/// `export/` corner of the data directory when no download directory exists
fn get_export_path() -> Result<PathBuf, StorageError> {
    if let Some(user_dirs) = directories::UserDirs::new() {
        if let Some(downloads) = user_dirs.download_dir() {
            return Ok(downloads.join(QUOTES_FILE));
        }
    }
    Ok(get_data_dir()?.join("export").join(QUOTES_FILE))
}

/// Export the full collection as a downloadable `quotes.json`
///
/// Returns the path the document was written to.
pub fn export_quotes(quotes: &[Quote]) -> Result<PathBuf, StorageError> {
    let path = get_export_path()?;
    export_quotes_to(&path, quotes)?;
    Ok(path)
}

fn export_quotes_to(path: &Path, quotes: &[Quote]) -> Result<(), StorageError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(quotes)?;
    fs::write(path, json)?;
    tracing::info!("Exported {} quotes to {}", quotes.len(), path.display());
    Ok(())
}

/// Load the previously selected category filter, if any
pub fn load_selected_category() -> Option<String> {
    let path = get_selected_category_path().ok()?;
    let raw = fs::read_to_string(path).ok()?;
    let category = raw.trim().to_string();
    if category.is_empty() {
        None
    } else {
        Some(category)
    }
}

/// Persist the selected category filter
pub fn save_selected_category(category: &str) -> Result<(), StorageError> {
    let path = get_selected_category_path()?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, category)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_quotes_seed() {
        let seeds = default_quotes();
        assert_eq!(seeds.len(), 2);
        assert_eq!(seeds[0].category, "Motivation");
        assert_eq!(seeds[1].category, "Life");
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quotes.json");
        let quotes = vec![Quote::new("A", "X"), Quote::new("B", "Y")];

        save_quotes_to(&path, &quotes).unwrap();
        let loaded = load_quotes_from(&path).unwrap().unwrap();
        assert_eq!(loaded, quotes);
    }

    #[test]
    fn test_load_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quotes.json");
        assert!(load_quotes_from(&path).unwrap().is_none());
    }

    #[test]
    fn test_load_corrupted_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quotes.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(load_quotes_from(&path).is_err());
    }

    #[test]
    fn test_save_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("deep").join("quotes.json");
        save_quotes_to(&path, &default_quotes()).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_export_round_trips_through_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quotes.json");
        let quotes = vec![Quote::new("A", "X"), Quote::new("B", "Y")];

        export_quotes_to(&path, &quotes).unwrap();
        let restored = load_quotes_from(&path).unwrap().unwrap();
        assert_eq!(restored, quotes);
    }

    #[test]
    fn test_saved_document_is_pretty_printed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quotes.json");
        save_quotes_to(&path, &[Quote::new("A", "X")]).unwrap();
        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\n  "));
    }
}
