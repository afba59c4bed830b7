//! Processed-set store
//!
//! Plain text file, one `DD/MM/YYYY` key per line, no header.
//! Read as a set (order, blank lines and duplicates are irrelevant),
//! written back sorted and deduplicated. Keys that parse as dates are
//! normalized on load (`1/1/2025` reads as `01/01/2025`); anything else is
//! kept verbatim.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

use super::date::NoteDate;
use super::staging::StagedFile;

/// Date keys already rendered into the output
pub type ProcessedSet = BTreeSet<String>;

#[derive(Debug, Clone)]
pub struct ProcessedStore {
    path: PathBuf,
}

impl ProcessedStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Load the set; a missing file is an empty set
    pub fn load(&self) -> Result<ProcessedSet> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no processed-set store yet");
            return Ok(ProcessedSet::new());
        }

        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read {}", self.path.display()))?;
        Ok(parse(&content))
    }

    /// Write the set to a temporary file next to the store, not yet visible
    pub fn stage(&self, set: &ProcessedSet) -> Result<StagedFile> {
        StagedFile::write(&self.path, &serialize(set))
    }

    /// Overwrite the store with `set`
    pub fn save(&self, set: &ProcessedSet) -> Result<()> {
        self.stage(set)?.commit()
    }
}

fn parse(content: &str) -> ProcessedSet {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(normalize_key)
        .collect()
}

fn normalize_key(line: &str) -> String {
    line.parse::<NoteDate>()
        .map(|date| date.key())
        .unwrap_or_else(|_| line.to_string())
}

fn serialize(set: &ProcessedSet) -> String {
    let mut out = String::new();
    for key in set {
        out.push_str(key);
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_is_empty() -> Result<()> {
        let dir = tempdir()?;
        let store = ProcessedStore::new(dir.path().join("processed_dates.txt"));
        assert!(store.load()?.is_empty());
        Ok(())
    }

    #[test]
    fn test_roundtrip() -> Result<()> {
        let dir = tempdir()?;
        let store = ProcessedStore::new(dir.path().join("processed_dates.txt"));

        let set: ProcessedSet = ["03/01/2025", "01/01/2025", "02/01/2025"]
            .into_iter()
            .map(String::from)
            .collect();
        store.save(&set)?;

        assert_eq!(store.load()?, set);
        Ok(())
    }

    #[test]
    fn test_written_sorted_one_per_line() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("processed_dates.txt");
        let store = ProcessedStore::new(&path);

        let set: ProcessedSet = ["02/01/2025", "01/01/2025"].into_iter().map(String::from).collect();
        store.save(&set)?;

        assert_eq!(fs::read_to_string(&path)?, "01/01/2025\n02/01/2025\n");
        Ok(())
    }

    #[test]
    fn test_read_ignores_blanks_duplicates_and_padding() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("processed_dates.txt");
        fs::write(&path, "02/01/2025\n\n  01/01/2025  \n02/01/2025\n")?;

        let set = ProcessedStore::new(&path).load()?;
        assert_eq!(set.len(), 2);
        assert!(set.contains("01/01/2025"));
        Ok(())
    }

    #[test]
    fn test_hand_edited_keys_normalized() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("processed_dates.txt");
        fs::write(&path, "1/1/2025\n01/01/2025\n 2/01/2025\ngarbage\n")?;

        let set = ProcessedStore::new(&path).load()?;
        let keys: Vec<_> = set.iter().map(String::as_str).collect();
        assert_eq!(keys, vec!["01/01/2025", "02/01/2025", "garbage"]);
        Ok(())
    }

    #[test]
    fn test_staged_write_not_visible_until_commit() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("processed_dates.txt");
        fs::write(&path, "01/01/2025\n")?;
        let store = ProcessedStore::new(&path);

        let mut set = store.load()?;
        set.insert("02/01/2025".to_string());
        let staged = store.stage(&set)?;
        assert_eq!(store.load()?.len(), 1);

        staged.commit()?;
        assert_eq!(store.load()?.len(), 2);
        Ok(())
    }
}
