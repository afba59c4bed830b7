//! Staged writes
//!
//! Content is first written to a temporary file in the target's directory,
//! then renamed over the target on commit. Dropping an uncommitted
//! `StagedFile` removes the temporary file and leaves the target untouched.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tempfile::NamedTempFile;
use tracing::debug;

#[derive(Debug)]
pub struct StagedFile {
    temp: NamedTempFile,
    target: PathBuf,
}

impl StagedFile {
    /// Write `content` next to `target` without touching `target`
    pub fn write(target: &Path, content: &str) -> Result<Self> {
        let dir = match target.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create directory {}", dir.display()))?;

        let mut temp = NamedTempFile::new_in(&dir)
            .with_context(|| format!("Failed to create temporary file in {}", dir.display()))?;
        temp.write_all(content.as_bytes())
            .and_then(|_| temp.as_file().sync_all())
            .with_context(|| format!("Failed to write staged copy of {}", target.display()))?;

        debug!(target = %target.display(), bytes = content.len(), "staged");
        Ok(Self {
            temp,
            target: target.to_path_buf(),
        })
    }

    /// Move the staged content over the target
    pub fn commit(self) -> Result<()> {
        let target = self.target;
        self.temp
            .persist(&target)
            .with_context(|| format!("Failed to replace {}", target.display()))?;
        debug!(target = %target.display(), "committed");
        Ok(())
    }
}
