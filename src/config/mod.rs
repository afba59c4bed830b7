//! Configuration module
//!
//! Lookup order:
//! 1. Explicit path (`--config` / `NOTELOG_CONFIG`)
//! 2. Local `.notelog/config.toml`, walking up from the current directory
//! 3. Global `~/.notelog/config.toml`
//! 4. Built-in defaults

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::NotelogError;

pub const CONFIG_DIR: &str = ".notelog";
pub const CONFIG_FILE: &str = "config.toml";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub paths: PathsConfig,

    #[serde(default)]
    pub categories: CategoryConfig,

    #[serde(default)]
    pub run: RunConfig,

    #[serde(default)]
    pub render: RenderConfig,
}

/// Files read and written by a run
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PathsConfig {
    /// Source document (`.docx`, or text with one paragraph per line)
    #[serde(default = "default_source")]
    pub source: PathBuf,

    /// Rendered changelog
    #[serde(default = "default_output")]
    pub output: PathBuf,

    /// Processed-set store
    #[serde(default = "default_processed")]
    pub processed: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            source: default_source(),
            output: default_output(),
            processed: default_processed(),
        }
    }
}

fn default_source() -> PathBuf {
    PathBuf::from("CCR_SG&AD.docx")
}

fn default_output() -> PathBuf {
    PathBuf::from("README.md")
}

fn default_processed() -> PathBuf {
    PathBuf::from("processed_dates.txt")
}

/// How note lines are sorted into sections
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryConfig {
    /// Keyword prefixes, first match wins
    #[serde(default = "default_keywords")]
    pub keywords: Vec<String>,

    #[serde(default = "default_fallback")]
    pub fallback: String,

    #[serde(default = "default_tag_marker")]
    pub tag_marker: char,
}

impl Default for CategoryConfig {
    fn default() -> Self {
        Self {
            keywords: default_keywords(),
            fallback: default_fallback(),
            tag_marker: default_tag_marker(),
        }
    }
}

fn default_keywords() -> Vec<String> {
    ["Astuces", "Windev", "Correctifs", "Bugs", "Test", "Evolution"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_fallback() -> String {
    "Divers".to_string()
}

fn default_tag_marker() -> char {
    '#'
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunConfig {
    /// Maximum number of new dates per run
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Chance that an invocation does nothing
    #[serde(default = "default_skip_probability")]
    pub skip_probability: f64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            batch_size: default_batch_size(),
            skip_probability: default_skip_probability(),
        }
    }
}

fn default_batch_size() -> usize {
    3
}

fn default_skip_probability() -> f64 {
    0.33
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RenderConfig {
    #[serde(default = "default_title")]
    pub title: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
        }
    }
}

fn default_title() -> String {
    crate::core::render::DEFAULT_TITLE.to_string()
}

impl Config {
    /// Load config from the explicit path if given, else default locations
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_from(path);
        }

        if let Some(local) = Self::find_local_config() {
            return Self::load_from(&local);
        }

        if let Some(global) = Self::global_config_path() {
            if global.exists() {
                return Self::load_from(&global);
            }
        }

        let config = Self::default();
        config.validate()?;
        Ok(config)
    }

    /// Load config from a specific file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        config.validate()?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Save config to a file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Reject values a run cannot work with
    pub fn validate(&self) -> Result<(), NotelogError> {
        if self.run.batch_size == 0 {
            return Err(NotelogError::invalid_config("run.batch_size", "must be at least 1"));
        }

        if !(0.0..=1.0).contains(&self.run.skip_probability) {
            return Err(NotelogError::invalid_config(
                "run.skip_probability",
                format!("must be between 0 and 1, got {}", self.run.skip_probability),
            ));
        }

        if self.categories.keywords.iter().any(|k| k.trim().is_empty()) {
            return Err(NotelogError::invalid_config(
                "categories.keywords",
                "must not contain empty entries",
            ));
        }

        if self.categories.fallback.trim().is_empty() {
            return Err(NotelogError::invalid_config("categories.fallback", "must not be empty"));
        }

        if self.categories.tag_marker.is_whitespace() {
            return Err(NotelogError::invalid_config(
                "categories.tag_marker",
                "must not be whitespace",
            ));
        }

        Ok(())
    }

    /// Find local .notelog/config.toml walking up directories
    pub fn find_local_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;

        loop {
            let config_path = current.join(CONFIG_DIR).join(CONFIG_FILE);
            if config_path.exists() {
                return Some(config_path);
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Get global config path (~/.notelog/config.toml)
    pub fn global_config_path() -> Option<PathBuf> {
        directories::UserDirs::new().map(|u| u.home_dir().join(CONFIG_DIR).join(CONFIG_FILE))
    }

    /// Local config path for a project directory
    pub fn local_config_path(base: &Path) -> PathBuf {
        base.join(CONFIG_DIR).join(CONFIG_FILE)
    }
}
