//! Categorizer - Maps a note line to its section heading
//!
//! Precedence:
//! 1. Keyword prefix (case-insensitive, first keyword in list order wins)
//! 2. `#tag` as the first word
//! 3. Fallback label

use crate::config::CategoryConfig;

#[derive(Debug, Clone)]
pub struct Categorizer {
    /// Canonical keyword casing, in priority order
    keywords: Vec<String>,
    /// Lowercased copies used for matching
    keywords_lower: Vec<String>,
    tag_marker: char,
    fallback: String,
}

impl Categorizer {
    pub fn new(keywords: Vec<String>, tag_marker: char, fallback: impl Into<String>) -> Self {
        let keywords_lower = keywords.iter().map(|k| k.to_lowercase()).collect();
        Self {
            keywords,
            keywords_lower,
            tag_marker,
            fallback: fallback.into(),
        }
    }

    pub fn from_config(config: &CategoryConfig) -> Self {
        Self::new(
            config.keywords.clone(),
            config.tag_marker,
            config.fallback.clone(),
        )
    }

    /// Category key for a note line
    pub fn categorize(&self, note: &str) -> String {
        let lower = note.to_lowercase();
        if let Some(idx) = self
            .keywords_lower
            .iter()
            .position(|kw| lower.starts_with(kw.as_str()))
        {
            return self.keywords[idx].clone();
        }

        if let Some(tag) = note
            .split_whitespace()
            .next()
            .and_then(|word| word.strip_prefix(self.tag_marker))
            .filter(|tag| !tag.is_empty())
        {
            return tag.to_string();
        }

        self.fallback.clone()
    }

    pub fn fallback(&self) -> &str {
        &self.fallback
    }
}

impl Default for Categorizer {
    fn default() -> Self {
        Self::from_config(&CategoryConfig::default())
    }
}
