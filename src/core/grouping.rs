//! Grouping - Month → category → entries, in first-encountered order
//!
//! # Merge semantics
//! The document for a run is built in two passes: already-processed dates
//! first, then the new batch. New entries are appended to the end of their
//! (month, category) bucket; months or categories seen for the first time in
//! the new batch are appended after everything that already exists.

use std::borrow::Borrow;

use super::categorizer::Categorizer;
use super::extractor::NoteMap;

/// Map that iterates in key insertion order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderedMap<K, V> {
    entries: Vec<(K, V)>,
}

impl<K, V> Default for OrderedMap<K, V> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<K: Eq, V> OrderedMap<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
    {
        self.entries
            .iter()
            .find(|(k, _)| k.borrow() == key)
            .map(|(_, v)| v)
    }

    /// Value for `key`, inserting `V::default()` at the end if absent
    pub fn get_or_default(&mut self, key: K) -> &mut V
    where
        V: Default,
    {
        let idx = match self.entries.iter().position(|(k, _)| *k == key) {
            Some(idx) => idx,
            None => {
                self.entries.push((key, V::default()));
                self.entries.len() - 1
            }
        };
        &mut self.entries[idx].1
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries.iter().map(|(k, _)| k)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }
}

impl<K, V> IntoIterator for OrderedMap<K, V> {
    type Item = (K, V);
    type IntoIter = std::vec::IntoIter<(K, V)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Entries of one category, already formatted as `DD/MM/YYYY - text`
pub type CategoryEntries = Vec<String>;

/// Categories of one month
pub type MonthSections = OrderedMap<String, CategoryEntries>;

/// The whole changelog structure
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupedDocument {
    months: OrderedMap<String, MonthSections>,
}

impl GroupedDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Group notes by month then category, walking dates chronologically
    pub fn from_notes(notes: &NoteMap, categorizer: &Categorizer) -> Self {
        let mut doc = Self::new();
        for (date, items) in notes {
            let month = date.month_label();
            for note in items {
                let category = categorizer.categorize(note);
                doc.push(month.clone(), category, format!("{} - {}", date, note));
            }
        }
        doc
    }

    /// Append one entry to its bucket, creating month/category as needed
    pub fn push(&mut self, month: String, category: String, entry: String) {
        self.months
            .get_or_default(month)
            .get_or_default(category)
            .push(entry);
    }

    /// Append every bucket of `other` after the matching bucket of `self`
    pub fn merge(&mut self, other: GroupedDocument) {
        for (month, sections) in other.months {
            let target = self.months.get_or_default(month);
            for (category, entries) in sections {
                target.get_or_default(category).extend(entries);
            }
        }
    }

    pub fn months(&self) -> impl Iterator<Item = (&String, &MonthSections)> {
        self.months.iter()
    }

    pub fn month(&self, label: &str) -> Option<&MonthSections> {
        self.months.get(label)
    }

    /// Entries of one (month, category) bucket
    pub fn entries(&self, month: &str, category: &str) -> Option<&[String]> {
        self.months
            .get(month)
            .and_then(|m| m.get(category))
            .map(Vec::as_slice)
    }

    pub fn entry_count(&self) -> usize {
        self.months
            .iter()
            .flat_map(|(_, sections)| sections.iter())
            .map(|(_, entries)| entries.len())
            .sum()
    }
}
