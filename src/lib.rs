//! notelog - Incremental changelog from dated notes
//!
//! Reads a document whose paragraphs are date markers followed by free-text
//! notes, and renders them as a markdown journal grouped by month and
//! category. Each run adds only a few not-yet-processed dates and records
//! them, so repeated runs grow the journal without duplicating anything.
//!
//! ## Key Concepts
//!
//! - **Date marker**: a paragraph that parses as a day-first date
//! - **Category**: keyword prefix, `#tag`, or the fallback label
//! - **Processed set**: dates already rendered, stored one per line
//! - **Batch**: the earliest unprocessed dates handled by one run

pub mod cli;
pub mod config;
pub mod core;
pub mod error;

pub use crate::config::Config;
pub use crate::core::categorizer::Categorizer;
pub use crate::core::date::NoteDate;
pub use crate::core::extractor::{extract_notes, Extraction, NoteMap};
pub use crate::core::gate::{NeverSkip, RandomSkipGate, SkipGate};
pub use crate::core::grouping::{GroupedDocument, OrderedMap};
pub use crate::core::pipeline::{Pipeline, RunOptions, RunOutcome, RunReport};
pub use crate::core::source::{open_source, DocxSource, LinesSource, SourceReader, TextSource};
pub use crate::error::NotelogError;
