//! Note extractor
//!
//! Segments an ordered sequence of paragraphs into date-keyed note groups.
//!
//! # Rules
//! - A date marker closes the open group (kept only if it has notes)
//! - Note lines before the first date marker are discarded
//! - A date marker with no notes before the next marker vanishes
//! - Groups come back in chronological order whatever the source order

use std::collections::BTreeMap;

use tracing::{debug, warn};

use super::classifier::{classify_line, LineClass};
use super::date::NoteDate;

/// Note lines keyed by date, chronologically ordered
pub type NoteMap = BTreeMap<NoteDate, Vec<String>>;

/// A line that looked like a date but was kept as note text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Anomaly {
    /// 1-based paragraph number in the source
    pub line_no: usize,
    pub text: String,
}

/// Outcome of an extraction pass
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    pub notes: NoteMap,
    pub anomalies: Vec<Anomaly>,
    /// Note lines dropped because no date marker preceded them
    pub orphaned: usize,
}

impl Extraction {
    /// Total number of note lines across all dates
    pub fn note_count(&self) -> usize {
        self.notes.values().map(Vec::len).sum()
    }
}

struct OpenGroup {
    date: NoteDate,
    buffer: Vec<String>,
}

/// Extract date-keyed notes from ordered paragraphs
pub fn extract_notes<I, S>(paragraphs: I) -> Extraction
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out = Extraction::default();
    let mut open: Option<OpenGroup> = None;

    for (idx, paragraph) in paragraphs.into_iter().enumerate() {
        let text = paragraph.as_ref().trim();
        if text.is_empty() {
            continue;
        }

        match classify_line(text) {
            LineClass::DateMarker(date) => {
                debug!(line = idx + 1, %date, "date marker");
                if let Some(group) = open.take() {
                    flush(&mut out.notes, group);
                }
                open = Some(OpenGroup {
                    date,
                    buffer: Vec::new(),
                });
            }
            LineClass::Content { anomaly } => {
                if anomaly {
                    warn!(
                        line = idx + 1,
                        text, "line looks like a date but does not parse, kept as note text"
                    );
                    out.anomalies.push(Anomaly {
                        line_no: idx + 1,
                        text: text.to_string(),
                    });
                }

                match open.as_mut() {
                    Some(group) => group.buffer.push(text.to_string()),
                    None => {
                        debug!(line = idx + 1, "discarding note before first date marker");
                        out.orphaned += 1;
                    }
                }
            }
        }
    }

    if let Some(group) = open.take() {
        flush(&mut out.notes, group);
    }

    out
}

fn flush(notes: &mut NoteMap, group: OpenGroup) {
    if group.buffer.is_empty() {
        debug!(date = %group.date, "date marker without notes dropped");
        return;
    }

    if let Some(previous) = notes.insert(group.date, group.buffer) {
        warn!(
            date = %group.date,
            replaced = previous.len(),
            "date appears more than once, keeping the later group"
        );
    }
}
