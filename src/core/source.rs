//! Source documents
//!
//! The pipeline only needs an ordered list of paragraph strings. Two readers
//! provide it:
//! - `DocxSource`: word-processing `.docx` files (zip container, the body
//!   lives in `word/document.xml`)
//! - `TextSource`: UTF-8 text, one paragraph per line

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use quick_xml::events::Event;
use quick_xml::Reader;
use tracing::debug;

use crate::error::NotelogError;

const DOCUMENT_PART: &str = "word/document.xml";

/// Anything that yields the paragraphs of a document in order
pub trait SourceReader {
    fn read_paragraphs(&self) -> Result<Vec<String>>;

    /// Human-readable origin, used in logs
    fn describe(&self) -> String;
}

/// Pick a reader from the file extension
pub fn open_source(path: &Path) -> Box<dyn SourceReader> {
    let is_docx = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("docx"))
        .unwrap_or(false);

    if is_docx {
        Box::new(DocxSource::new(path))
    } else {
        Box::new(TextSource::new(path))
    }
}

fn ensure_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(NotelogError::SourceNotFound {
            path: path.to_path_buf(),
        }
        .into());
    }
    Ok(())
}

/// `.docx` reader
#[derive(Debug, Clone)]
pub struct DocxSource {
    path: PathBuf,
}

impl DocxSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    fn document_xml(&self) -> Result<String> {
        let file = File::open(&self.path)
            .with_context(|| format!("Failed to open {}", self.path.display()))?;
        let mut archive = zip::ZipArchive::new(file)
            .with_context(|| format!("Failed to read {} as a zip container", self.path.display()))?;

        let mut part = match archive.by_name(DOCUMENT_PART) {
            Ok(part) => part,
            Err(zip::result::ZipError::FileNotFound) => {
                return Err(NotelogError::MissingDocumentPart {
                    path: self.path.clone(),
                    part: DOCUMENT_PART.to_string(),
                }
                .into())
            }
            Err(e) => {
                return Err(e).with_context(|| {
                    format!("Failed to read {} from {}", DOCUMENT_PART, self.path.display())
                })
            }
        };

        let mut xml = String::new();
        part.read_to_string(&mut xml)
            .with_context(|| format!("Failed to read {} from {}", DOCUMENT_PART, self.path.display()))?;
        Ok(xml)
    }
}

impl SourceReader for DocxSource {
    fn read_paragraphs(&self) -> Result<Vec<String>> {
        ensure_exists(&self.path)?;
        let xml = self.document_xml()?;
        let paragraphs = paragraphs_from_xml(&xml).map_err(|reason| NotelogError::MalformedDocument {
            path: self.path.clone(),
            reason,
        })?;
        debug!(path = %self.path.display(), count = paragraphs.len(), "read docx paragraphs");
        Ok(paragraphs)
    }

    fn describe(&self) -> String {
        format!("docx:{}", self.path.display())
    }
}

/// Elements whose text never belongs to the enclosing paragraph: text-box
/// bodies, and the legacy copy Word writes next to every drawing
const HIDDEN: [&[u8]; 2] = [b"w:txbxContent", b"mc:Fallback"];

/// Collect the text of every body-level `w:p` paragraph, in document order
///
/// Paragraphs inside tables and text boxes are not part of the body's
/// paragraph list and are skipped.
pub fn paragraphs_from_xml(xml: &str) -> std::result::Result<Vec<String>, String> {
    let mut reader = Reader::from_str(xml);
    let mut paragraphs = Vec::new();
    let mut open: Vec<Vec<u8>> = Vec::new();
    let mut current: Option<String> = None;
    let mut hidden = 0usize;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let name = e.name().as_ref().to_vec();
                if name.as_slice() == b"w:p" && parent_is_body(&open) {
                    current = Some(String::new());
                } else if HIDDEN.contains(&name.as_slice()) {
                    hidden += 1;
                }
                open.push(name);
            }
            Ok(Event::Empty(e)) => match e.name().as_ref() {
                b"w:p" if parent_is_body(&open) => paragraphs.push(String::new()),
                b"w:tab" if hidden == 0 => push_text(&mut current, "\t"),
                b"w:br" | b"w:cr" if hidden == 0 => push_text(&mut current, " "),
                _ => {}
            },
            Ok(Event::End(e)) => {
                open.pop();
                let name = e.name();
                if name.as_ref() == b"w:p" && parent_is_body(&open) {
                    if let Some(text) = current.take() {
                        paragraphs.push(text);
                    }
                } else if HIDDEN.contains(&name.as_ref()) {
                    hidden = hidden.saturating_sub(1);
                }
            }
            Ok(Event::Text(t)) if hidden == 0 && in_text_run(&open) => {
                let text = t.unescape().map_err(|e| e.to_string())?;
                push_text(&mut current, &text);
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(format!(
                    "{} at byte {}",
                    e,
                    reader.buffer_position()
                ))
            }
            _ => {}
        }
    }

    Ok(paragraphs)
}

fn parent_is_body(open: &[Vec<u8>]) -> bool {
    open.last().is_some_and(|name| name.as_slice() == b"w:body")
}

fn in_text_run(open: &[Vec<u8>]) -> bool {
    open.last().is_some_and(|name| name.as_slice() == b"w:t")
}

fn push_text(current: &mut Option<String>, text: &str) {
    if let Some(buf) = current.as_mut() {
        buf.push_str(text);
    }
}

/// Plain text reader, one paragraph per line
#[derive(Debug, Clone)]
pub struct TextSource {
    path: PathBuf,
}

impl TextSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl SourceReader for TextSource {
    fn read_paragraphs(&self) -> Result<Vec<String>> {
        ensure_exists(&self.path)?;
        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read {}", self.path.display()))?;
        Ok(content.lines().map(str::to_string).collect())
    }

    fn describe(&self) -> String {
        format!("text:{}", self.path.display())
    }
}

/// In-memory source, handy for tests and callers that already hold the text
#[derive(Debug, Clone, Default)]
pub struct LinesSource {
    lines: Vec<String>,
}

impl LinesSource {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }
}

impl SourceReader for LinesSource {
    fn read_paragraphs(&self) -> Result<Vec<String>> {
        Ok(self.lines.clone())
    }

    fn describe(&self) -> String {
        format!("memory:{} line(s)", self.lines.len())
    }
}
