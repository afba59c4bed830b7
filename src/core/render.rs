//! Renderer - GroupedDocument to markdown
//!
//! # Layout
//! ```text
//! # <Title>
//!
//! ## Mois de <Month Year>
//!
//! ### <Category>
//! - <DD/MM/YYYY> - <note text>
//!
//! ### <Category2>
//! ...
//! ```

use std::fmt::Write;

use super::grouping::GroupedDocument;

pub const DEFAULT_TITLE: &str = "Journal des notes";

/// Render the document text
pub fn render(doc: &GroupedDocument, title: &str) -> String {
    let mut out = format!("# {}\n", title);

    for (month, sections) in doc.months() {
        out.push_str(&format!("\n## Mois de {}\n", month));

        for (category, entries) in sections.iter() {
            out.push_str(&format!("\n### {}\n", category));
            for entry in entries {
                out.push_str("- ");
                out.push_str(entry);
                out.push('\n');
            }
        }
    }

    out
}

/// Render into any `fmt::Write` sink
pub fn write_document<W: Write>(out: &mut W, doc: &GroupedDocument, title: &str) -> std::fmt::Result {
    writeln!(out, "# {}", title)?;

    for (month, sections) in doc.months() {
        writeln!(out)?;
        writeln!(out, "## Mois de {}", month)?;

        for (category, entries) in sections.iter() {
            writeln!(out)?;
            writeln!(out, "### {}", category)?;
            for entry in entries {
                writeln!(out, "- {}", entry)?;
            }
        }
    }

    Ok(())
}
