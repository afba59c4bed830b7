//! Pipeline - One incremental run
//!
//! # Steps
//! 1. Read paragraphs from the source, extract date-keyed notes
//! 2. Load the processed-set store
//! 3. Pick the batch: earliest dates not yet processed, up to `batch_size`
//! 4. Replay processed dates still present in the source, then the batch
//! 5. Render, then persist the output and the processed set together
//!
//! The skip gate is not part of this; callers decide before calling `run`.

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{debug, info};

use super::categorizer::Categorizer;
use super::date::NoteDate;
use super::extractor::{extract_notes, Anomaly, Extraction, NoteMap};
use super::grouping::GroupedDocument;
use super::processed::{ProcessedSet, ProcessedStore};
use super::render::render;
use super::source::SourceReader;
use super::staging::StagedFile;
use crate::config::Config;

/// Which dates a run replays and which it adds
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunPlan {
    /// Already processed and still in the source, chronological
    pub replay: Vec<NoteDate>,
    /// New dates for this run, chronological
    pub batch: Vec<NoteDate>,
    /// Unprocessed dates left for later runs
    pub remaining_after: usize,
    /// Processed keys with no matching date in the source
    pub stale: Vec<String>,
}

impl RunPlan {
    pub fn is_noop(&self) -> bool {
        self.batch.is_empty()
    }
}

/// Split the source dates into replay and batch
pub fn plan_run(notes: &NoteMap, processed: &ProcessedSet, batch_size: usize) -> RunPlan {
    let mut plan = RunPlan::default();
    let mut unprocessed = 0usize;

    for date in notes.keys() {
        if processed.contains(&date.key()) {
            plan.replay.push(*date);
        } else {
            if plan.batch.len() < batch_size {
                plan.batch.push(*date);
            }
            unprocessed += 1;
        }
    }

    plan.remaining_after = unprocessed - plan.batch.len();
    plan.stale = processed
        .iter()
        .filter(|key| {
            key.parse::<NoteDate>()
                .map(|date| !notes.contains_key(&date))
                .unwrap_or(true)
        })
        .cloned()
        .collect();

    plan
}

/// Group the replayed dates, then merge the batch on top
pub fn build_document(notes: &NoteMap, plan: &RunPlan, categorizer: &Categorizer) -> GroupedDocument {
    let mut existing = GroupedDocument::from_notes(&select(notes, &plan.replay), categorizer);
    let new = GroupedDocument::from_notes(&select(notes, &plan.batch), categorizer);
    existing.merge(new);
    existing
}

fn select(notes: &NoteMap, dates: &[NoteDate]) -> NoteMap {
    dates
        .iter()
        .filter_map(|date| notes.get(date).map(|items| (*date, items.clone())))
        .collect()
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Render but write nothing
    pub dry_run: bool,
}

/// Result of a run that added dates
#[derive(Debug, Clone)]
pub struct RunReport {
    pub added: Vec<NoteDate>,
    pub remaining: usize,
    pub entries_added: usize,
    pub document: String,
    pub processed: ProcessedSet,
    pub anomalies: Vec<Anomaly>,
    pub persisted: bool,
}

#[derive(Debug, Clone)]
pub enum RunOutcome {
    /// Every date in the source is already in the output
    NothingToProcess { total_dates: usize },
    Updated(RunReport),
}

/// Drives a run against the configured files
pub struct Pipeline<'a> {
    config: &'a Config,
    categorizer: Categorizer,
    store: ProcessedStore,
}

impl<'a> Pipeline<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self {
            config,
            categorizer: Categorizer::from_config(&config.categories),
            store: ProcessedStore::new(&config.paths.processed),
        }
    }

    fn extract(&self, source: &dyn SourceReader) -> Result<Extraction> {
        let paragraphs = source
            .read_paragraphs()
            .with_context(|| format!("Failed to read source {}", source.describe()))?;
        let extraction = extract_notes(&paragraphs);
        info!(
            source = %source.describe(),
            paragraphs = paragraphs.len(),
            dates = extraction.notes.len(),
            anomalies = extraction.anomalies.len(),
            "source parsed"
        );
        Ok(extraction)
    }

    /// Process the next batch of dates
    pub fn run(&self, source: &dyn SourceReader, options: RunOptions) -> Result<RunOutcome> {
        let extraction = self.extract(source)?;
        let mut processed = self.store.load()?;
        let plan = plan_run(&extraction.notes, &processed, self.config.run.batch_size);

        for key in &plan.stale {
            debug!(date = %key, "processed date not in source, left out of replay");
        }

        if plan.is_noop() {
            info!("nothing left to process");
            return Ok(RunOutcome::NothingToProcess {
                total_dates: extraction.notes.len(),
            });
        }

        let doc = build_document(&extraction.notes, &plan, &self.categorizer);
        let document = render(&doc, &self.config.render.title);
        let entries_added = plan
            .batch
            .iter()
            .filter_map(|date| extraction.notes.get(date))
            .map(Vec::len)
            .sum();

        processed.extend(plan.batch.iter().map(NoteDate::key));

        if !options.dry_run {
            self.persist(&document, &processed)?;
        }

        info!(
            added = plan.batch.len(),
            remaining = plan.remaining_after,
            dry_run = options.dry_run,
            "run complete"
        );

        Ok(RunOutcome::Updated(RunReport {
            added: plan.batch,
            remaining: plan.remaining_after,
            entries_added,
            document,
            processed,
            anomalies: extraction.anomalies,
            persisted: !options.dry_run,
        }))
    }

    /// Stage both files before replacing either
    fn persist(&self, document: &str, processed: &ProcessedSet) -> Result<()> {
        let output = StagedFile::write(&self.config.paths.output, document)?;
        let store = self.store.stage(processed)?;

        output.commit()?;
        store.commit()?;
        Ok(())
    }

    /// Summary of what a run would do, without writing anything
    pub fn status(&self, source: &dyn SourceReader) -> Result<StatusReport> {
        let extraction = self.extract(source)?;
        let processed = self.store.load()?;
        let plan = plan_run(&extraction.notes, &processed, self.config.run.batch_size);

        Ok(StatusReport {
            total_dates: extraction.notes.len(),
            total_notes: extraction.note_count(),
            processed: plan.replay.len(),
            pending: plan.batch.len() + plan.remaining_after,
            next_batch: plan.batch.iter().map(NoteDate::key).collect(),
            stale: plan.stale,
            orphaned_lines: extraction.orphaned,
            anomalies: extraction
                .anomalies
                .into_iter()
                .map(|a| format!("line {}: {}", a.line_no, a.text))
                .collect(),
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StatusReport {
    pub total_dates: usize,
    pub total_notes: usize,
    pub processed: usize,
    pub pending: usize,
    pub next_batch: Vec<String>,
    pub stale: Vec<String>,
    pub orphaned_lines: usize,
    pub anomalies: Vec<String>,
}
