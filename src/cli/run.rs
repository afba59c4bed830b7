//! `notelog run` command
//!
//! Adds the next batch of dated notes to the changelog.
//!
//! # Usage
//! ```bash
//! notelog run                      # may skip today (see run.skip_probability)
//! notelog run --force              # never skip
//! notelog run --dry-run            # print the document, write nothing
//! notelog run --batch-size 5 --source notes.docx --output CHANGELOG.md
//! ```

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use crate::config::Config;
use crate::core::gate::{NeverSkip, RandomSkipGate, SkipGate};
use crate::core::pipeline::{Pipeline, RunOptions, RunOutcome};
use crate::core::source::open_source;

#[derive(Args, Debug, Default)]
pub struct RunArgs {
    /// Run even if the skip gate would skip today
    #[arg(short, long)]
    pub force: bool,

    /// Print the rendered document instead of writing files (implies --force)
    #[arg(long)]
    pub dry_run: bool,

    /// Maximum number of new dates to add
    #[arg(short, long)]
    pub batch_size: Option<usize>,

    /// Source document (overrides paths.source)
    #[arg(long)]
    pub source: Option<PathBuf>,

    /// Output document (overrides paths.output)
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Processed-set store (overrides paths.processed)
    #[arg(long)]
    pub processed: Option<PathBuf>,
}

impl RunArgs {
    /// Fold command-line overrides into the loaded config
    pub fn apply(&self, config: &mut Config) -> Result<()> {
        if let Some(size) = self.batch_size {
            config.run.batch_size = size;
        }
        if let Some(source) = &self.source {
            config.paths.source = source.clone();
        }
        if let Some(output) = &self.output {
            config.paths.output = output.clone();
        }
        if let Some(processed) = &self.processed {
            config.paths.processed = processed.clone();
        }
        config.validate()?;
        Ok(())
    }
}

pub fn run(args: RunArgs, mut config: Config) -> Result<()> {
    args.apply(&mut config)?;

    let mut gate: Box<dyn SkipGate> = if args.force || args.dry_run {
        Box::new(NeverSkip)
    } else {
        Box::new(RandomSkipGate::new(config.run.skip_probability))
    };

    execute(&args, &config, gate.as_mut())
}

/// Run with an explicit gate
pub fn execute(args: &RunArgs, config: &Config, gate: &mut dyn SkipGate) -> Result<()> {
    if gate.should_skip() {
        tracing::info!("skip gate triggered");
        println!("{} Aujourd'hui on ne met pas à jour.", "⏭️ ".yellow());
        return Ok(());
    }

    let source = open_source(&config.paths.source);
    let pipeline = Pipeline::new(config);
    let options = RunOptions {
        dry_run: args.dry_run,
    };

    match pipeline.run(source.as_ref(), options)? {
        RunOutcome::NothingToProcess { total_dates } => {
            println!(
                "{} Toutes les notes ont déjà été traitées. ({} date(s))",
                "✅".green(),
                total_dates
            );
        }
        RunOutcome::Updated(report) => {
            if args.dry_run {
                print!("{}", report.document);
                eprintln!(
                    "{} dry run: {} date(s) would be added, nothing written",
                    "ℹ".blue(),
                    report.added.len()
                );
                return Ok(());
            }

            println!(
                "{} Ajouté {} nouvelles dates dans le {} ({} note(s))",
                "✨".green(),
                report.added.len(),
                config.paths.output.display(),
                report.entries_added
            );
            for date in &report.added {
                println!("   {}", date);
            }
            if report.remaining > 0 {
                println!("   {} date(s) left for later runs", report.remaining);
            }
            if !report.anomalies.is_empty() {
                eprintln!(
                    "{} {} line(s) looked like dates but did not parse (see `notelog status`)",
                    "⚠".yellow(),
                    report.anomalies.len()
                );
            }
        }
    }

    Ok(())
}
