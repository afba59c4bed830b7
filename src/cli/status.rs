//! `notelog status` command - Show what the next run would do

use std::path::PathBuf;

use clap::Args;
use colored::Colorize;

use crate::config::Config;
use crate::core::pipeline::Pipeline;
use crate::core::source::open_source;

#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Source document (overrides paths.source)
    #[arg(long)]
    pub source: Option<PathBuf>,

    /// Processed-set store (overrides paths.processed)
    #[arg(long)]
    pub processed: Option<PathBuf>,
}

pub fn execute(args: StatusArgs, mut config: Config) -> anyhow::Result<()> {
    if let Some(source) = args.source {
        config.paths.source = source;
    }
    if let Some(processed) = args.processed {
        config.paths.processed = processed;
    }

    let source = open_source(&config.paths.source);
    let status = Pipeline::new(&config).status(source.as_ref())?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    println!("📊 Notes\n");
    println!("  Dates in source:  {} ({} notes)", status.total_dates, status.total_notes);
    println!("  ├── Processed:    {}", status.processed);
    println!("  └── Pending:      {}", status.pending);

    if status.next_batch.is_empty() {
        println!("\n{} Nothing left to process", "✅".green());
    } else {
        println!("\n📅 Next batch:");
        for date in &status.next_batch {
            println!("  {}", date);
        }
    }

    if !status.stale.is_empty() {
        println!("\n🗂  Processed but no longer in source:");
        for key in &status.stale {
            println!("  {}", key);
        }
    }

    if status.orphaned_lines > 0 {
        println!(
            "\n{} {} line(s) before the first date were ignored",
            "⚠".yellow(),
            status.orphaned_lines
        );
    }

    if !status.anomalies.is_empty() {
        println!("\n{} Lines that look like dates but do not parse:", "⚠".yellow());
        for anomaly in &status.anomalies {
            println!("  {}", anomaly);
        }
    }

    println!("\n📁 Source: {}", config.paths.source.display());
    println!("📁 Processed: {}", config.paths.processed.display());

    Ok(())
}
