//! End-to-end runs against files in a scratch directory

use std::fs;
use std::path::Path;

use anyhow::Result;
use tempfile::{tempdir, TempDir};

use notelog::core::processed::ProcessedStore;
use notelog::{Config, LinesSource, Pipeline, RunOptions, RunOutcome, RunReport};

fn config_in(dir: &Path) -> Config {
    let mut config = Config::default();
    config.paths.source = dir.join("notes.txt");
    config.paths.output = dir.join("README.md");
    config.paths.processed = dir.join("processed_dates.txt");
    config
}

fn four_dates() -> LinesSource {
    LinesSource::new([
        "01/01/2025",
        "Astuces: clear cache",
        "02/01/2025",
        "random note",
        "03/01/2025",
        "#Perf improve load",
        "04/01/2025",
        "Bugs: crash on save",
    ])
}

fn updated(outcome: RunOutcome) -> RunReport {
    match outcome {
        RunOutcome::Updated(report) => report,
        other => panic!("expected an update, got {:?}", other),
    }
}

fn setup() -> (TempDir, Config) {
    let dir = tempdir().unwrap();
    let config = config_in(dir.path());
    (dir, config)
}

#[test]
fn test_two_runs_scenario() -> Result<()> {
    let (_dir, config) = setup();
    let pipeline = Pipeline::new(&config);
    let source = four_dates();

    let first = updated(pipeline.run(&source, RunOptions::default())?);
    assert_eq!(first.added.len(), 3);
    assert_eq!(first.remaining, 1);
    assert_eq!(first.entries_added, 3);

    let readme = fs::read_to_string(&config.paths.output)?;
    assert_eq!(
        readme,
        "\
# Journal des notes

## Mois de January 2025

### Astuces
- 01/01/2025 - Astuces: clear cache

### Divers
- 02/01/2025 - random note

### Perf
- 03/01/2025 - #Perf improve load
"
    );

    let processed = ProcessedStore::new(&config.paths.processed).load()?;
    let keys: Vec<_> = processed.iter().cloned().collect();
    assert_eq!(keys, vec!["01/01/2025", "02/01/2025", "03/01/2025"]);

    let second = updated(pipeline.run(&source, RunOptions::default())?);
    assert_eq!(second.added.len(), 1);
    assert_eq!(second.added[0].key(), "04/01/2025");
    assert_eq!(second.remaining, 0);

    let readme = fs::read_to_string(&config.paths.output)?;
    assert_eq!(
        readme,
        "\
# Journal des notes

## Mois de January 2025

### Astuces
- 01/01/2025 - Astuces: clear cache

### Divers
- 02/01/2025 - random note

### Perf
- 03/01/2025 - #Perf improve load

### Bugs
- 04/01/2025 - Bugs: crash on save
"
    );
    assert_eq!(ProcessedStore::new(&config.paths.processed).load()?.len(), 4);
    Ok(())
}

#[test]
fn test_third_run_is_noop_and_writes_nothing() -> Result<()> {
    let (_dir, config) = setup();
    let pipeline = Pipeline::new(&config);
    let source = four_dates();

    pipeline.run(&source, RunOptions::default())?;
    pipeline.run(&source, RunOptions::default())?;
    let before = fs::read_to_string(&config.paths.output)?;
    fs::write(&config.paths.output, "sentinel")?;

    match pipeline.run(&source, RunOptions::default())? {
        RunOutcome::NothingToProcess { total_dates } => assert_eq!(total_dates, 4),
        other => panic!("expected no-op, got {:?}", other),
    }

    assert_eq!(fs::read_to_string(&config.paths.output)?, "sentinel");
    assert!(before.contains("Bugs"));
    Ok(())
}

#[test]
fn test_no_entry_duplicated_across_runs() -> Result<()> {
    let (_dir, config) = setup();
    let pipeline = Pipeline::new(&config);
    let source = four_dates();

    pipeline.run(&source, RunOptions::default())?;
    pipeline.run(&source, RunOptions::default())?;
    pipeline.run(&source, RunOptions::default())?;

    let readme = fs::read_to_string(&config.paths.output)?;
    for line in readme.lines().filter(|l| l.starts_with("- ")) {
        assert_eq!(readme.matches(line).count(), 1, "duplicated: {}", line);
    }
    assert_eq!(readme.lines().filter(|l| l.starts_with("- ")).count(), 4);
    Ok(())
}

#[test]
fn test_batch_bound_follows_config() -> Result<()> {
    let (_dir, mut config) = setup();
    config.run.batch_size = 1;
    let pipeline = Pipeline::new(&config);

    for expected in ["01/01/2025", "02/01/2025", "03/01/2025", "04/01/2025"] {
        let report = updated(pipeline.run(&four_dates(), RunOptions::default())?);
        assert_eq!(report.added.len(), 1);
        assert_eq!(report.added[0].key(), expected);
    }
    Ok(())
}

#[test]
fn test_dry_run_persists_nothing() -> Result<()> {
    let (_dir, config) = setup();
    let pipeline = Pipeline::new(&config);

    let report = updated(pipeline.run(&four_dates(), RunOptions { dry_run: true })?);
    assert!(!report.persisted);
    assert!(report.document.contains("### Astuces"));
    assert!(!config.paths.output.exists());
    assert!(!config.paths.processed.exists());
    Ok(())
}

#[test]
fn test_new_bucket_entries_follow_existing() -> Result<()> {
    let (_dir, config) = setup();
    let pipeline = Pipeline::new(&config);
    let source = LinesSource::new([
        "01/01/2025",
        "Bugs: one",
        "02/01/2025",
        "Bugs: two",
        "03/01/2025",
        "Bugs: three",
        "04/01/2025",
        "Bugs: four",
        "05/01/2025",
        "Bugs: five",
    ]);

    pipeline.run(&source, RunOptions::default())?;
    let report = updated(pipeline.run(&source, RunOptions::default())?);

    let bugs: Vec<_> = report
        .document
        .lines()
        .filter(|l| l.starts_with("- "))
        .collect();
    assert_eq!(
        bugs,
        vec![
            "- 01/01/2025 - Bugs: one",
            "- 02/01/2025 - Bugs: two",
            "- 03/01/2025 - Bugs: three",
            "- 04/01/2025 - Bugs: four",
            "- 05/01/2025 - Bugs: five",
        ]
    );
    Ok(())
}

#[test]
fn test_new_month_appended_after_existing() -> Result<()> {
    let (_dir, config) = setup();
    fs::write(&config.paths.processed, "10/02/2025\n")?;
    let pipeline = Pipeline::new(&config);
    let source = LinesSource::new(["15/01/2025", "january", "10/02/2025", "february"]);

    let report = updated(pipeline.run(&source, RunOptions::default())?);
    let headings: Vec<_> = report
        .document
        .lines()
        .filter(|l| l.starts_with("## "))
        .collect();
    assert_eq!(headings, vec!["## Mois de February 2025", "## Mois de January 2025"]);
    Ok(())
}

#[test]
fn test_unpadded_processed_key_is_replayed() -> Result<()> {
    let (_dir, config) = setup();
    fs::write(&config.paths.processed, "1/1/2025\n")?;
    let pipeline = Pipeline::new(&config);
    let source = LinesSource::new(["01/01/2025", "old", "02/01/2025", "new"]);

    let report = updated(pipeline.run(&source, RunOptions::default())?);
    assert_eq!(report.added.len(), 1);
    assert_eq!(report.added[0].key(), "02/01/2025");
    assert_eq!(report.document.matches("01/01/2025 - old").count(), 1);
    assert!(report.processed.contains("01/01/2025"));
    assert!(!report.processed.contains("1/1/2025"));
    Ok(())
}

#[test]
fn test_removed_source_date_dropped_from_replay() -> Result<()> {
    let (_dir, config) = setup();
    fs::write(&config.paths.processed, "01/01/2025\n02/01/2025\n")?;
    let pipeline = Pipeline::new(&config);
    let source = LinesSource::new(["02/01/2025", "kept", "03/01/2025", "new"]);

    let report = updated(pipeline.run(&source, RunOptions::default())?);
    assert!(!report.document.contains("01/01/2025"));
    assert!(report.document.contains("02/01/2025 - kept"));
    assert!(report.document.contains("03/01/2025 - new"));
    // The stale key stays in the store
    assert!(report.processed.contains("01/01/2025"));
    Ok(())
}

#[test]
fn test_empty_date_never_processed() -> Result<()> {
    let (_dir, config) = setup();
    let pipeline = Pipeline::new(&config);
    let source = LinesSource::new(["15/03/2025", "16/03/2025", "note"]);

    let report = updated(pipeline.run(&source, RunOptions::default())?);
    assert_eq!(report.added.len(), 1);
    assert_eq!(report.added[0].key(), "16/03/2025");
    assert!(!report.processed.contains("15/03/2025"));
    Ok(())
}

#[test]
fn test_unwritable_output_leaves_store_untouched() -> Result<()> {
    let (dir, mut config) = setup();
    // A directory where the output file should be cannot be replaced by a file
    let blocked = dir.path().join("blocked");
    fs::create_dir_all(blocked.join("inner"))?;
    config.paths.output = blocked;
    let pipeline = Pipeline::new(&config);

    assert!(pipeline.run(&four_dates(), RunOptions::default()).is_err());
    assert!(ProcessedStore::new(&config.paths.processed).load()?.is_empty());
    Ok(())
}

#[test]
fn test_status_report() -> Result<()> {
    let (_dir, config) = setup();
    fs::write(&config.paths.processed, "01/01/2025\n31/12/2020\n")?;
    let pipeline = Pipeline::new(&config);
    let source = LinesSource::new([
        "intro line",
        "01/01/2025",
        "a",
        "31/02/2025",
        "02/01/2025",
        "b",
    ]);

    let status = pipeline.status(&source)?;
    assert_eq!(status.total_dates, 2);
    assert_eq!(status.total_notes, 3);
    assert_eq!(status.processed, 1);
    assert_eq!(status.pending, 1);
    assert_eq!(status.next_batch, vec!["02/01/2025"]);
    assert_eq!(status.stale, vec!["31/12/2020"]);
    assert_eq!(status.orphaned_lines, 1);
    assert_eq!(status.anomalies, vec!["line 4: 31/02/2025"]);
    Ok(())
}
