//! Per-date pipeline orchestration.
//!
//! One date runs fetch -> parse -> snapshot -> cleanup. The three target
//! dates of a run are each guarded individually, so an unexpected failure
//! on one never suppresses the others; the snapshot simply keeps whatever
//! the last successful date wrote.

use crate::calendar::target_dates;
use crate::config::PipelineConfig;
use crate::fetch::{fetch_nav_archive, ArchiveSource, FetchError};
use crate::parse::{parse_nav_file, ParseError};
use crate::progress::RunObserver;
use crate::snapshot::{write_snapshot, SnapshotError};
use chrono::NaiveDate;
use std::path::PathBuf;
use thiserror::Error;

/// Unexpected failure inside one date's processing. Not produced for the
/// no-data case, which is a normal outcome.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Snapshot(#[from] SnapshotError),

    #[error("failed to delete {path}: {source}")]
    Cleanup {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Terminal state of one date's processing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateOutcome {
    /// The snapshot was rewritten with this many data rows.
    Written { rows: usize },
    /// No URL spelling produced an archive; the snapshot was not touched.
    NoData,
}

/// Run the full pipeline for one date.
pub fn process_date(
    source: &dyn ArchiveSource,
    config: &PipelineConfig,
    date: NaiveDate,
    observer: &dyn RunObserver,
) -> Result<DateOutcome, PipelineError> {
    observer.on_date_start(date);

    let Some(out_file) = fetch_nav_archive(source, config, date, observer)? else {
        observer.on_no_data(date);
        return Ok(DateOutcome::NoData);
    };

    let records = parse_nav_file(&out_file)?;
    let rows = write_snapshot(&records, config)?;
    observer.on_snapshot_written(&config.snapshot_path(), rows);

    std::fs::remove_file(&out_file).map_err(|source| PipelineError::Cleanup {
        path: out_file.clone(),
        source,
    })?;
    observer.on_cleanup(&out_file);

    Ok(DateOutcome::Written { rows })
}

/// Outcome tally for one three-date run.
#[derive(Debug)]
pub struct RunSummary {
    pub written: usize,
    pub no_data: usize,
    pub failed: usize,
    pub errors: Vec<(NaiveDate, PipelineError)>,
}

impl RunSummary {
    pub fn clean(&self) -> bool {
        self.failed == 0
    }
}

/// Process the three target dates derived from `today`, in fixed order,
/// each independently guarded.
pub fn run(
    source: &dyn ArchiveSource,
    config: &PipelineConfig,
    today: NaiveDate,
    observer: &dyn RunObserver,
) -> RunSummary {
    let mut summary = RunSummary {
        written: 0,
        no_data: 0,
        failed: 0,
        errors: Vec::new(),
    };

    for date in target_dates(today) {
        match process_date(source, config, date, observer) {
            Ok(DateOutcome::Written { .. }) => summary.written += 1,
            Ok(DateOutcome::NoData) => summary.no_data += 1,
            Err(error) => {
                observer.on_date_error(date, &error);
                summary.errors.push((date, error));
                summary.failed += 1;
            }
        }
    }

    summary
}
