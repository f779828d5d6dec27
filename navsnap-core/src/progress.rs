//! Run observation and logging.
//!
//! The pipeline reports every step through this trait so the CLI can print
//! progress and tests can record it. All reporting is advisory; nothing an
//! observer does feeds back into control flow.

use crate::fetch::FetchFailure;
use crate::pipeline::PipelineError;
use chrono::NaiveDate;
use std::path::Path;

/// Callbacks for one pipeline run.
pub trait RunObserver {
    /// A date's processing is starting.
    fn on_date_start(&self, date: NaiveDate);

    /// One candidate URL is about to be requested.
    fn on_url_attempt(&self, url: &str);

    /// A candidate URL did not produce data; the next spelling is tried.
    fn on_url_failure(&self, url: &str, failure: &FetchFailure);

    /// A candidate URL produced an archive; `extracted` is the `.out` file.
    fn on_url_success(&self, url: &str, extracted: &Path);

    /// The snapshot was rewritten with `rows` data rows.
    fn on_snapshot_written(&self, path: &Path, rows: usize);

    /// The extracted working file was deleted.
    fn on_cleanup(&self, path: &Path);

    /// Every URL spelling was exhausted; a normal outcome.
    fn on_no_data(&self, date: NaiveDate);

    /// A date's processing hit an unexpected error; remaining dates still run.
    fn on_date_error(&self, date: NaiveDate, error: &PipelineError);
}

/// Observer that prints to stdout, the process's only log channel.
pub struct StdoutObserver;

impl RunObserver for StdoutObserver {
    fn on_date_start(&self, date: NaiveDate) {
        println!("Fetching NAV data for {}...", date.format("%d-%m-%Y"));
    }

    fn on_url_attempt(&self, url: &str) {
        println!("Trying URL: {url}");
    }

    fn on_url_failure(&self, url: &str, failure: &FetchFailure) {
        match failure {
            FetchFailure::NotFound => println!("NAV file not available at {url}"),
            other => println!("Failed to download from {url}: {other}"),
        }
    }

    fn on_url_success(&self, url: &str, extracted: &Path) {
        println!("Successfully downloaded from: {url}");
        println!("Extracted: {}", extracted.display());
    }

    fn on_snapshot_written(&self, path: &Path, rows: usize) {
        println!("Updated {} ({rows} rows)", path.display());
    }

    fn on_cleanup(&self, path: &Path) {
        println!("Deleted {}", path.display());
    }

    fn on_no_data(&self, date: NaiveDate) {
        println!("No NAV data available for {}.", date.format("%d-%m-%Y"));
    }

    fn on_date_error(&self, date: NaiveDate, error: &PipelineError) {
        println!("Error processing {}: {error}", date.format("%d-%m-%Y"));
    }
}
