//! navsnap CLI — daily NAV snapshot runs.
//!
//! Default run processes three target dates (two business-day offsets back,
//! then today); `--date` fetches one explicit date instead. All failures
//! are advisory log lines on stdout and the process exits 0 — an absent
//! publication is business as usual, not a fault.

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::Parser;
use navsnap_core::{
    process_date, run, HttpArchiveSource, PipelineConfig, RunObserver, StdoutObserver,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "navsnap", about = "Mirror the daily NPS NAV publication into a CSV snapshot")]
struct Cli {
    /// Fetch a single explicit date (DD-MM-YYYY) instead of the derived
    /// three-date set.
    #[arg(long)]
    date: Option<String>,

    /// Directory holding the snapshot file.
    #[arg(long, default_value = "data")]
    output_dir: PathBuf,

    /// Directory the downloaded .out file is extracted into.
    #[arg(long, default_value = ".")]
    work_dir: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = PipelineConfig {
        output_dir: cli.output_dir,
        work_dir: cli.work_dir,
        ..PipelineConfig::default()
    };
    let source = HttpArchiveSource::new(&config);
    let observer = StdoutObserver;

    match cli.date {
        Some(raw) => {
            let date = NaiveDate::parse_from_str(&raw, "%d-%m-%Y")
                .with_context(|| format!("invalid --date '{raw}', expected DD-MM-YYYY"))?;
            if let Err(error) = process_date(&source, &config, date, &observer) {
                observer.on_date_error(date, &error);
            }
        }
        None => {
            let summary = run(&source, &config, Local::now().date_naive(), &observer);
            println!(
                "Run complete: {} written, {} without data, {} failed",
                summary.written, summary.no_data, summary.failed
            );
        }
    }

    Ok(())
}
