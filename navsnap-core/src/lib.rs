//! navsnap core — the daily NAV snapshot pipeline.
//!
//! This crate contains the whole pipeline for mirroring the NPS CRA daily
//! NAV publication into a local CSV snapshot:
//! - Target-date calendar math (business-day aware "yesterday")
//! - Archive fetcher with URL-spelling fallback and ZIP extraction
//! - Lenient six-field record parser
//! - Allow-list filtered snapshot writer
//! - Per-date pipeline orchestration with error isolation

pub mod calendar;
pub mod config;
pub mod fetch;
pub mod parse;
pub mod pipeline;
pub mod progress;
pub mod snapshot;

pub use config::PipelineConfig;
pub use fetch::{ArchiveResponse, ArchiveSource, FetchFailure, HttpArchiveSource};
pub use parse::NavRecord;
pub use pipeline::{process_date, run, DateOutcome, RunSummary};
pub use progress::{RunObserver, StdoutObserver};
