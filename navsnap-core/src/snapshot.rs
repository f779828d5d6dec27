//! Snapshot writer.
//!
//! The snapshot is a single CSV fully rewritten on every successful date,
//! holding only allow-listed schemes in input order. There is no merge and
//! no partial-write recovery: a torn file is repaired by the next
//! successful run overwriting it.

use crate::config::PipelineConfig;
use crate::parse::NavRecord;
use std::path::PathBuf;
use thiserror::Error;

pub const SNAPSHOT_HEADER: [&str; 4] = ["SCHEME CODE", "SCHEME NAME", "NAV", "DATE"];

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("failed to create output directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write snapshot {path}: {source}")]
    Write { path: PathBuf, source: csv::Error },
}

/// Overwrite the snapshot with the allow-listed subset of `records`.
///
/// Returns the number of data rows written (header excluded).
pub fn write_snapshot(
    records: &[NavRecord],
    config: &PipelineConfig,
) -> Result<usize, SnapshotError> {
    std::fs::create_dir_all(&config.output_dir).map_err(|source| SnapshotError::CreateDir {
        path: config.output_dir.clone(),
        source,
    })?;

    let path = config.snapshot_path();
    let write_err = |source| SnapshotError::Write {
        path: path.clone(),
        source,
    };

    let mut writer = csv::Writer::from_path(&path).map_err(write_err)?;
    writer.write_record(SNAPSHOT_HEADER).map_err(write_err)?;

    let mut rows = 0;
    for record in records {
        if !config.scheme_codes.iter().any(|c| c == &record.scheme_code) {
            continue;
        }
        writer
            .write_record([
                &record.scheme_code,
                &record.scheme_name,
                &record.nav,
                &record.date,
            ])
            .map_err(write_err)?;
        rows += 1;
    }

    writer.flush().map_err(|e| write_err(e.into()))?;
    Ok(rows)
}
