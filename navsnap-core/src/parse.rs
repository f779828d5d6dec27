//! Lenient parser for the extracted `.out` flat file.
//!
//! One record per line, six comma-separated fields, no quoting or escaping
//! in the published format. Lines with any other field count are dropped
//! without comment — the publication carries occasional banner and footer
//! lines and that filtering is deliberate policy, not error recovery.

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// One published NAV line. All fields are kept as the registry printed
/// them; the NAV value in particular is never parsed numerically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavRecord {
    /// Publication date as printed, DD/MM/YYYY.
    pub date: String,
    /// Pension fund manager code.
    pub pfm_code: String,
    /// Pension fund manager name.
    pub pfm_name: String,
    pub scheme_code: String,
    pub scheme_name: String,
    /// Net asset value, literal string.
    pub nav: String,
}

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Read every well-formed record from an extracted `.out` file.
pub fn parse_nav_file(path: &Path) -> Result<Vec<NavRecord>, ParseError> {
    let io_err = |source| ParseError::Io {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(io_err)?;
    let reader = BufReader::new(file);

    let mut records = Vec::new();
    for line in reader.lines() {
        let line = line.map_err(io_err)?;
        let fields: Vec<&str> = line.trim().split(',').collect();
        if fields.len() != 6 {
            continue;
        }
        records.push(NavRecord {
            date: fields[0].to_string(),
            pfm_code: fields[1].to_string(),
            pfm_name: fields[2].to_string(),
            scheme_code: fields[3].to_string(),
            scheme_name: fields[4].to_string(),
            nav: fields[5].to_string(),
        });
    }

    Ok(records)
}
