//! NAV archive fetcher.
//!
//! The registry publishes one ZIP per working day, but the file name's
//! casing and spacing have varied over time, so the fetcher walks a fixed
//! ordered list of URL spellings and takes the first that yields a readable
//! archive with a `.out` member. Certificate validation is disabled because
//! requests go to the registry's literal IP while TLS presents the domain
//! certificate.
//!
//! Absence of the file everywhere is a normal outcome (holiday, not yet
//! published), reported as `Ok(None)` rather than an error.

use crate::config::PipelineConfig;
use crate::progress::RunObserver;
use chrono::NaiveDate;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, HOST, USER_AGENT};
use std::io::{Cursor, Read};
use std::path::{Path, PathBuf};
use thiserror::Error;
use zip::ZipArchive;

const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
const BROWSER_ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,\
     image/avif,image/webp,image/apng,*/*;q=0.8";

/// Why one candidate URL did not produce data. Advisory only; the fetch
/// loop always moves on to the next spelling.
#[derive(Debug, Clone, Error)]
pub enum FetchFailure {
    #[error("file not published (404)")]
    NotFound,

    #[error("unexpected HTTP status {0}")]
    HttpStatus(u16),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("unreadable ZIP archive: {0}")]
    BadArchive(String),

    #[error("archive has no .out member")]
    NoDataMember,
}

/// Unexpected local failure while materializing an archive member.
///
/// Unlike [`FetchFailure`] this aborts the date's run; it means the archive
/// was fine but the working directory was not.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to extract member {member}: {source}")]
    Extract {
        member: String,
        source: std::io::Error,
    },
}

/// Raw response for one candidate URL.
#[derive(Debug, Clone)]
pub struct ArchiveResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

/// Transport seam for the fetcher, so tests can serve canned archives
/// without a network.
pub trait ArchiveSource {
    /// Human-readable name of this source.
    fn name(&self) -> &str;

    /// Issue one GET. Transport-level problems come back as
    /// [`FetchFailure::Transport`]; HTTP status handling is the caller's.
    fn get(&self, url: &str) -> Result<ArchiveResponse, FetchFailure>;
}

/// Production source: blocking HTTP GET with browser headers, fixed
/// timeout, and certificate validation off.
pub struct HttpArchiveSource {
    client: reqwest::blocking::Client,
}

impl HttpArchiveSource {
    pub fn new(config: &PipelineConfig) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));
        headers.insert(ACCEPT, HeaderValue::from_static(BROWSER_ACCEPT));
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));
        headers.insert(
            HOST,
            HeaderValue::from_str(&config.host).expect("host is not a valid header value"),
        );

        let client = reqwest::blocking::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .danger_accept_invalid_certs(true)
            .build()
            .expect("failed to build HTTP client");

        Self { client }
    }
}

impl ArchiveSource for HttpArchiveSource {
    fn name(&self) -> &str {
        "nps_registry"
    }

    fn get(&self, url: &str) -> Result<ArchiveResponse, FetchFailure> {
        let resp = self
            .client
            .get(url)
            .send()
            .map_err(|e| FetchFailure::Transport(e.to_string()))?;
        let status = resp.status().as_u16();
        let body = resp
            .bytes()
            .map_err(|e| FetchFailure::Transport(e.to_string()))?
            .to_vec();
        Ok(ArchiveResponse { status, body })
    }
}

/// Try every URL spelling for a date until one yields an archive with a
/// `.out` member; extract it into the work directory.
///
/// Returns the extracted file's path, or `None` when no spelling produced
/// data. Per-URL failures are reported through the observer and never abort
/// the loop; only a local extraction failure does.
pub fn fetch_nav_archive(
    source: &dyn ArchiveSource,
    config: &PipelineConfig,
    date: NaiveDate,
    observer: &dyn RunObserver,
) -> Result<Option<PathBuf>, FetchError> {
    for url in config.candidate_urls(date) {
        observer.on_url_attempt(&url);

        let resp = match source.get(&url) {
            Ok(resp) => resp,
            Err(failure) => {
                observer.on_url_failure(&url, &failure);
                continue;
            }
        };

        match resp.status {
            200 => {}
            404 => {
                observer.on_url_failure(&url, &FetchFailure::NotFound);
                continue;
            }
            other => {
                observer.on_url_failure(&url, &FetchFailure::HttpStatus(other));
                continue;
            }
        }

        match extract_out_member(&resp.body, &config.work_dir)? {
            Ok(path) => {
                observer.on_url_success(&url, &path);
                return Ok(Some(path));
            }
            Err(failure) => {
                observer.on_url_failure(&url, &failure);
                continue;
            }
        }
    }

    Ok(None)
}

/// Extract the first `.out` member of a ZIP body into `work_dir`.
///
/// The outer error is a local I/O fault (aborts the run); the inner one is
/// an archive-level miss (advances to the next URL spelling).
fn extract_out_member(
    body: &[u8],
    work_dir: &Path,
) -> Result<Result<PathBuf, FetchFailure>, FetchError> {
    let mut archive = match ZipArchive::new(Cursor::new(body)) {
        Ok(archive) => archive,
        Err(e) => return Ok(Err(FetchFailure::BadArchive(e.to_string()))),
    };

    let mut member_index = None;
    for i in 0..archive.len() {
        match archive.by_index(i) {
            Ok(entry) if entry.name().ends_with(".out") => {
                member_index = Some(i);
                break;
            }
            Ok(_) => {}
            Err(e) => return Ok(Err(FetchFailure::BadArchive(e.to_string()))),
        }
    }

    let Some(index) = member_index else {
        return Ok(Err(FetchFailure::NoDataMember));
    };

    let mut entry = match archive.by_index(index) {
        Ok(entry) => entry,
        Err(e) => return Ok(Err(FetchFailure::BadArchive(e.to_string()))),
    };

    // Member names can carry directory components; only the file name is
    // kept so extraction stays inside the work directory.
    let member = entry.name().to_string();
    let file_name = match Path::new(&member).file_name() {
        Some(name) => name.to_owned(),
        None => return Ok(Err(FetchFailure::BadArchive(format!(
            "member has no usable file name: {member}"
        )))),
    };

    let target = work_dir.join(file_name);
    let mut contents = Vec::new();
    if let Err(e) = entry.read_to_end(&mut contents) {
        return Ok(Err(FetchFailure::BadArchive(e.to_string())));
    }
    std::fs::write(&target, contents).map_err(|source| FetchError::Extract {
        member: member.clone(),
        source,
    })?;

    Ok(Ok(target))
}
