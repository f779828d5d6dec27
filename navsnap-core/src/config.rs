//! Pipeline configuration.
//!
//! All fixed operational knobs live here as one immutable struct passed into
//! the pipeline, so tests can substitute their own templates, allow-list,
//! and directories instead of patching module globals.

use chrono::NaiveDate;
use std::path::PathBuf;
use std::time::Duration;

/// Registry hostname carried in the `Host` header.
pub const REGISTRY_HOST: &str = "npscra.nsdl.co.in";

/// The registry's DNS is unreliable from some networks; requests go straight
/// to this address while the `Host` header keeps the domain.
pub const REGISTRY_DIRECT_IP: &str = "144.126.254.118";

/// Immutable configuration for one pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Known spellings of the publication URL, in the order to try them.
    /// Each contains a `{date}` token substituted with DDMMYYYY.
    pub url_templates: Vec<String>,
    /// Hostname sent in the `Host` header and replaced by `direct_ip` in
    /// the request URL.
    pub host: String,
    /// Literal address the requests are actually sent to.
    pub direct_ip: String,
    /// Scheme codes retained in the snapshot; everything else is dropped.
    pub scheme_codes: Vec<String>,
    /// Directory holding the snapshot file. Created if absent.
    pub output_dir: PathBuf,
    /// Snapshot file name inside `output_dir`.
    pub snapshot_file: String,
    /// Directory the `.out` archive member is extracted into.
    pub work_dir: PathBuf,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            url_templates: vec![
                format!("https://{REGISTRY_HOST}/download/NAV_File_{{date}}.zip"),
                format!("https://{REGISTRY_HOST}/download/NAV_FILE_{{date}}.zip"),
                format!("https://{REGISTRY_HOST}/download/NAV_file_{{date}}.zip"),
                format!("https://{REGISTRY_HOST}/download/NAV%20File%20{{date}}.zip"),
                format!("https://{REGISTRY_HOST}/download/NAV%20FILE%20{{date}}.zip"),
                format!("https://{REGISTRY_HOST}/download/nav%20file%20{{date}}.zip"),
            ],
            host: REGISTRY_HOST.to_string(),
            direct_ip: REGISTRY_DIRECT_IP.to_string(),
            scheme_codes: vec![
                "SM007001".to_string(),
                "SM007002".to_string(),
                "SM007003".to_string(),
            ],
            output_dir: PathBuf::from("data"),
            snapshot_file: "nav.csv".to_string(),
            work_dir: PathBuf::from("."),
            timeout: Duration::from_secs(30),
        }
    }
}

impl PipelineConfig {
    /// Expand every URL template for a date, preserving template order.
    ///
    /// The date token is DDMMYYYY and the registry hostname is swapped for
    /// the direct IP; the fetcher still presents the hostname via `Host`.
    pub fn candidate_urls(&self, date: NaiveDate) -> Vec<String> {
        let token = date.format("%d%m%Y").to_string();
        self.url_templates
            .iter()
            .map(|template| {
                template
                    .replace("{date}", &token)
                    .replace(&self.host, &self.direct_ip)
            })
            .collect()
    }

    /// Full path of the snapshot file.
    pub fn snapshot_path(&self) -> PathBuf {
        self.output_dir.join(&self.snapshot_file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn candidate_urls_substitute_date_token() {
        let config = PipelineConfig::default();
        let date = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
        let urls = config.candidate_urls(date);

        assert_eq!(urls.len(), 6);
        for url in &urls {
            assert!(url.contains("31012024"), "missing date token in {url}");
            assert!(!url.contains("{date}"));
        }
    }

    #[test]
    fn candidate_urls_swap_host_for_direct_ip() {
        let config = PipelineConfig::default();
        let date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();

        for url in config.candidate_urls(date) {
            assert!(url.contains(REGISTRY_DIRECT_IP));
            assert!(!url.contains(REGISTRY_HOST));
        }
    }

    #[test]
    fn candidate_urls_preserve_template_order() {
        let config = PipelineConfig {
            url_templates: vec![
                "http://x/a_{date}.zip".into(),
                "http://x/b_{date}.zip".into(),
            ],
            ..PipelineConfig::default()
        };
        let date = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
        let urls = config.candidate_urls(date);

        assert_eq!(urls[0], "http://x/a_03062024.zip");
        assert_eq!(urls[1], "http://x/b_03062024.zip");
    }
}
