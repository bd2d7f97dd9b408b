// src/core/models.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use strum::{Display, EnumString};

// --- Core Data Models ---

/// The serialization format used when exporting a finished report.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum OutputFormat {
    Json,
    Text,
}

/// The full configuration for one scan run.
///
/// A config is assembled before the scan starts and is treated as immutable
/// from that point on; the finished report embeds a copy of it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Target domain, normalized: lowercase, no scheme, no `www.` prefix.
    pub target_domain: String,
    /// Probe every discovered host for liveness.
    pub check_active: bool,
    /// Flag archived URLs whose query parameters match the keyword list.
    pub check_vulnerable: bool,
    /// Optional path to a custom keyword list (one keyword per line).
    pub custom_wordlist: Option<PathBuf>,
    /// Upper bound on simultaneously in-flight liveness probes.
    pub max_concurrent_requests: usize,
    /// Per-request timeout, in seconds.
    pub timeout_secs: u64,
    pub user_agent: String,
    pub output_format: OutputFormat,
    /// Verify TLS certificates during liveness probes.
    pub verify_ssl: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            target_domain: String::new(),
            check_active: false,
            check_vulnerable: false,
            custom_wordlist: None,
            max_concurrent_requests: 50,
            timeout_secs: 10,
            user_agent: format!("WaybackCrawler/{}", env!("CARGO_PKG_VERSION")),
            output_format: OutputFormat::Json,
            verify_ssl: true,
        }
    }
}

/// One discovered subdomain plus optional liveness enrichment.
///
/// Every enrichment field is an explicit `Option`: `None` means "not
/// determined", either because probing was skipped or because the host was
/// unreachable. A record is created once and never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subdomain {
    /// The full candidate hostname (always a strict subdomain of the target).
    pub url: String,
    /// Final HTTP status of the probe; `None` if unreachable or not probed.
    pub status: Option<u16>,
    pub last_checked: Option<DateTime<Utc>>,
    pub is_active: bool,
    /// Byte length of the fully drained response body.
    pub response_length: Option<usize>,
    /// Value of the `Server` response header; `None` when not provided.
    pub server: Option<String>,
}

impl Subdomain {
    /// Creates a record with no enrichment, used when probing is skipped
    /// or when the probe failed outright.
    pub fn unchecked(hostname: impl Into<String>) -> Self {
        Self {
            url: hostname.into(),
            status: None,
            last_checked: None,
            is_active: false,
            response_length: None,
            server: None,
        }
    }
}

/// A query parameter that matched the keyword list, paired with the archived
/// URL it was seen on. A match is a heuristic, not a confirmed vulnerability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParameterFinding {
    pub parameter: String,
    pub url: String,
    pub discovered_at: DateTime<Utc>,
}

// --- Main Report ---

/// The complete result of one scan, assembled once at the end of the run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanReport {
    pub config: ScanConfig,
    /// Discovered subdomains, sorted by hostname.
    pub subdomains: Vec<Subdomain>,
    pub vulnerable_parameters: Vec<ParameterFinding>,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
}

impl ScanReport {
    pub fn new(config: ScanConfig) -> Self {
        Self {
            config,
            subdomains: Vec::new(),
            vulnerable_parameters: Vec::new(),
            start_time: Utc::now(),
            end_time: None,
        }
    }

    /// Number of subdomains that answered a probe with HTTP 200.
    pub fn active_count(&self) -> usize {
        self.subdomains.iter().filter(|s| s.is_active).count()
    }

    /// Wall-clock duration of the scan in seconds, once finished.
    pub fn duration_secs(&self) -> Option<f64> {
        self.end_time
            .map(|end| (end - self.start_time).num_milliseconds() as f64 / 1000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_conservative() {
        let config = ScanConfig::default();
        assert!(!config.check_active);
        assert!(!config.check_vulnerable);
        assert!(config.verify_ssl);
        assert_eq!(config.max_concurrent_requests, 50);
        assert_eq!(config.timeout_secs, 10);
    }

    #[test]
    fn unchecked_record_has_no_enrichment() {
        let record = Subdomain::unchecked("api.example.com");
        assert_eq!(record.url, "api.example.com");
        assert_eq!(record.status, None);
        assert!(!record.is_active);
        assert_eq!(record.response_length, None);
        assert_eq!(record.server, None);
        assert_eq!(record.last_checked, None);
    }

    #[test]
    fn report_counts_active_subdomains() {
        let mut report = ScanReport::new(ScanConfig::default());
        report.subdomains.push(Subdomain {
            is_active: true,
            status: Some(200),
            ..Subdomain::unchecked("a.example.com")
        });
        report.subdomains.push(Subdomain::unchecked("b.example.com"));
        assert_eq!(report.active_count(), 1);
    }

    #[test]
    fn output_format_round_trips_through_strum() {
        assert_eq!(OutputFormat::Json.to_string(), "json");
        assert_eq!("text".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
    }
}
