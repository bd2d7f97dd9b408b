// src/core/scanner/mod.rs

// This file acts as the public interface of the `scanner` module and hosts
// the scan orchestrator. It declares and makes all source/scanner modules
// public.
pub mod crtsh_source;
pub mod param_scanner;
pub mod probe_scanner;
pub mod wayback_source;

use crate::core::domain::extract_subdomains;
use crate::core::models::{ScanConfig, ScanReport, Subdomain};
use crate::core::wordlist;
use chrono::Utc;
use reqwest::Client;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{error, info, warn};

/// Progress notifications emitted while a scan runs.
///
/// The orchestrator reports through an injected observer so that any frontend
/// can follow along; the core never depends on the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanProgress {
    /// Both discovery sources are being queried.
    Fetching,
    /// One liveness probe out of `total` has completed.
    Probing { completed: usize, total: usize },
    /// One archived URL out of `total` has been checked for flagged parameters.
    Flagging { completed: usize, total: usize },
}

/// Observer callback invoked on every progress event.
pub type ProgressObserver = Arc<dyn Fn(ScanProgress) + Send + Sync>;

fn notify(observer: &Option<ProgressObserver>, progress: ScanProgress) {
    if let Some(observer) = observer {
        observer(progress);
    }
}

/// Runs the complete discovery pipeline and returns the final report.
///
/// Phases run strictly in sequence: both sources are fetched concurrently,
/// their results are merged into one deduplicated candidate set, candidates
/// are probed for liveness under the configured concurrency bound (when
/// enabled), archived URLs are checked for flagged parameters (when enabled),
/// and the report is assembled with its end timestamp. No failure inside any
/// phase aborts the scan; an empty report only ever means an absence of data.
///
/// The HTTP client is built when the scan starts and dropped when this
/// function returns, on every path.
///
/// # Arguments
/// * `config` - The immutable configuration for this run.
/// * `observer` - Optional progress callback, invoked per phase and per probe.
///
/// # Returns
/// The assembled `ScanReport`, subdomains sorted by hostname.
pub async fn run_full_scan(config: ScanConfig, observer: Option<ProgressObserver>) -> ScanReport {
    let mut report = ScanReport::new(config.clone());
    info!(target = %config.target_domain, "Starting scan.");

    let client = match build_client(&config) {
        Ok(client) => client,
        Err(e) => {
            // Without a client there is nothing to fetch; return an empty
            // but well-formed report.
            error!(error = %e, "Failed to build HTTP client, finishing scan empty.");
            report.end_time = Some(Utc::now());
            return report;
        }
    };

    // --- FETCH: both sources concurrently, joined before merging. ---
    notify(&observer, ScanProgress::Fetching);
    let (crtsh_subdomains, wayback_urls) = tokio::join!(
        crtsh_source::fetch_crtsh_subdomains(&client, &config.target_domain),
        wayback_source::fetch_wayback_urls(&client, &config.target_domain),
    );

    // --- MERGE: the archived-URL set itself stays around for flagging. ---
    let candidates = merge_candidates(crtsh_subdomains, &wayback_urls, &config.target_domain);
    info!(candidates = candidates.len(), "Merged candidate set.");

    // --- PROBE: bounded-concurrency liveness checks, or bare records. ---
    report.subdomains = if config.check_active {
        probe_all(&client, &config, candidates, &observer).await
    } else {
        candidates.into_iter().map(Subdomain::unchecked).collect()
    };

    // --- FLAG: parameter heuristics over the full archived URLs. ---
    if config.check_vulnerable {
        let keywords = wordlist::load_keywords(config.custom_wordlist.as_deref());
        let total = wayback_urls.len();
        for (done, url) in wayback_urls.iter().enumerate() {
            report
                .vulnerable_parameters
                .extend(param_scanner::flag_parameters(url, &keywords));
            notify(
                &observer,
                ScanProgress::Flagging { completed: done + 1, total },
            );
        }
    }

    // --- ASSEMBLE ---
    report.subdomains.sort_by(|a, b| a.url.cmp(&b.url));
    report.end_time = Some(Utc::now());
    info!(
        subdomains = report.subdomains.len(),
        active = report.active_count(),
        findings = report.vulnerable_parameters.len(),
        "Scan finished."
    );
    report
}

/// Builds the scan-scoped HTTP client carrying the timeout, user agent and
/// TLS-verification setting. Redirects are followed (reqwest's default).
fn build_client(config: &ScanConfig) -> reqwest::Result<Client> {
    Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(Duration::from_secs(config.timeout_secs))
        .danger_accept_invalid_certs(!config.verify_ssl)
        .build()
}

/// Unions the certificate-transparency hostnames with the hostnames hidden in
/// every archived URL. Set semantics make the merge order-independent and
/// duplicate-free.
pub fn merge_candidates(
    crtsh_subdomains: HashSet<String>,
    wayback_urls: &HashSet<String>,
    target_domain: &str,
) -> HashSet<String> {
    let mut all = crtsh_subdomains;
    for url in wayback_urls {
        all.extend(extract_subdomains(url, target_domain));
    }
    all
}

/// Probes every candidate concurrently under the scan-wide limiter and
/// collects all records before returning. A probe that fails only marks its
/// own host as unreachable; a probe task that cannot be joined at all is
/// logged and dropped.
async fn probe_all(
    client: &Client,
    config: &ScanConfig,
    candidates: HashSet<String>,
    observer: &Option<ProgressObserver>,
) -> Vec<Subdomain> {
    let total = candidates.len();
    let semaphore = Arc::new(Semaphore::new(config.max_concurrent_requests.max(1)));
    let mut tasks = JoinSet::new();

    for candidate in candidates {
        let client = client.clone();
        let config = config.clone();
        let semaphore = semaphore.clone();
        tasks.spawn(probe_scanner::rate_limited(semaphore, async move {
            probe_scanner::check_subdomain(&client, &candidate, &config).await
        }));
    }

    let mut records = Vec::with_capacity(total);
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok(record) => {
                records.push(record);
                notify(
                    observer,
                    ScanProgress::Probing { completed: records.len(), total },
                );
            }
            Err(e) => warn!(error = %e, "A probe task could not be joined."),
        }
    }
    records
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_unions_both_sources() {
        let from_certs = HashSet::from([
            "api.example.com".to_string(),
            "shop.example.com".to_string(),
        ]);
        let archived = HashSet::from([
            "https://old.example.com/page?id=5".to_string(),
            "https://shop.example.com/cart".to_string(),
            "https://example.com/".to_string(),
        ]);

        let merged = merge_candidates(from_certs, &archived, "example.com");
        assert_eq!(
            merged,
            HashSet::from([
                "api.example.com".to_string(),
                "shop.example.com".to_string(),
                "old.example.com".to_string(),
            ])
        );
    }

    #[test]
    fn merge_is_commutative_and_idempotent() {
        let a = HashSet::from(["a.example.com".to_string(), "b.example.com".to_string()]);
        let b = HashSet::from(["https://b.example.com/x".to_string()]);
        let empty = HashSet::new();

        let ab = merge_candidates(a.clone(), &b, "example.com");
        // Feeding the merged set back in as bare hostnames yields no growth.
        let again = merge_candidates(
            ab.clone(),
            &ab.iter().cloned().collect(),
            "example.com",
        );
        assert_eq!(ab, again);

        // Union with nothing is the identity.
        assert_eq!(merge_candidates(a.clone(), &empty, "example.com"), a);
    }

    #[test]
    fn certificate_and_archive_sources_merge_into_one_candidate_set() {
        // Certificate source alone: a wildcard entry and a plain hostname.
        let ct_body =
            r#"[{"name_value": "*.api.example.com"}, {"name_value": "shop.example.com"}]"#;
        let from_certs = crtsh_source::parse_crtsh_response(ct_body, "example.com");
        let archived = wayback_source::parse_cdx_response("[]");

        let merged = merge_candidates(from_certs, &archived, "example.com");
        assert_eq!(
            merged,
            HashSet::from([
                "api.example.com".to_string(),
                "shop.example.com".to_string()
            ])
        );
    }

    #[test]
    fn archived_urls_feed_parameter_flagging_unreduced() {
        let cdx_body = r#"[
            ["urlkey", "timestamp", "original"],
            ["com,example,old)/page", "20190101000000", "https://old.example.com/page?id=5&ref=x"]
        ]"#;
        let urls = wayback_source::parse_cdx_response(cdx_body);
        let keywords: Vec<String> = crate::core::wordlist::DEFAULT_KEYWORDS
            .iter()
            .map(|k| k.to_string())
            .collect();

        let findings: Vec<_> = urls
            .iter()
            .flat_map(|url| param_scanner::flag_parameters(url, &keywords))
            .collect();
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].parameter, "id");
        assert_eq!(findings[0].url, "https://old.example.com/page?id=5&ref=x");
    }

    #[tokio::test]
    async fn probe_failures_are_isolated_per_host() {
        // Three hosts under the reserved .invalid TLD, one permit: every
        // probe fails on its own and must still yield its own record.
        let config = ScanConfig {
            target_domain: "probe-test.invalid".to_string(),
            check_active: true,
            max_concurrent_requests: 1,
            timeout_secs: 2,
            ..ScanConfig::default()
        };
        let client = build_client(&config).expect("client builds");
        let candidates = HashSet::from([
            "a.probe-test.invalid".to_string(),
            "b.probe-test.invalid".to_string(),
            "c.probe-test.invalid".to_string(),
        ]);

        let events = Arc::new(std::sync::Mutex::new(Vec::new()));
        let sink = events.clone();
        let observer: ProgressObserver = Arc::new(move |progress| {
            sink.lock().expect("observer lock").push(progress);
        });

        let records = probe_all(&client, &config, candidates, &Some(observer)).await;
        assert_eq!(records.len(), 3);
        for record in &records {
            assert_eq!(record.status, None);
            assert!(!record.is_active);
            assert_eq!(record.response_length, None);
            assert_eq!(record.server, None);
        }

        // One progress event per completed probe, with a stable total.
        let events = events.lock().expect("observer lock");
        assert_eq!(events.len(), 3);
        assert!(events
            .iter()
            .all(|e| matches!(e, ScanProgress::Probing { total: 3, .. })));
    }

    #[tokio::test]
    async fn scan_with_unreachable_sources_still_completes() {
        // A reserved .invalid target makes both upstream fetches fail fast;
        // the scan must still produce a well-formed, empty report.
        let config = ScanConfig {
            target_domain: "nonexistent-target.invalid".to_string(),
            timeout_secs: 2,
            ..ScanConfig::default()
        };

        let report = run_full_scan(config, None).await;
        assert!(report.subdomains.is_empty());
        assert!(report.vulnerable_parameters.is_empty());
        assert!(report.end_time.is_some());
        assert!(report.end_time.expect("stamped") >= report.start_time);
    }
}
