// src/core/scanner/probe_scanner.rs

use crate::core::models::{ScanConfig, Subdomain};
use chrono::Utc;
use reqwest::Client;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::debug;

/// Runs a future once a permit from the scan-wide concurrency limiter is
/// available; the permit is held for the whole duration of the task.
pub async fn rate_limited<F, T>(semaphore: Arc<Semaphore>, task: F) -> T
where
    F: Future<Output = T>,
{
    // The semaphore is never closed while a scan runs; if it somehow were,
    // running unthrottled is still preferable to dropping the probe.
    let _permit = semaphore.acquire_owned().await.ok();
    task.await
}

/// Builds the full hostname to probe. Candidates are normally complete
/// hostnames already; the target is reattached only when normalization left
/// a bare label behind.
fn full_hostname(candidate: &str, target_domain: &str) -> String {
    if candidate.ends_with(target_domain) {
        candidate.to_string()
    } else {
        format!("{candidate}.{target_domain}")
    }
}

/// Probes a single candidate hostname for liveness.
///
/// Issues one GET to `https://{host}`, following redirects and honoring the
/// timeout and TLS settings baked into the client. On success the record
/// carries the final status, the drained body length and the `Server` header;
/// on any failure the host is recorded as unreachable. A probe failure is a
/// normal outcome: it is never retried and never propagates.
///
/// # Arguments
/// * `client` - The scan-scoped HTTP client.
/// * `candidate` - The candidate hostname to probe.
/// * `config` - The active scan configuration.
///
/// # Returns
/// A fully-formed `Subdomain` record, enrichment fields populated or absent.
pub async fn check_subdomain(client: &Client, candidate: &str, config: &ScanConfig) -> Subdomain {
    let host = full_hostname(candidate, &config.target_domain);
    let url = format!("https://{host}");
    debug!(host = %host, "Probing subdomain.");

    match client.get(&url).send().await {
        Ok(response) => {
            let status = response.status().as_u16();
            let server = response
                .headers()
                .get(reqwest::header::SERVER)
                .and_then(|value| value.to_str().ok())
                .map(String::from);

            // Drain the body fully; a failed drain counts as zero bytes.
            let response_length = response.bytes().await.map(|body| body.len()).unwrap_or(0);

            Subdomain {
                url: host,
                status: Some(status),
                last_checked: Some(Utc::now()),
                is_active: status == 200,
                response_length: Some(response_length),
                server,
            }
        }
        Err(e) => {
            debug!(host = %host, error = %e, "Probe failed, recording host as unreachable.");
            Subdomain {
                last_checked: Some(Utc::now()),
                ..Subdomain::unchecked(host)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[test]
    fn reattaches_the_target_only_when_missing() {
        assert_eq!(
            full_hostname("api.example.com", "example.com"),
            "api.example.com"
        );
        assert_eq!(full_hostname("api", "example.com"), "api.example.com");
    }

    #[tokio::test]
    async fn limiter_caps_the_number_of_in_flight_tasks() {
        const LIMIT: usize = 2;
        const TASKS: usize = 8;

        let semaphore = Arc::new(Semaphore::new(LIMIT));
        let in_flight = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));

        let mut handles = Vec::new();
        for _ in 0..TASKS {
            let semaphore = semaphore.clone();
            let in_flight = in_flight.clone();
            let peak = peak.clone();
            handles.push(tokio::spawn(rate_limited(semaphore, async move {
                let now = in_flight.fetch_add(1, Ordering::SeqCst) + 1;
                peak.fetch_max(now, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_millis(20)).await;
                in_flight.fetch_sub(1, Ordering::SeqCst);
            })));
        }
        for handle in handles {
            handle.await.expect("probe task completes");
        }

        assert!(peak.load(Ordering::SeqCst) <= LIMIT);
        assert_eq!(in_flight.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn unreachable_hosts_yield_an_absent_record() {
        // The .invalid TLD is reserved and never resolves, so the probe
        // takes the failure path without touching the network.
        let config = ScanConfig {
            target_domain: "sub.invalid".to_string(),
            timeout_secs: 2,
            ..ScanConfig::default()
        };
        let client = Client::builder()
            .timeout(Duration::from_secs(2))
            .build()
            .expect("client builds");

        let record = check_subdomain(&client, "nonexistent-sub.invalid", &config).await;
        assert_eq!(record.status, None);
        assert!(!record.is_active);
        assert_eq!(record.response_length, None);
        assert_eq!(record.server, None);
        assert!(record.last_checked.is_some());
    }
}
