// src/core/scanner/wayback_source.rs

use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::collections::HashSet;
use tracing::{debug, info, warn};

/// CDX query endpoint of the Wayback Machine.
const CDX_ENDPOINT: &str = "https://web.archive.org/cdx/search/cdx";

/// Column index of the original URL in a CDX JSON row.
const URL_COLUMN: usize = 2;

/// Fetches historical URLs for `target_domain` from the Wayback Machine CDX
/// index.
///
/// Issues a single GET in domain-match mode with JSON output and URL-key
/// collapsing, so the upstream already returns one representative URL per
/// normalized key. Any failure is logged and degrades to an empty set; this
/// source never fails the scan.
///
/// The returned values are full URLs, not hostnames: the orchestrator derives
/// hostnames from them for merging and keeps the raw set for parameter
/// flagging, which needs the query strings.
pub async fn fetch_wayback_urls(client: &Client, target_domain: &str) -> HashSet<String> {
    fetch_from(client, CDX_ENDPOINT, target_domain).await
}

/// Same contract as [`fetch_wayback_urls`], against an explicit endpoint.
pub(crate) async fn fetch_from(
    client: &Client,
    endpoint: &str,
    target_domain: &str,
) -> HashSet<String> {
    info!(target = target_domain, "Fetching URLs from the Wayback Machine.");

    let request = client.get(endpoint).query(&[
        ("url", target_domain),
        ("matchType", "domain"),
        ("output", "json"),
        ("collapse", "urlkey"),
    ]);

    let response = match request.send().await {
        Ok(response) => response,
        Err(e) => {
            warn!(error = %e, "Wayback Machine request failed.");
            return HashSet::new();
        }
    };

    if response.status() != StatusCode::OK {
        warn!(status = %response.status(), "Wayback Machine returned a non-200 status.");
        return HashSet::new();
    }

    let body = match response.text().await {
        Ok(body) => body,
        Err(e) => {
            warn!(error = %e, "Could not read Wayback Machine response body.");
            return HashSet::new();
        }
    };

    let urls = parse_cdx_response(&body);
    info!(count = urls.len(), "Wayback Machine fetch finished.");
    urls
}

/// Parses a CDX JSON body into the set of archived URLs.
///
/// The payload is an array of rows whose first row is a header; the original
/// URL sits in the third column of every later row. Fewer than two rows means
/// "no results", not an error. Rows that do not carry a string in the URL
/// column are skipped.
pub fn parse_cdx_response(body: &str) -> HashSet<String> {
    let rows: Value = match serde_json::from_str(body) {
        Ok(rows) => rows,
        Err(e) => {
            warn!(error = %e, "Could not parse Wayback Machine response.");
            return HashSet::new();
        }
    };

    let Some(rows) = rows.as_array() else {
        warn!("Wayback Machine response was not a JSON array.");
        return HashSet::new();
    };

    if rows.len() < 2 {
        debug!("No URLs found in Wayback Machine data.");
        return HashSet::new();
    }

    rows.iter()
        .skip(1) // header row
        .filter_map(|row| row.get(URL_COLUMN))
        .filter_map(Value::as_str)
        .map(str::to_string)
        .collect()
}
