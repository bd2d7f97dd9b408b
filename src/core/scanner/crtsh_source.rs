// src/core/scanner/crtsh_source.rs

use crate::core::domain::extract_subdomains;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::collections::HashSet;
use tracing::{debug, info, warn};

/// Query endpoint of the crt.sh certificate-transparency log frontend.
const CRTSH_ENDPOINT: &str = "https://crt.sh";

/// One certificate entry as returned by crt.sh. Only the SAN/CN field is
/// relevant; everything else in the payload is ignored.
#[derive(Debug, Deserialize)]
struct CrtShEntry {
    name_value: String,
}

/// Fetches candidate subdomains of `target_domain` from certificate
/// transparency logs.
///
/// Issues a single GET for `%.{target_domain}` with JSON output. Any failure
/// (transport error, non-200 status, malformed body, empty result list) is
/// logged and degrades to an empty set; this source never fails the scan.
pub async fn fetch_crtsh_subdomains(client: &Client, target_domain: &str) -> HashSet<String> {
    fetch_from(client, CRTSH_ENDPOINT, target_domain).await
}

/// Same contract as [`fetch_crtsh_subdomains`], against an explicit endpoint.
pub(crate) async fn fetch_from(
    client: &Client,
    endpoint: &str,
    target_domain: &str,
) -> HashSet<String> {
    let url = format!("{endpoint}/?q=%25.{target_domain}&output=json");
    info!(target = target_domain, "Fetching subdomains from crt.sh.");

    let response = match client.get(&url).send().await {
        Ok(response) => response,
        Err(e) => {
            warn!(error = %e, "crt.sh request failed.");
            return HashSet::new();
        }
    };

    if response.status() != StatusCode::OK {
        warn!(status = %response.status(), "crt.sh returned a non-200 status.");
        return HashSet::new();
    }

    let body = match response.text().await {
        Ok(body) => body,
        Err(e) => {
            warn!(error = %e, "Could not read crt.sh response body.");
            return HashSet::new();
        }
    };

    let subdomains = parse_crtsh_response(&body, target_domain);
    info!(count = subdomains.len(), "crt.sh fetch finished.");
    subdomains
}

/// Parses a crt.sh JSON body into normalized candidate hostnames.
///
/// crt.sh packs several names into one entry separated by newlines, so each
/// `name_value` is split on lines before normalization. A body that is not a
/// JSON array of entries yields an empty set.
pub fn parse_crtsh_response(body: &str, target_domain: &str) -> HashSet<String> {
    let entries: Vec<CrtShEntry> = match serde_json::from_str(body) {
        Ok(entries) => entries,
        Err(e) => {
            warn!(error = %e, "Could not parse crt.sh response.");
            return HashSet::new();
        }
    };

    if entries.is_empty() {
        debug!("crt.sh returned no certificate entries.");
        return HashSet::new();
    }

    let mut subdomains = HashSet::new();
    for entry in &entries {
        for name in entry.name_value.to_lowercase().lines() {
            subdomains.extend(extract_subdomains(name, target_domain));
        }
    }

    if subdomains.is_empty() {
        debug!("No subdomains of the target found in crt.sh data.");
    }
    subdomains
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_entries_and_normalizes_names() {
        let body = r#"[
            {"issuer_name": "C=US, O=Let's Encrypt", "name_value": "*.api.example.com"},
            {"issuer_name": "C=US, O=Let's Encrypt", "name_value": "shop.example.com"}
        ]"#;
        let found = parse_crtsh_response(body, "example.com");
        assert_eq!(
            found,
            HashSet::from([
                "api.example.com".to_string(),
                "shop.example.com".to_string()
            ])
        );
    }

    #[test]
    fn splits_newline_packed_name_values() {
        let body = r#"[{"name_value": "mail.example.com\nwww.mail.example.com\nexample.com"}]"#;
        let found = parse_crtsh_response(body, "example.com");
        assert_eq!(
            found,
            HashSet::from([
                "mail.example.com".to_string(),
                "www.mail.example.com".to_string()
            ])
        );
    }

    #[test]
    fn entries_outside_the_target_are_dropped() {
        let body = r#"[{"name_value": "cdn.other.net"}, {"name_value": "evil-example.com"}]"#;
        assert!(parse_crtsh_response(body, "example.com").is_empty());
    }

    #[test]
    fn malformed_or_empty_bodies_degrade_to_empty() {
        assert!(parse_crtsh_response("<html>rate limited</html>", "example.com").is_empty());
        assert!(parse_crtsh_response("[]", "example.com").is_empty());
        assert!(parse_crtsh_response("", "example.com").is_empty());
    }
}
