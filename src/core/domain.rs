// src/core/domain.rs

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;
use url::Url;

static SCHEME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^https?://").expect("valid regex"));
static WWW_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^www\.").expect("valid regex"));

/// Normalizes operator input into a bare target domain.
///
/// Lowercases the input and strips an optional scheme, a leading `www.`
/// prefix and trailing slashes, so that `https://www.Example.com/` and
/// `example.com` configure the same scan.
pub fn clean_domain(domain: &str) -> String {
    let domain = domain.trim().to_lowercase();
    let domain = SCHEME_RE.replace(&domain, "");
    let domain = WWW_RE.replace(&domain, "");
    domain.trim_matches('/').to_string()
}

/// Extracts candidate subdomain hostnames of `target_domain` from a raw
/// domain or URL string.
///
/// The input may be a bare hostname, a wildcard entry such as
/// `*.api.example.com`, or a full URL; port suffixes and leading wildcard or
/// dot markers are stripped. A candidate is accepted only when the hostname
/// ends with the target domain on a label boundary (so `evil-example.com`
/// never matches `example.com`) and is at least one label deeper than the
/// apex. The full candidate hostname is returned.
///
/// Malformed input never panics; it simply yields an empty set.
///
/// # Arguments
/// * `raw` - The raw domain or URL string to inspect.
/// * `target_domain` - The normalized target domain used as the boundary.
///
/// # Returns
/// A set with the candidate hostname, or an empty set when the input does
/// not name a strict subdomain of the target.
pub fn extract_subdomains(raw: &str, target_domain: &str) -> HashSet<String> {
    let mut found = HashSet::new();

    let raw = raw.trim().to_lowercase();
    if raw.is_empty() {
        return found;
    }

    // Host-like tokens are parsed as URLs so a single parser covers both
    // shapes. Wildcard and stray dot markers would not survive URL parsing,
    // so they are stripped up front.
    let token = raw.trim_start_matches("*.").trim_start_matches('.');
    let with_scheme = if token.contains("://") {
        token.to_string()
    } else {
        format!("http://{token}")
    };

    let Ok(parsed) = Url::parse(&with_scheme) else {
        return found;
    };
    // `host_str` already excludes any port suffix.
    let Some(host) = parsed.host_str() else {
        return found;
    };
    let host = host.trim_start_matches("*.").trim_start_matches('.');

    let target = target_domain.to_lowercase();
    if target.is_empty() || host == target {
        return found;
    }

    // Suffix match on a label boundary only.
    if !host.ends_with(&format!(".{target}")) {
        return found;
    }

    // The apex has two labels; anything not strictly deeper is not a subdomain.
    if host.split('.').count() <= 2 {
        return found;
    }

    found.insert(host.to_string());
    found
}

/// Extracts the distinct query parameter names from a URL.
///
/// Duplicate names within one URL collapse to a single entry. Malformed or
/// query-less URLs yield an empty list.
pub fn extract_parameters(url: &str) -> Vec<String> {
    let Ok(parsed) = Url::parse(url) else {
        return Vec::new();
    };

    let mut seen = HashSet::new();
    let mut names = Vec::new();
    for (name, _) in parsed.query_pairs() {
        if seen.insert(name.to_string()) {
            names.push(name.into_owned());
        }
    }
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_domain_strips_scheme_and_www() {
        assert_eq!(clean_domain("https://www.Example.com/"), "example.com");
        assert_eq!(clean_domain("http://example.com"), "example.com");
        assert_eq!(clean_domain("  example.com  "), "example.com");
    }

    #[test]
    fn accepts_bare_subdomain_hostnames() {
        let found = extract_subdomains("shop.example.com", "example.com");
        assert_eq!(found, HashSet::from(["shop.example.com".to_string()]));
    }

    #[test]
    fn accepts_full_urls_and_strips_ports() {
        let found = extract_subdomains("https://api.example.com:8443/v1/users", "example.com");
        assert_eq!(found, HashSet::from(["api.example.com".to_string()]));
    }

    #[test]
    fn strips_wildcard_markers() {
        let found = extract_subdomains("*.api.example.com", "example.com");
        assert_eq!(found, HashSet::from(["api.example.com".to_string()]));
    }

    #[test]
    fn matching_is_case_insensitive() {
        let found = extract_subdomains("Mail.EXAMPLE.com", "example.com");
        assert_eq!(found, HashSet::from(["mail.example.com".to_string()]));
    }

    #[test]
    fn rejects_hosts_outside_the_target() {
        assert!(extract_subdomains("shop.other.org", "example.com").is_empty());
    }

    #[test]
    fn rejects_partial_label_matches() {
        // The suffix must sit on a label boundary.
        assert!(extract_subdomains("evil-example.com", "example.com").is_empty());
        assert!(extract_subdomains("a.evil-example.com", "example.com").is_empty());
    }

    #[test]
    fn rejects_the_apex_domain_itself() {
        assert!(extract_subdomains("example.com", "example.com").is_empty());
        assert!(extract_subdomains("https://example.com/index", "example.com").is_empty());
    }

    #[test]
    fn tolerates_malformed_input() {
        assert!(extract_subdomains("", "example.com").is_empty());
        assert!(extract_subdomains("not a url at all ://", "example.com").is_empty());
        assert!(extract_subdomains("http://", "example.com").is_empty());
    }

    #[test]
    fn normalization_is_idempotent() {
        let first = extract_subdomains("*.API.example.com:443", "example.com");
        let host = first.iter().next().expect("one candidate");
        let second = extract_subdomains(host, "example.com");
        assert_eq!(first, second);

        // Merging a set with itself yields no growth.
        let merged: HashSet<_> = first.union(&second).cloned().collect();
        assert_eq!(merged, first);
    }

    #[test]
    fn extracts_distinct_parameter_names() {
        let params = extract_parameters("https://old.example.com/page?id=5&ref=x&id=6");
        assert_eq!(params, vec!["id".to_string(), "ref".to_string()]);
    }

    #[test]
    fn no_query_string_yields_no_parameters() {
        assert!(extract_parameters("https://old.example.com/page").is_empty());
        assert!(extract_parameters("::not-a-url::").is_empty());
    }
}
