// src/core/scanner/param_scanner.rs

use crate::core::domain::extract_parameters;
use crate::core::models::ParameterFinding;
use chrono::Utc;
use tracing::debug;

/// Flags the query parameters of one archived URL against a keyword list.
///
/// A parameter matches when its lowercased name contains any keyword as a
/// substring, so the keyword `id` flags `userid` as well as `id` itself.
/// Duplicate parameter names within the URL collapse to a single finding.
/// Malformed URLs and URLs without a query string yield no findings.
///
/// # Arguments
/// * `url` - The full archived URL, including its query string.
/// * `keywords` - Lowercased keywords to match against.
///
/// # Returns
/// One `ParameterFinding` per flagged (parameter, url) pair.
pub fn flag_parameters(url: &str, keywords: &[String]) -> Vec<ParameterFinding> {
    let mut findings = Vec::new();

    for parameter in extract_parameters(url) {
        let lowered = parameter.to_lowercase();
        if keywords.iter().any(|keyword| lowered.contains(keyword.as_str())) {
            debug!(parameter = %parameter, url = %url, "Flagged parameter.");
            findings.push(ParameterFinding {
                parameter,
                url: url.to_string(),
                discovered_at: Utc::now(),
            });
        }
    }

    findings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::wordlist::DEFAULT_KEYWORDS;

    fn default_keywords() -> Vec<String> {
        DEFAULT_KEYWORDS.iter().map(|k| k.to_string()).collect()
    }

    #[test]
    fn flags_exact_and_substring_matches() {
        let findings = flag_parameters(
            "https://old.example.com/page?id=5&ref=x",
            &default_keywords(),
        );
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].parameter, "id");
        assert_eq!(findings[0].url, "https://old.example.com/page?id=5&ref=x");
    }

    #[test]
    fn matching_is_substring_based_and_case_insensitive() {
        let findings = flag_parameters(
            "https://app.example.com/u?UserID=7&Search_Term=q",
            &default_keywords(),
        );
        let flagged: Vec<&str> = findings.iter().map(|f| f.parameter.as_str()).collect();
        assert_eq!(flagged, vec!["UserID", "Search_Term"]);
    }

    #[test]
    fn urls_without_queries_or_matches_yield_nothing() {
        assert!(flag_parameters("https://example.com/plain", &default_keywords()).is_empty());
        assert!(
            flag_parameters("https://example.com/?ref=x&utm=y", &default_keywords()).is_empty()
        );
        assert!(flag_parameters("::broken::", &default_keywords()).is_empty());
    }

    #[test]
    fn duplicate_parameters_collapse_to_one_finding() {
        let findings = flag_parameters(
            "https://example.com/?id=1&id=2&id=3",
            &default_keywords(),
        );
        assert_eq!(findings.len(), 1);
    }
}
