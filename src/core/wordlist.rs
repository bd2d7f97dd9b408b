// src/core/wordlist.rs

use std::path::Path;
use tracing::{debug, warn};

/// The built-in keyword list used when no custom wordlist is available.
/// Parameter names containing any of these substrings are flagged.
pub const DEFAULT_KEYWORDS: &[&str] = &["id", "page", "file", "dir", "search", "cmd", "exec"];

/// The wordlist file picked up from the working directory when no explicit
/// path is configured.
const LOCAL_WORDLIST: &str = "keywords.txt";

/// Loads the keyword list used for parameter flagging.
///
/// Resolution order: the configured custom path, then a `keywords.txt` file
/// in the working directory, then the built-in default list. An unreadable
/// or empty file is logged and skipped, never fatal.
///
/// # Arguments
/// * `custom_path` - Optional path to a custom wordlist, one keyword per line.
///
/// # Returns
/// A non-empty, lowercased list of keywords.
pub fn load_keywords(custom_path: Option<&Path>) -> Vec<String> {
    if let Some(path) = custom_path {
        match read_wordlist(path) {
            Some(keywords) => {
                debug!(path = %path.display(), count = keywords.len(), "Loaded custom wordlist.");
                return keywords;
            }
            None => {
                warn!(path = %path.display(), "Could not load custom wordlist, falling back.");
            }
        }
    }

    if let Some(keywords) = read_wordlist(Path::new(LOCAL_WORDLIST)) {
        debug!(count = keywords.len(), "Loaded keywords.txt from the working directory.");
        return keywords;
    }

    DEFAULT_KEYWORDS.iter().map(|k| k.to_string()).collect()
}

/// Reads one keyword per line, ignoring blank lines. Returns `None` when the
/// file is unreadable or contains no keywords at all.
fn read_wordlist(path: &Path) -> Option<Vec<String>> {
    let content = std::fs::read_to_string(path).ok()?;
    let keywords: Vec<String> = content
        .lines()
        .map(|line| line.trim().to_lowercase())
        .filter(|line| !line.is_empty())
        .collect();

    if keywords.is_empty() { None } else { Some(keywords) }
}
