//! URL and bare domain detection

use super::{compile, scan, DetectorStrategy, Match};
use crate::domain::{Category, Mode, Result};
use regex::Regex;

/// Top-level domains recognized without a scheme or `www.` prefix
const NAKED_TLDS: &[&str] = &[
    "com", "net", "org", "edu", "gov", "mil", "int", "eu", "io", "ai", "co", "me", "app", "dev",
    "tech", "cloud", "xyz", "site", "online", "info", "biz", "so", "ly", "tv", "cc", "to", "de",
    "ch", "at", "us", "uk", "fr", "es", "it", "nl", "be", "ru", "cn", "jp", "br", "in", "ca", "au",
    "se", "no", "dk", "fi", "cz", "pl", "sh", "py", "local", "test", "example",
];

const HOST_CHARS: &str = r"[\-a-zA-Z0-9@:%._+~#=]{1,256}";
/// Characters a URL may end on; excludes sentence punctuation like `.` and `?`
const SAFE_END: &str = r"[\-a-zA-Z0-9()@:%_+~#&/=]";

/// Detects URLs in three shapes, tried in order at each position:
/// local development hosts, scheme or `www.` prefixed URLs, and bare
/// domains ending in a known TLD.
pub struct UrlStrategy {
    regex: Regex,
}

impl UrlStrategy {
    pub fn new() -> Result<Self> {
        let path_query = format!(r"(?:[\-a-zA-Z0-9()@:%_+.~#?&/=]*{SAFE_END})?");
        let localhost =
            format!(r"\b(?:https?://)?(?:localhost|127\.0\.0\.1)(?::[0-9]+)?{path_query}");
        let prefixed =
            format!(r"\b(?:https?://|www\.){HOST_CHARS}\.[a-zA-Z0-9()]{{1,6}}\b{path_query}");
        let naked = format!(
            r"\b{HOST_CHARS}\.(?:{tlds})\b{path_query}",
            tlds = NAKED_TLDS.join("|")
        );

        Ok(Self {
            regex: compile(&format!("(?i)(?:{localhost})|(?:{prefixed})|(?:{naked})"))?,
        })
    }
}

impl DetectorStrategy for UrlStrategy {
    fn category(&self) -> Category {
        Category::Url
    }

    fn find<'t>(&self, text: &'t str, mode: Mode) -> Result<Vec<Match<'t>>> {
        let mut matches = scan(&self.regex, text);
        if mode == Mode::Developer {
            matches.retain(|m| !is_development_url(m.text));
        }
        Ok(matches)
    }

    fn validate(&self, candidate: &str, _mode: Mode) -> bool {
        candidate.contains('.') || candidate.to_lowercase().contains("localhost")
    }
}

/// Local hosts, reserved test TLDs and bare script file names
fn is_development_url(url: &str) -> bool {
    let lower = url.to_lowercase();

    let local = lower.contains("localhost")
        || lower.contains("127.0.0.1")
        || [".local", ".test", ".example"]
            .iter()
            .any(|suffix| lower.ends_with(suffix));

    let script_file = [".py", ".sh", ".pl"].iter().any(|ext| lower.ends_with(ext))
        && !lower.starts_with("http")
        && !lower.starts_with("www");

    local || script_file
}
