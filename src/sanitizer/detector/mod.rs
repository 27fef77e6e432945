//! PII detection strategies
//!
//! Each strategy recognizes one [`Category`] of sensitive value. A strategy
//! proposes candidate substrings with [`DetectorStrategy::find`] and may reject
//! them afterwards with [`DetectorStrategy::validate`]; the engine only
//! substitutes candidates that pass both.

pub mod address;
pub mod custom;
pub mod email;
pub mod iban;
pub mod ip;
pub mod path;
pub mod phone;
pub mod url;

pub use address::AddressStrategy;
pub use custom::CustomTermsStrategy;
pub use email::EmailStrategy;
pub use iban::IbanStrategy;
pub use ip::IpStrategy;
pub use path::PathStrategy;
pub use phone::PhoneStrategy;
pub use url::UrlStrategy;

use crate::domain::{AigisError, Category, Mode, Result};
use regex::Regex;
use std::ops::Range;

/// A candidate substring proposed by a strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match<'t> {
    /// Byte offset of the first character
    pub start: usize,
    /// Byte offset one past the last character
    pub end: usize,
    /// The matched text
    pub text: &'t str,
}

/// Capability shared by all detection strategies
pub trait DetectorStrategy: Send + Sync {
    /// Category this strategy detects
    fn category(&self) -> Category;

    /// Placeholder prefix, the category's by default
    fn prefix(&self) -> &'static str {
        self.category().prefix()
    }

    /// All candidate matches in `text`, left to right
    ///
    /// # Errors
    ///
    /// Returns [`AigisError::Detection`] if the strategy cannot scan `text`.
    fn find<'t>(&self, text: &'t str, mode: Mode) -> Result<Vec<Match<'t>>>;

    /// Whether a candidate should actually be substituted
    fn validate(&self, _candidate: &str, _mode: Mode) -> bool {
        true
    }
}

/// Compile a detector pattern
///
/// Patterns are plain `regex` syntax, so scanning stays linear in the input.
/// Context checks that would need lookaround go into the strategy's
/// [`scan_where`] predicate instead.
pub(crate) fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|e| AigisError::Pattern(format!("{e}: {pattern}")))
}

/// Collect every non-overlapping, non-empty match of `regex` in `text`
pub(crate) fn scan<'t>(regex: &Regex, text: &'t str) -> Vec<Match<'t>> {
    scan_where(regex, text, |_, _| true)
}

/// Collect non-overlapping matches that also satisfy `accept`
///
/// `accept` receives the whole text and the candidate's byte range so it can
/// look at the surrounding characters. After a rejected candidate the search
/// resumes one character past the candidate's start.
pub(crate) fn scan_where<'t, F>(regex: &Regex, text: &'t str, accept: F) -> Vec<Match<'t>>
where
    F: Fn(&str, Range<usize>) -> bool,
{
    let mut matches = Vec::new();
    let mut pos = 0;

    while pos <= text.len() {
        let Some(found) = regex.find_at(text, pos) else {
            break;
        };

        if found.start() == found.end() {
            pos = next_char_start(text, found.end());
        } else if accept(text, found.range()) {
            matches.push(Match {
                start: found.start(),
                end: found.end(),
                text: found.as_str(),
            });
            pos = found.end();
        } else {
            pos = next_char_start(text, found.start());
        }
    }

    matches
}

/// Byte offset of the character after the one at `at`, past the end if none
fn next_char_start(text: &str, at: usize) -> usize {
    text[at..]
        .chars()
        .next()
        .map_or(text.len() + 1, |c| at + c.len_utf8())
}

/// Character ending right before byte offset `at`
pub(crate) fn char_before(text: &str, at: usize) -> Option<char> {
    text[..at].chars().next_back()
}

/// Character starting at byte offset `at`
pub(crate) fn char_after(text: &str, at: usize) -> Option<char> {
    text[at..].chars().next()
}

/// `\w` as the pattern engine understands it
pub(crate) fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
