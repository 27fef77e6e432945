//! File system path detection

use super::{char_before, compile, scan_where, DetectorStrategy, Match};
use crate::domain::{Category, Mode, Result};
use regex::Regex;
use std::ops::Range;

/// Besides whitespace, the characters a relative or rooted path may follow.
/// This keeps the path part of a URL out.
const OPENERS: &[char] = &['"', '\'', '=', ',', '(', '['];

const MIN_LEN: usize = 4;
const MAX_DIGIT_RATIO: f64 = 0.7;

/// Detects Windows (absolute and relative) and Unix (absolute and relative)
/// paths
///
/// Unix relative paths need at least two separators so that `and/or` or
/// `km/h` are left alone.
pub struct PathStrategy {
    regex: Regex,
}

impl PathStrategy {
    pub fn new() -> Result<Self> {
        let windows_absolute = r"\b[a-zA-Z]:\\[\w\-.()\\]+";
        let windows_relative = r"(?:\.{1,2}\\)?(?:[\w.\-]+\\)+[\w.\-]+";
        let unix_absolute = r"/(?:[\w.\-]+/)*[\w.\-]+";
        let unix_relative = r"[\w.\-]+/[\w.\-]+/(?:[\w.\-]+/?)*[\w.\-]*";

        Ok(Self {
            regex: compile(&format!(
                "(?:{windows_absolute})|(?:{windows_relative})|(?:{unix_absolute})|(?:{unix_relative})"
            ))?,
        })
    }
}

impl DetectorStrategy for PathStrategy {
    fn category(&self) -> Category {
        Category::Path
    }

    fn find<'t>(&self, text: &'t str, _mode: Mode) -> Result<Vec<Match<'t>>> {
        Ok(scan_where(&self.regex, text, starts_path))
    }

    /// Rejects fragments shorter than four characters, date-like strings
    /// made only of digits and separators, and mostly numeric candidates
    fn validate(&self, candidate: &str, _mode: Mode) -> bool {
        let path = candidate.trim();
        let len = path.chars().count();
        if len < MIN_LEN {
            return false;
        }

        if path
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '/' | '\\' | '-' | '.'))
        {
            return false;
        }

        let digits = path.chars().filter(char::is_ascii_digit).count();
        (digits as f64) <= len as f64 * MAX_DIGIT_RATIO
    }
}

/// Drive paths stand on their own word boundary; every other form must
/// start the text or follow whitespace or an opener
fn starts_path(text: &str, range: Range<usize>) -> bool {
    if is_drive_path(&text[range.clone()]) {
        return true;
    }
    char_before(text, range.start).map_or(true, |c| c.is_whitespace() || OPENERS.contains(&c))
}

fn is_drive_path(candidate: &str) -> bool {
    let b = candidate.as_bytes();
    b.len() >= 3 && b[0].is_ascii_alphabetic() && b[1] == b':' && b[2] == b'\\'
}
