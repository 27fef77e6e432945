//! Telephone number detection

use super::{char_before, compile, scan_where, DetectorStrategy, Match};
use crate::domain::{Category, Mode, Result};
use regex::Regex;
use std::ops::Range;

/// `+` or `00` prefixed numbers with loose separators.
const INTERNATIONAL: &str = r"(?:\+|\b00)(?:[0-9][\s\-()./]{0,2}){6,14}[0-9]";

/// Trunk-prefixed national numbers: area code, separator, subscriber blocks.
const NATIONAL: &str =
    r"(?:\(|\b)0[0-9]{1,5}\)?[\s\-./]{1,3}[0-9]{3,}(?:[\s\-./][0-9]{2,})*\b";

const MIN_DIGITS: usize = 7;
const MAX_DIGITS: usize = 15;

/// Detects international and national phone numbers
pub struct PhoneStrategy {
    regex: Regex,
}

impl PhoneStrategy {
    pub fn new() -> Result<Self> {
        Ok(Self {
            regex: compile(&format!("(?:{INTERNATIONAL})|(?:{NATIONAL})"))?,
        })
    }
}

impl DetectorStrategy for PhoneStrategy {
    fn category(&self) -> Category {
        Category::Phone
    }

    fn find<'t>(&self, text: &'t str, _mode: Mode) -> Result<Vec<Match<'t>>> {
        Ok(scan_where(&self.regex, text, opens_cleanly))
    }

    /// Accepts 7 to 15 digits (E.164 bounds) and rejects ISO dates
    fn validate(&self, candidate: &str, _mode: Mode) -> bool {
        let digits = candidate.chars().filter(char::is_ascii_digit).count();
        if !(MIN_DIGITS..=MAX_DIGITS).contains(&digits) {
            return false;
        }
        !(candidate.contains('-') && starts_with_iso_date(candidate))
    }
}

/// A leading `+` or `(` must start the text or follow whitespace
fn opens_cleanly(text: &str, range: Range<usize>) -> bool {
    match text[range.clone()].chars().next() {
        Some('+' | '(') => char_before(text, range.start).map_or(true, char::is_whitespace),
        _ => true,
    }
}

/// `19xx-xx-xx` or `20xx-xx-xx` at the start
fn starts_with_iso_date(candidate: &str) -> bool {
    let b = candidate.as_bytes();
    if b.len() < 10 {
        return false;
    }
    let digits = |range: std::ops::Range<usize>| b[range].iter().all(u8::is_ascii_digit);
    (b.starts_with(b"19") || b.starts_with(b"20"))
        && digits(2..4)
        && b[4] == b'-'
        && digits(5..7)
        && b[7] == b'-'
        && digits(8..10)
}
