//! IBAN detection with ISO 13616 mod-97 checksum validation

use super::{compile, scan, DetectorStrategy, Match};
use crate::domain::{Category, Mode, Result};
use regex::Regex;

/// Country code, check digits, then either a spaced run ending in a digit or
/// a contiguous alphanumeric run.
const IBAN_PATTERN: &str = r"(?i)\b[A-Z]{2}[0-9]{2}(?:[A-Z0-9\s]*[0-9]|[A-Z0-9]+)\b";

const MIN_LEN: usize = 15;
const MAX_LEN: usize = 34;

/// Detects IBANs, contiguous or grouped with whitespace
pub struct IbanStrategy {
    regex: Regex,
}

impl IbanStrategy {
    pub fn new() -> Result<Self> {
        Ok(Self {
            regex: compile(IBAN_PATTERN)?,
        })
    }
}

impl DetectorStrategy for IbanStrategy {
    fn category(&self) -> Category {
        Category::Iban
    }

    fn find<'t>(&self, text: &'t str, _mode: Mode) -> Result<Vec<Match<'t>>> {
        Ok(scan(&self.regex, text))
    }

    fn validate(&self, candidate: &str, _mode: Mode) -> bool {
        is_valid_iban(candidate)
    }
}

/// Checks length bounds and the mod-97 checksum
///
/// Whitespace is ignored and letters are case-folded. The first four
/// characters move to the end, letters expand to two-digit numbers
/// (A = 10 .. Z = 35) and the resulting number must leave remainder 1
/// when divided by 97. The remainder is folded digit by digit so arbitrarily
/// long IBANs never overflow.
pub fn is_valid_iban(candidate: &str) -> bool {
    let iban: Vec<char> = candidate
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| c.to_ascii_uppercase())
        .collect();

    if iban.len() < MIN_LEN || iban.len() > MAX_LEN {
        return false;
    }

    let mut remainder: u32 = 0;
    for c in iban[4..].iter().chain(iban[..4].iter()) {
        let value = match c {
            '0'..='9' => *c as u32 - '0' as u32,
            'A'..='Z' => *c as u32 - 'A' as u32 + 10,
            _ => return false,
        };
        remainder = if value >= 10 {
            (remainder * 100 + value) % 97
        } else {
            (remainder * 10 + value) % 97
        };
    }

    remainder == 1
}
