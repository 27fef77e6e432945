//! Postal address detection
//!
//! Targets the Central European layout: one or more capitalized street
//! tokens, a house number, then a postal code and a capitalized city name.
//! Tokens may be separated by line breaks.

use super::{compile, scan, DetectorStrategy, Match};
use crate::domain::{Category, Mode, Result};
use regex::Regex;

const UPPER: &str = r"\p{Lu}";
const WORD: &str = r"[\p{L}.\-]";

const MIN_LEN: usize = 10;

/// Detects street + house number + postal code + city
pub struct AddressStrategy {
    regex: Regex,
}

impl AddressStrategy {
    pub fn new() -> Result<Self> {
        let street = format!(r"(?:{UPPER}{WORD}*\s+)+");
        let house_number = r"[0-9]+[a-zA-Z]?(?:[\-/][0-9]+)?";
        let separator = r"[\s,]+";
        let city = format!(r"(?:(?:D|A|CH)-)?[0-9]{{4,5}}\s+{UPPER}{WORD}+");

        Ok(Self {
            regex: compile(&format!(r"\b{street}{house_number}{separator}{city}\b"))?,
        })
    }
}

impl DetectorStrategy for AddressStrategy {
    fn category(&self) -> Category {
        Category::Address
    }

    fn find<'t>(&self, text: &'t str, _mode: Mode) -> Result<Vec<Match<'t>>> {
        Ok(scan(&self.regex, text))
    }

    fn validate(&self, candidate: &str, _mode: Mode) -> bool {
        candidate.chars().count() >= MIN_LEN && candidate.chars().any(|c| c.is_ascii_digit())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sanitizer::detector::test_support::detect;

    #[test]
    fn test_single_line_address() {
        let strategy = AddressStrategy::new().unwrap();
        let text = "Delivery to Musterstraße 12, 12345 Berlin please.";
        assert_eq!(
            detect(&strategy, text, Mode::Strict),
            vec!["Musterstraße 12, 12345 Berlin"]
        );
    }

    #[test]
    fn test_multi_line_address() {
        let strategy = AddressStrategy::new().unwrap();
        let text = "\n        Mr. Müller\n        Hauptstr. 5a\n        80331 München\n        ";
        let found = detect(&strategy, text, Mode::Strict);
        assert_eq!(found.len(), 1);
        assert!(found[0].contains("Hauptstr. 5a"));
        assert!(found[0].contains("80331 München"));
    }

    #[test]
    fn test_country_prefixed_postal_code() {
        let strategy = AddressStrategy::new().unwrap();
        let text = "Office: Bahnhofstrasse 7/2, CH-8001 Zürich";
        assert_eq!(
            detect(&strategy, text, Mode::Strict),
            vec!["Bahnhofstrasse 7/2, CH-8001 Zürich"]
        );
    }

    #[test]
    fn test_plain_numbers_ignored() {
        let strategy = AddressStrategy::new().unwrap();
        assert!(detect(&strategy, "I have 3 apples in 1020 boxes.", Mode::Strict).is_empty());
    }

    #[test]
    fn test_validate_requires_length_and_digit() {
        let strategy = AddressStrategy::new().unwrap();
        assert!(!strategy.validate("A 1 1234 B", Mode::Strict));
        assert!(!strategy.validate("Long enough text", Mode::Strict));
        assert!(strategy.validate("Weg 1, 1234 Wien", Mode::Strict));
    }
}
