//! Email address detection

use super::{compile, scan, DetectorStrategy, Match};
use crate::domain::{Category, Mode, Result};
use regex::Regex;

const EMAIL_PATTERN: &str = r"[a-zA-Z0-9._%+\-]+@[a-zA-Z0-9.\-]+\.[a-zA-Z]{2,}";

/// Detects `local@domain.tld` addresses
///
/// Requires an alphabetic top-level domain of at least two letters, which
/// keeps social handles (`@name`) and quantities (`200@50pcs`) out.
pub struct EmailStrategy {
    regex: Regex,
}

impl EmailStrategy {
    pub fn new() -> Result<Self> {
        Ok(Self {
            regex: compile(EMAIL_PATTERN)?,
        })
    }
}

impl DetectorStrategy for EmailStrategy {
    fn category(&self) -> Category {
        Category::Email
    }

    fn find<'t>(&self, text: &'t str, _mode: Mode) -> Result<Vec<Match<'t>>> {
        Ok(scan(&self.regex, text))
    }
}
