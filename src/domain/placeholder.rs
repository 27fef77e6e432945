//! Placeholder tokens of the form `[PREFIX_N]`

use super::category::Category;
use std::fmt;

/// A vault placeholder such as `[EMAIL_3]`
///
/// The prefix is kept as a string rather than a [`Category`] so that vault
/// entries written by other tools (or by hand) with unknown prefixes still
/// parse and keep their counters monotonic.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Placeholder {
    prefix: String,
    index: u64,
}

impl Placeholder {
    /// Create a placeholder for a category and 1-based index
    pub fn new(category: Category, index: u64) -> Self {
        Self {
            prefix: category.prefix().to_string(),
            index,
        }
    }

    /// Parse a token like `[PHONE_NUMBER_12]`
    ///
    /// Returns `None` unless the whole input is one well-formed placeholder:
    /// square brackets around an uppercase/underscore prefix, an underscore,
    /// and a decimal index.
    pub fn parse(token: &str) -> Option<Self> {
        let inner = token.strip_prefix('[')?.strip_suffix(']')?;
        let (prefix, digits) = inner.rsplit_once('_')?;

        if prefix.is_empty() || !prefix.bytes().all(|b| b.is_ascii_uppercase() || b == b'_') {
            return None;
        }
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }

        let index = digits.parse().ok()?;
        Some(Self {
            prefix: prefix.to_string(),
            index,
        })
    }

    /// Counter key this placeholder belongs to
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Numeric index
    pub fn index(&self) -> u64 {
        self.index
    }

    /// Category, when the prefix is one of the built-in ones
    pub fn category(&self) -> Option<Category> {
        Category::from_prefix(&self.prefix)
    }
}

impl fmt::Display for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}_{}]", self.prefix, self.index)
    }
}
