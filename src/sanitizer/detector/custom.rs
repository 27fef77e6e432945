//! User-defined sensitive terms

use super::{compile, is_word_char, scan, DetectorStrategy, Match};
use crate::domain::{Category, Mode, Result};
use regex::Regex;

/// Detects a user-supplied list of terms, case-insensitively
///
/// Longer terms are tried first so that `Superman` wins over `Super`. Terms
/// that begin or end with a word character are anchored with `\b` on that
/// side. Terms like `C++` get `\B` on a symbol edge, so they still may not
/// touch a word character there.
pub struct CustomTermsStrategy {
    words: Vec<String>,
    regex: Option<Regex>,
}

impl CustomTermsStrategy {
    /// Build the strategy from raw, possibly messy user input
    ///
    /// # Errors
    ///
    /// Returns [`crate::domain::AigisError::Pattern`] if the combined pattern
    /// fails to compile.
    pub fn new(words: &[String]) -> Result<Self> {
        let words = normalize_custom_words(words);
        let regex = build_pattern(&words).map(|p| compile(&p)).transpose()?;
        Ok(Self { words, regex })
    }

    /// The normalized term list
    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl DetectorStrategy for CustomTermsStrategy {
    fn category(&self) -> Category {
        Category::Custom
    }

    fn find<'t>(&self, text: &'t str, _mode: Mode) -> Result<Vec<Match<'t>>> {
        match &self.regex {
            Some(regex) => Ok(scan(regex, text)),
            None => Ok(Vec::new()),
        }
    }
}

/// Trim terms, drop blanks and remove case-insensitive duplicates
///
/// The first spelling of a duplicated term is kept and input order is
/// otherwise preserved.
pub fn normalize_custom_words(words: &[String]) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    words
        .iter()
        .map(|w| w.trim())
        .filter(|w| !w.is_empty())
        .filter(|w| seen.insert(w.to_lowercase()))
        .map(String::from)
        .collect()
}

fn build_pattern(words: &[String]) -> Option<String> {
    if words.is_empty() {
        return None;
    }

    let mut ordered: Vec<&String> = words.iter().collect();
    // stable: equal lengths keep their configured order
    ordered.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()));

    let alternatives: Vec<String> = ordered
        .into_iter()
        .map(|word| {
            let start = match word.chars().next() {
                Some(c) if is_word_char(c) => r"\b",
                _ => r"\B",
            };
            let end = match word.chars().last() {
                Some(c) if is_word_char(c) => r"\b",
                _ => r"\B",
            };
            format!("{start}{}{end}", regex::escape(word))
        })
        .collect();

    Some(format!("(?i)(?:{})", alternatives.join("|")))
}
