//! Placeholder restoration
//!
//! Turns placeholder tokens in text coming back from the outside world into
//! the original values stored in the vault.

use crate::domain::{AigisError, Result};
use crate::vault::VaultDocument;
use regex::{Captures, Regex};
use serde::Serialize;
use std::ops::Range;

/// Placeholder token shape: `[`, uppercase words joined by `_`, `_`, digits, `]`
const PLACEHOLDER_PATTERN: &str = r"\[[A-Z]+(?:_[A-Z]+)*_[0-9]+\]";

/// Outcome of restoring one text
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RestorationResult {
    /// Text with every known placeholder replaced
    pub restored_text: String,
    /// Number of placeholder occurrences replaced
    pub restored: usize,
    /// Distinct placeholder tokens not found in the vault, in order of appearance
    pub unresolved: Vec<String>,
}

/// Finds and resolves placeholder tokens
#[derive(Debug, Clone)]
pub struct PlaceholderScanner {
    regex: Regex,
}

impl PlaceholderScanner {
    pub fn new() -> Result<Self> {
        let regex = Regex::new(PLACEHOLDER_PATTERN)
            .map_err(|e| AigisError::Pattern(format!("placeholder pattern: {e}")))?;
        Ok(Self { regex })
    }

    /// Placeholder tokens in `text`, left to right
    pub fn find<'t>(&self, text: &'t str) -> Vec<&'t str> {
        self.regex.find_iter(text).map(|m| m.as_str()).collect()
    }

    /// Byte ranges of the placeholder tokens in `text`, left to right
    pub fn token_ranges(&self, text: &str) -> Vec<Range<usize>> {
        self.regex.find_iter(text).map(|m| m.range()).collect()
    }

    /// Replace every placeholder known to `vault` with its original
    ///
    /// Unknown tokens stay as they are and are reported in
    /// [`RestorationResult::unresolved`].
    pub fn restore(&self, text: &str, vault: &VaultDocument) -> RestorationResult {
        let mut restored = 0;
        let mut unresolved: Vec<String> = Vec::new();

        let restored_text = self
            .regex
            .replace_all(text, |caps: &Captures| {
                let token = &caps[0];
                match vault.lookup_original(token) {
                    Some(original) => {
                        restored += 1;
                        original.to_string()
                    }
                    None => {
                        if !unresolved.iter().any(|u| u == token) {
                            unresolved.push(token.to_string());
                        }
                        token.to_string()
                    }
                }
            })
            .into_owned();

        RestorationResult {
            restored_text,
            restored,
            unresolved,
        }
    }
}

/// Short masked rendering of a sensitive value
///
/// Values longer than eight characters keep their first and last four
/// characters; anything shorter is fully masked.
pub fn masked_preview(original: &str) -> String {
    let chars: Vec<char> = original.chars().collect();
    if chars.len() > 8 {
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{head}...{tail}")
    } else {
        "***".to_string()
    }
}
