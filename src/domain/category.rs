//! PII categories and detection modes

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of sensitive value a detector strategy recognizes
///
/// Variants are declared in catalog priority order, so the derived `Ord`
/// sorts categories the way strategies run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    /// User-supplied sensitive terms
    Custom,
    /// Email addresses
    Email,
    /// International bank account numbers
    Iban,
    /// Telephone numbers
    #[serde(rename = "PHONE_NUMBER")]
    Phone,
    /// Postal addresses
    Address,
    /// IPv4 and IPv6 addresses
    #[serde(rename = "IP_ADDRESS")]
    Ip,
    /// Web URLs and bare domains
    Url,
    /// Windows and Unix file system paths
    #[serde(rename = "FILE_PATH")]
    Path,
}

impl Category {
    /// Fixed order in which strategies are applied
    pub const PRIORITY: [Category; 8] = [
        Category::Custom,
        Category::Email,
        Category::Iban,
        Category::Phone,
        Category::Address,
        Category::Ip,
        Category::Url,
        Category::Path,
    ];

    /// Placeholder prefix, also the key of the per-category vault counter
    pub fn prefix(&self) -> &'static str {
        match self {
            Self::Custom => "CUSTOM",
            Self::Email => "EMAIL",
            Self::Iban => "IBAN",
            Self::Phone => "PHONE_NUMBER",
            Self::Address => "ADDRESS",
            Self::Ip => "IP_ADDRESS",
            Self::Url => "URL",
            Self::Path => "FILE_PATH",
        }
    }

    /// Key used in usage statistics and module toggles
    pub fn stats_key(&self) -> &'static str {
        match self {
            Self::Custom => "custom",
            Self::Email => "email",
            Self::Iban => "iban",
            Self::Phone => "phone",
            Self::Address => "address",
            Self::Ip => "ip",
            Self::Url => "url",
            Self::Path => "path",
        }
    }

    /// Resolve a placeholder prefix back to its category
    pub fn from_prefix(prefix: &str) -> Option<Self> {
        Self::PRIORITY.into_iter().find(|c| c.prefix() == prefix)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

/// Detection mode
///
/// Developer mode relaxes IP and URL detection so loopback addresses,
/// private ranges and local development hosts pass through untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Mask everything that looks sensitive
    #[default]
    Strict,
    /// Keep local and private infrastructure values
    Developer,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Strict => write!(f, "strict"),
            Self::Developer => write!(f, "developer"),
        }
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "strict" => Ok(Self::Strict),
            "developer" | "dev" => Ok(Self::Developer),
            other => Err(format!(
                "Invalid mode '{other}'. Must be one of: strict, developer"
            )),
        }
    }
}
