//! IPv4 and IPv6 address detection

use super::{char_after, char_before, compile, is_word_char, scan_where, DetectorStrategy, Match};
use crate::domain::{Category, Mode, Result};
use regex::Regex;
use std::ops::Range;

const OCTET: &str = r"(?:25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)";
const HEXTET: &str = r"[0-9a-fA-F]{1,4}";

/// At most seven explicit groups around a `::`
const MAX_COMPRESSED_GROUPS: usize = 7;

/// Detects IP addresses
///
/// IPv4 is tried first at every position. IPv6 is matched either in its full
/// eight-group form or compressed around a single `::`, and never as part of
/// a longer run of word characters or colons.
///
/// In [`Mode::Developer`] loopback, unspecified, link-local and RFC 1918
/// private addresses are dropped.
pub struct IpStrategy {
    regex: Regex,
}

impl IpStrategy {
    pub fn new() -> Result<Self> {
        let ipv4 = format!(r"\b(?:{OCTET}\.){{3}}{OCTET}\b");
        let full = format!(r"{HEXTET}(?::{HEXTET}){{7}}");
        let compressed = format!(r"(?:{HEXTET}(?::{HEXTET}){{0,6}})?::(?:{HEXTET}(?::{HEXTET}){{0,6}})?");
        let ipv6 = format!(r"(?:{full}|{compressed})");

        Ok(Self {
            regex: compile(&format!("{ipv4}|{ipv6}"))?,
        })
    }
}

impl DetectorStrategy for IpStrategy {
    fn category(&self) -> Category {
        Category::Ip
    }

    fn find<'t>(&self, text: &'t str, mode: Mode) -> Result<Vec<Match<'t>>> {
        let mut matches = scan_where(&self.regex, text, ipv6_isolated);
        matches.retain(|m| plausible_group_count(m.text));
        if mode == Mode::Developer {
            matches.retain(|m| !is_local_address(m.text));
        }
        Ok(matches)
    }
}

/// An IPv6 candidate may not touch a word character or colon on either
/// side, nor run into a dotted number
fn ipv6_isolated(text: &str, range: Range<usize>) -> bool {
    if !text[range.clone()].contains(':') {
        return true;
    }
    let glued = |c: char| is_word_char(c) || c == ':';
    if char_before(text, range.start).is_some_and(glued) {
        return false;
    }
    match char_after(text, range.end) {
        Some(c) if glued(c) => false,
        Some('.') => !char_after(text, range.end + 1).is_some_and(|c| c.is_ascii_digit()),
        _ => true,
    }
}

fn plausible_group_count(candidate: &str) -> bool {
    if !candidate.contains("::") {
        return true;
    }
    candidate.split(':').filter(|g| !g.is_empty()).count() <= MAX_COMPRESSED_GROUPS
}

/// Loopback, unspecified, link-local or private-range address
pub fn is_local_address(ip: &str) -> bool {
    let lower = ip.to_ascii_lowercase();

    if lower == "::1" || lower == "::" {
        return true;
    }
    // fe80::/10
    if ["fe8", "fe9", "fea", "feb"]
        .iter()
        .any(|p| lower.starts_with(p))
    {
        return true;
    }

    if lower.starts_with("127.") || lower == "0.0.0.0" {
        return true;
    }
    if lower.starts_with("10.") || lower.starts_with("192.168.") || lower.starts_with("169.254.") {
        return true;
    }

    // 172.16.0.0/12
    if let Some(rest) = lower.strip_prefix("172.") {
        if let Some((second, _)) = rest.split_once('.') {
            if let Ok(octet) = second.parse::<u8>() {
                return (16..=31).contains(&octet);
            }
        }
    }

    false
}
