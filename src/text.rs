//! Text helpers shared by the analysis stages.

use regex::Regex;
use std::sync::OnceLock;
use unicode_normalization::UnicodeNormalization;

/// A regex compiled on first use.
///
/// Patterns are compile-time constants; a pattern that fails to compile
/// simply never matches.
pub(crate) struct LazyRegex {
    pattern: &'static str,
    cell: OnceLock<Option<Regex>>,
}

impl LazyRegex {
    pub(crate) const fn new(pattern: &'static str) -> Self {
        Self {
            pattern,
            cell: OnceLock::new(),
        }
    }

    fn get(&self) -> Option<&Regex> {
        self.cell
            .get_or_init(|| match Regex::new(self.pattern) {
                Ok(re) => Some(re),
                Err(e) => {
                    log::warn!("invalid pattern {:?}: {}", self.pattern, e);
                    None
                }
            })
            .as_ref()
    }

    pub(crate) fn is_match(&self, text: &str) -> bool {
        self.get().is_some_and(|re| re.is_match(text))
    }

    pub(crate) fn count(&self, text: &str) -> usize {
        self.get().map_or(0, |re| re.find_iter(text).count())
    }

    pub(crate) fn find_all<'t>(&self, text: &'t str) -> Vec<&'t str> {
        self.get()
            .map(|re| re.find_iter(text).map(|m| m.as_str()).collect())
            .unwrap_or_default()
    }
}

pub(crate) static PRICE: LazyRegex =
    LazyRegex::new(r"[$¥€]\s?\d+|/mo|/yr|per month|monthly|年付|月付");
pub(crate) static STATS: LazyRegex = LazyRegex::new(r"\d+%|\d+x|\d+k|\d+,\d+");

/// NFC-normalize, collapse whitespace and truncate to `limit` characters.
pub(crate) fn clean(text: &str, limit: usize) -> String {
    let normalized: String = text.nfc().collect();
    normalized
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .chars()
        .take(limit)
        .collect()
}

/// Check whether any needle occurs in the haystack.
pub(crate) fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}

/// Parse the first `<number>px` value.
pub(crate) fn parse_px(value: &str) -> Option<f64> {
    let value = value.trim();
    let end = value.find("px")?;
    let number = value[..end].split_whitespace().last()?;
    number.parse::<f64>().ok()
}

/// Lowercase, dash-separated slug.
pub(crate) fn slugify(value: &str) -> String {
    let mut slug = String::new();
    for c in value.to_lowercase().chars() {
        if c.is_alphanumeric() {
            slug.push(c);
        } else if !slug.ends_with('-') && !slug.is_empty() {
            slug.push('-');
        }
    }
    slug.trim_end_matches('-').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_collapses_and_truncates() {
        assert_eq!(clean("  Hello \n  world  ", 160), "Hello world");
        assert_eq!(clean("abcdef", 3), "abc");
    }

    #[test]
    fn test_clean_composes_unicode() {
        // "e" + combining acute accent
        assert_eq!(clean("Cafe\u{0301}", 160), "Café");
    }

    #[test]
    fn test_price_pattern() {
        assert!(PRICE.is_match("starts at $99/mo"));
        assert!(PRICE.is_match("billed monthly"));
        assert!(!PRICE.is_match("free forever"));
    }

    #[test]
    fn test_stats_pattern() {
        assert_eq!(STATS.count("99% uptime, 10x faster, 1,200 teams"), 3);
    }

    #[test]
    fn test_parse_px() {
        assert_eq!(parse_px("16px"), Some(16.0));
        assert_eq!(parse_px("12.5px 24px"), Some(12.5));
        assert_eq!(parse_px("1rem"), None);
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Pricing & Plans!"), "pricing-plans");
        assert_eq!(slugify("  FAQ "), "faq");
    }
}
