//! Placeholder scanning and single-pass substitution.
//!
//! A placeholder is a valid key wrapped in a delimiter pair: `%NAME%` by
//! default, `{NAME}` for compatibility. Unmatched or malformed delimiters are
//! left alone.

use std::borrow::Cow;

use herald_config::DelimiterStyle;
use herald_core::ResultMap;
use regex::{Captures, Regex};

/// Opening and closing delimiter characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Delimiters {
    pub open: char,
    pub close: char,
}

impl Delimiters {
    /// `%KEY%`
    pub const PERCENT: Self = Self {
        open: '%',
        close: '%',
    };

    /// `{KEY}`
    pub const BRACES: Self = Self {
        open: '{',
        close: '}',
    };

    /// Wrap a key in this delimiter pair.
    #[must_use]
    pub fn token(&self, key: &str) -> String {
        format!("{}{key}{}", self.open, self.close)
    }
}

impl Default for Delimiters {
    fn default() -> Self {
        Self::PERCENT
    }
}

impl From<DelimiterStyle> for Delimiters {
    fn from(style: DelimiterStyle) -> Self {
        let (open, close) = style.chars();
        Self { open, close }
    }
}

/// Scans templates for placeholder keys.
///
/// # Example
///
/// ```
/// use herald_macro::{Delimiters, PlaceholderExtractor};
///
/// let extractor = PlaceholderExtractor::new(Delimiters::PERCENT);
/// let keys: Vec<&str> = extractor.extract("Hi %PLAYER%, 50% off %ITEM%!").collect();
/// assert_eq!(keys, vec!["PLAYER", "ITEM"]);
/// ```
#[derive(Debug, Clone)]
pub struct PlaceholderExtractor {
    delimiters: Delimiters,
    pattern: Regex,
}

impl Default for PlaceholderExtractor {
    fn default() -> Self {
        Self::new(Delimiters::default())
    }
}

impl PlaceholderExtractor {
    #[must_use]
    pub fn new(delimiters: Delimiters) -> Self {
        let open = regex::escape(&delimiters.open.to_string());
        let close = regex::escape(&delimiters.close.to_string());
        let pattern = Regex::new(&format!("{open}([A-Za-z][A-Za-z0-9_.]*){close}"))
            .expect("escaped delimiters form a valid pattern");
        Self {
            delimiters,
            pattern,
        }
    }

    #[must_use]
    pub fn delimiters(&self) -> Delimiters {
        self.delimiters
    }

    /// Lazily yield placeholder keys in order of occurrence.
    ///
    /// Duplicates are yielded each time they occur. Clone the iterator (or
    /// call `extract` again) to restart the scan.
    #[must_use]
    pub fn extract<'r, 't>(&'r self, text: &'t str) -> Placeholders<'r, 't> {
        Placeholders {
            pattern: &self.pattern,
            text,
            pos: 0,
        }
    }

    /// Distinct placeholder keys across several templates, in order of first
    /// occurrence.
    #[must_use]
    pub fn distinct_keys<'t>(&self, texts: &[&'t str]) -> Vec<&'t str> {
        let mut keys: Vec<&'t str> = Vec::new();
        for &text in texts {
            for key in self.extract(text) {
                if !keys.contains(&key) {
                    keys.push(key);
                }
            }
        }
        keys
    }

    /// Replace every placeholder whose key is in `results`.
    ///
    /// Runs in one pass: substituted values are never scanned again, and
    /// placeholders without a result keep their literal token.
    #[must_use]
    pub fn substitute<'t>(&self, text: &'t str, results: &ResultMap) -> Cow<'t, str> {
        self.pattern.replace_all(text, |caps: &Captures<'_>| {
            results
                .get(&caps[1])
                .map_or_else(|| caps[0].to_owned(), str::to_owned)
        })
    }
}

/// Iterator over the placeholder keys of one template.
#[derive(Debug, Clone)]
pub struct Placeholders<'r, 't> {
    pattern: &'r Regex,
    text: &'t str,
    pos: usize,
}

impl<'t> Iterator for Placeholders<'_, 't> {
    type Item = &'t str;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos > self.text.len() {
            return None;
        }
        let caps = self.pattern.captures_at(self.text, self.pos)?;
        let whole = caps.get(0)?;
        self.pos = whole.end();
        caps.get(1).map(|m| m.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use herald_core::RecordKey;
    use pretty_assertions::assert_eq;

    fn results(pairs: &[(&str, &str)]) -> ResultMap {
        pairs
            .iter()
            .map(|(k, v)| (RecordKey::new(k).unwrap(), (*v).to_owned()))
            .collect()
    }

    #[test]
    fn test_extract_in_order_with_duplicates() {
        let extractor = PlaceholderExtractor::default();
        let keys: Vec<&str> = extractor.extract("%A% %B% %A% %C.X%").collect();
        assert_eq!(keys, vec!["A", "B", "A", "C.X"]);
    }

    #[test]
    fn test_extract_ignores_malformed() {
        let extractor = PlaceholderExtractor::default();
        for text in ["no placeholders", "%unclosed", "%%", "%1ABC%", "% SPACED %", "%A B%"] {
            assert_eq!(extractor.extract(text).count(), 0, "{text:?}");
        }
    }

    #[test]
    fn test_extract_skips_stray_delimiter() {
        let extractor = PlaceholderExtractor::default();
        let keys: Vec<&str> = extractor.extract("100% sure, %NAME%").collect();
        assert_eq!(keys, vec!["NAME"]);
    }

    #[test]
    fn test_extract_braces() {
        let extractor = PlaceholderExtractor::new(Delimiters::BRACES);
        let keys: Vec<&str> = extractor.extract("{A} %B% {C.D} {").collect();
        assert_eq!(keys, vec!["A", "C.D"]);
    }

    #[test]
    fn test_extract_is_restartable() {
        let extractor = PlaceholderExtractor::default();
        let scan = extractor.extract("%A% %B%");
        let first: Vec<&str> = scan.clone().collect();
        let second: Vec<&str> = scan.collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_extract_is_lazy() {
        let extractor = PlaceholderExtractor::default();
        let mut scan = extractor.extract("%A% %B% %C%");
        assert_eq!(scan.next(), Some("A"));
        assert_eq!(scan.next(), Some("B"));
        assert_eq!(scan.next(), Some("C"));
        assert_eq!(scan.next(), None);
        assert_eq!(scan.next(), None);
    }

    #[test]
    fn test_distinct_keys_across_templates() {
        let extractor = PlaceholderExtractor::default();
        let keys = extractor.distinct_keys(&["%A% %B%", "%B% %C%", ""]);
        assert_eq!(keys, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_substitute_resolved_and_unresolved() {
        let extractor = PlaceholderExtractor::default();
        let out = extractor.substitute("%A% and %MISSING%", &results(&[("A", "1")]));
        assert_eq!(out, "1 and %MISSING%");
    }

    #[test]
    fn test_substitute_does_not_rescan_values() {
        let extractor = PlaceholderExtractor::default();
        let map = results(&[("A", "%B%"), ("B", "boom")]);
        assert_eq!(extractor.substitute("%A%", &map), "%B%");
    }

    #[test]
    fn test_substitute_all_occurrences() {
        let extractor = PlaceholderExtractor::new(Delimiters::BRACES);
        let out = extractor.substitute("{X}-{X}-{X}", &results(&[("X", "y")]));
        assert_eq!(out, "y-y-y");
    }

    #[test]
    fn test_token() {
        assert_eq!(Delimiters::PERCENT.token("A.B"), "%A.B%");
        assert_eq!(Delimiters::BRACES.token("A"), "{A}");
        assert_eq!(Delimiters::from(DelimiterStyle::Braces), Delimiters::BRACES);
    }
}
