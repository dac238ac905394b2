//! Validated, dot-namespaced macro keys.
//!
//! A key starts with an ASCII letter followed by letters, digits, underscores
//! or dots. Dots separate hierarchical segments (`HOME.LOCATION.X`).

use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

use crate::MacroError;

/// Segment separator for child keys.
pub const SEPARATOR: char = '.';

/// Immutable, validated key naming a macro binding or a resolved value.
///
/// # Example
///
/// ```
/// use herald_core::RecordKey;
///
/// let home = RecordKey::new("HOME").unwrap();
/// let x = home.child("X").unwrap();
/// assert_eq!(x.as_str(), "HOME.X");
/// assert_eq!(x.parent(), Some(home));
/// assert!(RecordKey::new("1ST").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordKey(String);

impl RecordKey {
    /// Validate and wrap a key string.
    ///
    /// Returns `None` for empty strings, a leading non-letter, or any
    /// character outside `[A-Za-z0-9_.]`.
    #[must_use]
    pub fn new(key: impl AsRef<str>) -> Option<Self> {
        let key = key.as_ref();
        is_valid(key).then(|| Self(key.to_owned()))
    }

    /// Derive a child key: `self` + `.` + `segment`.
    #[must_use]
    pub fn child(&self, segment: &str) -> Option<Self> {
        if segment.is_empty() {
            return None;
        }
        Self::new(format!("{}{SEPARATOR}{segment}", self.0))
    }

    /// Key one level up the hierarchy, if any.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        let (head, _) = self.0.rsplit_once(SEPARATOR)?;
        Self::new(head)
    }

    /// All ancestors of this key, nearest first, excluding the key itself.
    pub fn ancestors(&self) -> impl Iterator<Item = Self> {
        std::iter::successors(self.parent(), Self::parent)
    }

    /// Dot-separated segments.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split(SEPARATOR)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn is_valid(key: &str) -> bool {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == SEPARATOR)
}

impl FromStr for RecordKey {
    type Err = MacroError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Err(MacroError::BlankArgument("key"));
        }
        Self::new(s).ok_or_else(|| MacroError::InvalidKey(s.to_owned()))
    }
}

impl TryFrom<&str> for RecordKey {
    type Error = MacroError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for RecordKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for RecordKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<RecordKey> for String {
    fn from(key: RecordKey) -> Self {
        key.0
    }
}
