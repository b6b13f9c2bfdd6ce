//! Core types used throughout the project.

use std::fmt;

/// Ordered list of segments addressing one location within a translation tree.
///
/// A key path is locale-independent: `["nested", "greeting"]` names the same
/// location in every locale of a well-formed locale table.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct KeyPath {
    /// Path segments, outermost first.
    segments: Vec<String>,
}

impl KeyPath {
    /// Creates an empty key path (the tree root).
    #[must_use]
    pub const fn root() -> Self {
        Self { segments: Vec::new() }
    }

    /// Splits a separator-joined key into a key path.
    ///
    /// # Examples
    /// ```
    /// use locale_pathname::types::KeyPath;
    ///
    /// let path = KeyPath::parse("nested.greeting", ".");
    /// assert_eq!(path.segments(), ["nested", "greeting"]);
    /// ```
    #[must_use]
    pub fn parse(text: &str, separator: &str) -> Self {
        if text.is_empty() {
            return Self::root();
        }
        text.split(separator).collect()
    }

    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.segments.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Appends a segment in place.
    pub fn push(&mut self, segment: impl Into<String>) {
        self.segments.push(segment.into());
    }

    /// Returns a new key path extended by one segment.
    #[must_use]
    pub fn child(&self, segment: impl Into<String>) -> Self {
        let mut path = self.clone();
        path.push(segment);
        path
    }

    /// Joins the segments with `separator`.
    #[must_use]
    pub fn join(&self, separator: &str) -> String {
        self.segments.join(separator)
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.join("."))
    }
}

impl<S: Into<String>> FromIterator<S> for KeyPath {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self { segments: iter.into_iter().map(Into::into).collect() }
    }
}

impl From<Vec<String>> for KeyPath {
    fn from(segments: Vec<String>) -> Self {
        Self { segments }
    }
}

impl From<&[&str]> for KeyPath {
    fn from(segments: &[&str]) -> Self {
        segments.iter().copied().collect()
    }
}

impl<const N: usize> From<[&str; N]> for KeyPath {
    fn from(segments: [&str; N]) -> Self {
        segments.into_iter().collect()
    }
}
