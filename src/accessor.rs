//! Placeholder interpolation for translation templates.

use std::fmt;
use std::sync::Arc;

use crate::config::{
    ConfigError,
    PlaceholderConfig,
    ValidationError,
};

/// Callable wrapper around one template string.
///
/// Calling [`Accessor::format`] replaces every `{name}` occurrence for each
/// supplied argument. Placeholders without a matching argument stay verbatim,
/// and arguments without a matching placeholder are ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Accessor {
    /// Raw template, e.g. `Hello, {name}!`.
    template: String,
    /// Delimiters shared by every accessor of one manager.
    delimiters: Arc<PlaceholderConfig>,
}

impl Accessor {
    /// Creates an accessor using the default `{` / `}` delimiters.
    #[must_use]
    pub fn new(template: impl Into<String>) -> Self {
        Self::from_validated(template, Arc::new(PlaceholderConfig::default()))
    }

    /// Creates an accessor with custom delimiters.
    ///
    /// # Errors
    /// - [`ConfigError::ValidationErrors`] when the prefix or suffix is empty
    pub fn with_delimiters(
        template: impl Into<String>,
        delimiters: Arc<PlaceholderConfig>,
    ) -> Result<Self, ConfigError> {
        let mut errors = Vec::new();
        if delimiters.prefix.is_empty() {
            errors.push(ValidationError::new("placeholder.prefix", "The prefix cannot be empty"));
        }
        if delimiters.suffix.is_empty() {
            errors.push(ValidationError::new("placeholder.suffix", "The suffix cannot be empty"));
        }
        if !errors.is_empty() {
            return Err(ConfigError::ValidationErrors(errors));
        }
        Ok(Self::from_validated(template, delimiters))
    }

    /// Creates an accessor from delimiters already checked by `ManagerSettings::validate`.
    pub(crate) fn from_validated(
        template: impl Into<String>,
        delimiters: Arc<PlaceholderConfig>,
    ) -> Self {
        Self { template: template.into(), delimiters }
    }

    #[must_use]
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Returns the template without substitution.
    #[must_use]
    pub fn call(&self) -> String {
        self.template.clone()
    }

    /// Interpolates `args` into the template.
    ///
    /// Replacements are applied in the iteration order of `args`, so a value that
    /// itself looks like a placeholder may be replaced by a later argument.
    ///
    /// # Examples
    /// ```
    /// use locale_pathname::accessor::Accessor;
    ///
    /// let accessor = Accessor::new("foo {bar} baz {bar}");
    /// assert_eq!(accessor.format([("bar", "X")]), "foo X baz X");
    /// assert_eq!(accessor.format([("count", 3)]), "foo {bar} baz {bar}");
    /// ```
    #[must_use]
    pub fn format<I, K, V>(&self, args: I) -> String
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: fmt::Display,
    {
        let PlaceholderConfig { prefix, suffix } = self.delimiters.as_ref();
        args.into_iter().fold(self.template.clone(), |text, (key, value)| {
            let placeholder = format!("{prefix}{}{suffix}", key.as_ref());
            if text.contains(&placeholder) {
                text.replace(&placeholder, &value.to_string())
            } else {
                text
            }
        })
    }

    /// Lists placeholder names in order of first appearance, without duplicates.
    #[must_use]
    pub fn placeholders(&self) -> Vec<&str> {
        let PlaceholderConfig { prefix, suffix } = self.delimiters.as_ref();
        let mut names: Vec<&str> = Vec::new();
        let mut rest = self.template.as_str();
        if prefix.is_empty() || suffix.is_empty() {
            return names;
        }

        while let Some(start) = rest.find(prefix.as_str()) {
            let Some(after_prefix) = rest.get(start + prefix.len()..) else {
                break;
            };
            let Some(end) = after_prefix.find(suffix.as_str()) else {
                break;
            };
            let name = after_prefix.get(..end).unwrap_or_default();
            if name.contains(prefix.as_str()) {
                rest = after_prefix;
                continue;
            }
            if !name.is_empty() && !names.contains(&name) {
                names.push(name);
            }
            rest = after_prefix.get(end + suffix.len()..).unwrap_or_default();
        }

        names
    }
}

impl fmt::Display for Accessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.template)
    }
}
