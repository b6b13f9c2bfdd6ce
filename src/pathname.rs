//! Conversion between canonical and locale-prefixed URL pathnames.
//!
//! Only the first path segment may carry a locale, and it must match a
//! locale identifier exactly: `/enfoo` is not localized for `en`.

use std::collections::BTreeSet;

/// Path separator.
const SEPARATOR: &str = "/";

/// Canonical form of a path that consisted of a locale segment only.
const ROOT: &str = "/";

/// Returns the locale identifier in the first segment of `pathname`, if any.
///
/// # Examples
/// ```
/// use std::collections::BTreeSet;
/// use locale_pathname::pathname::locale_from_pathname;
///
/// let locales = BTreeSet::from(["en".to_string()]);
/// assert_eq!(locale_from_pathname(&locales, "/en/foo"), Some("en"));
/// assert_eq!(locale_from_pathname(&locales, "/enfoo"), None);
/// ```
#[must_use]
pub fn locale_from_pathname<'a>(locales: &'a BTreeSet<String>, pathname: &str) -> Option<&'a str> {
    let candidate = pathname.split(SEPARATOR).nth(1)?;
    locales.get(candidate).map(String::as_str)
}

/// Removes the locale segment from `pathname`.
///
/// Paths without a locale segment are returned unchanged. A path made of the
/// locale segment alone becomes `/`.
#[must_use]
pub fn canonical_pathname(locales: &BTreeSet<String>, pathname: &str) -> String {
    if locale_from_pathname(locales, pathname).is_none() {
        return pathname.to_string();
    }

    let canonical = pathname
        .split(SEPARATOR)
        .enumerate()
        .filter_map(|(index, segment)| (index != 1).then_some(segment))
        .collect::<Vec<_>>()
        .join(SEPARATOR);

    tracing::trace!("Removed locale segment: {pathname} -> {canonical}");

    if canonical.is_empty() { ROOT.to_string() } else { canonical }
}

/// Prefixes `pathname` with `locale`, replacing any locale segment already present.
///
/// The caller is responsible for checking that `locale` is available.
/// Applying this twice with the same locale yields the result of applying it once.
#[must_use]
pub fn localize_pathname(locales: &BTreeSet<String>, pathname: &str, locale: &str) -> String {
    let canonical = canonical_pathname(locales, pathname);
    if canonical == ROOT {
        return format!("{ROOT}{locale}");
    }

    let mut segments: Vec<&str> = canonical.split(SEPARATOR).collect();
    segments.insert(1, locale);
    let localized = segments.join(SEPARATOR);

    tracing::trace!("Localized pathname: {pathname} -> {localized}");
    localized
}
