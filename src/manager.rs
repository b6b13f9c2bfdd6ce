//! Locale manager: owns the locale table and derives accessors and pathnames from it.

use std::collections::{
    BTreeMap,
    BTreeSet,
    HashMap,
};
use std::fmt;
use std::sync::{
    Arc,
    PoisonError,
    RwLock,
};

use crate::accessor::Accessor;
use crate::config::{
    ConfigError,
    ManagerSettings,
    PlaceholderConfig,
    ShapeValidation,
};
use crate::error::LocaleError;
use crate::pathname;
use crate::tree::{
    LocalizedTree,
    TranslationTree,
};
use crate::types::KeyPath;

/// Mapping from locale identifier to its translation tree.
pub type LocaleTable = BTreeMap<String, TranslationTree>;

/// A key path that one locale defines and another does not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeMismatch {
    /// Locale missing the key path.
    pub locale: String,
    pub key_path: KeyPath,
}

/// Owns an immutable locale table and serves per-locale accessors and
/// pathname conversions.
///
/// The table and default locale are fixed at construction. Localized accessor
/// trees are built on first request per locale and cached for the manager's
/// lifetime; repeated [`LocaleManager::localize`] calls return the same [`Arc`].
pub struct LocaleManager {
    /// Caller-supplied translations.
    table: LocaleTable,
    /// Keys of `table`.
    available_locales: BTreeSet<String>,
    /// Always a member of `available_locales`.
    default_locale: String,
    /// Validated settings.
    settings: ManagerSettings,
    /// Delimiters handed to every accessor.
    delimiters: Arc<PlaceholderConfig>,
    /// Localized trees built so far. Entries are only ever added.
    accessor_cache: RwLock<HashMap<String, Arc<LocalizedTree>>>,
}

impl LocaleManager {
    /// Creates a manager with default settings.
    ///
    /// Fails with [`LocaleError::LocaleNotFound`] when `default_locale` is not
    /// a key of `table`.
    pub fn new(table: LocaleTable, default_locale: impl Into<String>) -> Result<Self, LocaleError> {
        Self::with_settings(table, default_locale, ManagerSettings::default())
    }

    /// Creates a manager with explicit settings.
    ///
    /// # Errors
    /// - [`LocaleError::Config`] when `settings` fail validation
    /// - [`LocaleError::LeafRoot`] when a locale's tree is a bare string
    /// - [`LocaleError::LocaleNotFound`] when `default_locale` is unavailable
    /// - [`LocaleError::ShapeMismatch`] under [`ShapeValidation::Strict`] when locales differ in shape
    pub fn with_settings(
        table: LocaleTable,
        default_locale: impl Into<String>,
        settings: ManagerSettings,
    ) -> Result<Self, LocaleError> {
        let default_locale = default_locale.into();
        settings.validate().map_err(ConfigError::ValidationErrors)?;

        if let Some((locale, _)) = table.iter().find(|(_, tree)| tree.is_leaf()) {
            return Err(LocaleError::LeafRoot(locale.clone()));
        }

        let available_locales: BTreeSet<String> = table.keys().cloned().collect();
        if !available_locales.contains(&default_locale) {
            return Err(LocaleError::LocaleNotFound(default_locale));
        }

        let mismatches = find_shape_mismatches(&table);
        if let Some(first) = mismatches.first() {
            match settings.shape_validation {
                ShapeValidation::Strict => {
                    return Err(LocaleError::ShapeMismatch {
                        locale: first.locale.clone(),
                        key_path: first.key_path.clone(),
                    });
                }
                ShapeValidation::Lazy => {
                    tracing::warn!(
                        "Locale table has {} key path(s) missing from some locales (first: '{}' in '{}')",
                        mismatches.len(),
                        first.key_path,
                        first.locale
                    );
                }
            }
        }

        tracing::debug!(
            "Created locale manager with locales {available_locales:?} (default: {default_locale})"
        );

        let delimiters = Arc::new(settings.placeholder.clone());
        Ok(Self {
            table,
            available_locales,
            default_locale,
            settings,
            delimiters,
            accessor_cache: RwLock::new(HashMap::new()),
        })
    }

    /// Returns every locale identifier as an owned set.
    #[must_use]
    pub fn available_locales(&self) -> BTreeSet<String> {
        self.available_locales.clone()
    }

    #[must_use]
    pub fn default_locale(&self) -> &str {
        &self.default_locale
    }

    #[must_use]
    pub fn is_available(&self, locale: &str) -> bool {
        self.available_locales.contains(locale)
    }

    #[must_use]
    pub const fn settings(&self) -> &ManagerSettings {
        &self.settings
    }

    /// Lists every leaf key path of the default locale.
    ///
    /// All locales are assumed to share this shape; see
    /// [`LocaleManager::shape_mismatches`] for the exceptions.
    #[must_use]
    pub fn keys(&self) -> Vec<KeyPath> {
        self.table.get(&self.default_locale).map(TranslationTree::key_paths).unwrap_or_default()
    }

    /// Parses a textual key using the configured separator.
    #[must_use]
    pub fn key(&self, text: &str) -> KeyPath {
        KeyPath::parse(text, &self.settings.key_separator)
    }

    /// Returns the raw translation tree of `locale`.
    pub fn values(&self, locale: &str) -> Result<&TranslationTree, LocaleError> {
        self.table.get(locale).ok_or_else(|| LocaleError::LocaleNotFound(locale.to_string()))
    }

    /// Returns the accessor tree of `locale`, building and caching it on first use.
    pub fn localize(&self, locale: &str) -> Result<Arc<LocalizedTree>, LocaleError> {
        let values = self.values(locale)?;

        if let Some(tree) =
            self.accessor_cache.read().unwrap_or_else(PoisonError::into_inner).get(locale)
        {
            tracing::trace!("Accessor cache hit: {locale}");
            return Ok(Arc::clone(tree));
        }

        let mut cache = self.accessor_cache.write().unwrap_or_else(PoisonError::into_inner);
        let tree = cache.entry(locale.to_string()).or_insert_with(|| {
            let tree = self.build_accessors(values);
            tracing::debug!("Built accessor tree for '{locale}' ({} entries)", tree.leaf_count());
            Arc::new(tree)
        });
        Ok(Arc::clone(tree))
    }

    /// Resolves `key_path` in `locale` and interpolates `args`.
    pub fn translate<I, K, V>(
        &self,
        locale: &str,
        key_path: &KeyPath,
        args: I,
    ) -> Result<String, LocaleError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: fmt::Display,
    {
        let tree = self.localize(locale)?;
        let accessor = tree.resolve(key_path)?;
        Ok(accessor.format(args))
    }

    /// Key paths that some locale defines and another lacks.
    #[must_use]
    pub fn shape_mismatches(&self) -> Vec<ShapeMismatch> {
        find_shape_mismatches(&self.table)
    }

    /// Returns the locale identifier in the first segment of `pathname`, if any.
    #[must_use]
    pub fn locale_from_pathname(&self, pathname: &str) -> Option<&str> {
        pathname::locale_from_pathname(&self.available_locales, pathname)
    }

    /// Removes the locale segment from `pathname`; unlocalized paths are returned unchanged.
    #[must_use]
    pub fn canonical_pathname(&self, pathname: &str) -> String {
        pathname::canonical_pathname(&self.available_locales, pathname)
    }

    /// Prefixes `pathname` with `locale`, replacing any locale segment already present.
    pub fn localize_pathname(&self, pathname: &str, locale: &str) -> Result<String, LocaleError> {
        if !self.is_available(locale) {
            return Err(LocaleError::LocaleNotFound(locale.to_string()));
        }
        Ok(pathname::localize_pathname(&self.available_locales, pathname, locale))
    }

    /// Wraps every template of `values` in an accessor.
    fn build_accessors(&self, values: &TranslationTree) -> LocalizedTree {
        values.map_leaves(&mut |template: &String| {
            Accessor::from_validated(template.as_str(), Arc::clone(&self.delimiters))
        })
    }
}

impl fmt::Debug for LocaleManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cached = self.accessor_cache.read().unwrap_or_else(PoisonError::into_inner).len();
        f.debug_struct("LocaleManager")
            .field("available_locales", &self.available_locales)
            .field("default_locale", &self.default_locale)
            .field("settings", &self.settings)
            .field("cached_locales", &cached)
            .finish_non_exhaustive()
    }
}

/// Compares every locale's key paths against the union of all key paths.
fn find_shape_mismatches(table: &LocaleTable) -> Vec<ShapeMismatch> {
    let per_locale: Vec<(&String, BTreeSet<KeyPath>)> = table
        .iter()
        .map(|(locale, tree)| (locale, tree.key_paths().into_iter().collect()))
        .collect();
    let all_paths: BTreeSet<&KeyPath> = per_locale.iter().flat_map(|(_, paths)| paths).collect();

    per_locale
        .iter()
        .flat_map(|(locale, paths)| {
            all_paths.iter().filter(move |path| !paths.contains(**path)).map(move |path| {
                ShapeMismatch { locale: (*locale).clone(), key_path: (*path).clone() }
            })
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::thread;

    use googletest::prelude::*;
    use rstest::rstest;
    use serde_json::json;

    use super::*;
    use crate::test_utils::{
        create_manager,
        create_table,
    };

    #[rstest]
    fn test_new_rejects_unknown_default_locale() {
        let result = LocaleManager::new(create_table(), "de");

        assert!(matches!(result, Err(LocaleError::LocaleNotFound(locale)) if locale == "de"));
    }

    #[rstest]
    fn test_new_rejects_empty_table() {
        let result = LocaleManager::new(LocaleTable::new(), "en");

        assert!(matches!(result, Err(LocaleError::LocaleNotFound(_))));
    }

    #[rstest]
    fn test_new_rejects_string_root() {
        let table: LocaleTable =
            serde_json::from_value(json!({ "en": "hello", "fr": { "a": "b" } })).unwrap();

        let result = LocaleManager::new(table, "fr");

        assert!(matches!(result, Err(LocaleError::LeafRoot(locale)) if locale == "en"));
    }

    #[rstest]
    #[allow(clippy::panic)]
    fn test_debug_reads_poisoned_cache() {
        let manager = Arc::new(create_manager());
        let first = manager.localize("en").unwrap();
        let holder = Arc::clone(&manager);
        let _ = thread::spawn(move || {
            let _guard = holder.accessor_cache.write().unwrap();
            panic!("poison the cache lock");
        })
        .join();

        assert!(manager.accessor_cache.is_poisoned());
        assert!(format!("{manager:?}").contains("cached_locales: 1"));
        assert!(Arc::ptr_eq(&first, &manager.localize("en").unwrap()));
    }

    #[rstest]
    fn test_new_rejects_invalid_settings() {
        let settings = ManagerSettings { key_separator: String::new(), ..Default::default() };

        let result = LocaleManager::with_settings(create_table(), "en", settings);

        assert!(matches!(result, Err(LocaleError::Config(ConfigError::ValidationErrors(_)))));
    }

    #[googletest::test]
    fn test_query_accessors() {
        let manager = create_manager();

        assert_eq!(manager.default_locale(), "en");
        assert_eq!(manager.available_locales(), BTreeSet::from(["en".to_string(), "fr".to_string()]));
        expect_that!(manager.is_available("fr"), eq(true));
        expect_that!(manager.is_available("de"), eq(false));
    }

    #[googletest::test]
    fn test_available_locales_is_decoupled() {
        let manager = create_manager();

        let mut locales = manager.available_locales();
        locales.insert("de".to_string());
        locales.remove("en");

        expect_that!(manager.available_locales().len(), eq(2));
        expect_that!(manager.is_available("en"), eq(true));
        expect_that!(manager.is_available("de"), eq(false));
    }

    #[googletest::test]
    fn test_keys_lists_leaf_paths() {
        let manager = create_manager();

        let rendered: Vec<String> = manager.keys().iter().map(ToString::to_string).collect();

        assert_eq!(rendered, ["nested.greeting", "nested.items", "title"]);
    }

    #[googletest::test]
    fn test_localize_is_memoized() {
        let manager = create_manager();

        let first = manager.localize("en").unwrap();
        let second = manager.localize("en").unwrap();
        let other = manager.localize("fr").unwrap();

        expect_that!(Arc::ptr_eq(&first, &second), eq(true));
        expect_that!(Arc::ptr_eq(&first, &other), eq(false));
    }

    #[rstest]
    fn test_localize_unknown_locale() {
        let manager = create_manager();

        let result = manager.localize("de");

        assert!(matches!(result, Err(LocaleError::LocaleNotFound(locale)) if locale == "de"));
    }

    #[rstest]
    #[case::english("en", "Hello Ada")]
    #[case::french("fr", "Bonjour Ada")]
    fn test_localize_interpolates(#[case] locale: &str, #[case] expected: &str) {
        let manager = create_manager();
        let tree = manager.localize(locale).unwrap();

        let accessor = tree.resolve(&manager.key("nested.greeting")).unwrap();

        assert_eq!(accessor.format([("name", "Ada")]), expected);
    }

    #[rstest]
    fn test_translate() {
        let manager = create_manager();

        let text = manager.translate("en", &manager.key("nested.items"), [("count", 3)]).unwrap();
        let untouched = manager.translate("en", &manager.key("nested.items"), [("other", 1)]).unwrap();

        assert_eq!(text, "3 items, 3 in total");
        assert_eq!(untouched, "{count} items, {count} in total");
    }

    #[rstest]
    #[case::unknown_segment("invalid")]
    #[case::internal_node("nested")]
    fn test_translate_invalid_path(#[case] key: &str) {
        let manager = create_manager();

        let result = manager.translate("en", &manager.key(key), Vec::<(&str, &str)>::new());

        assert!(matches!(result, Err(LocaleError::InvalidPath(_))));
    }

    #[rstest]
    fn test_values_returns_raw_templates() {
        let manager = create_manager();

        let template = manager.values("fr").unwrap().resolve(&manager.key("title")).unwrap();

        assert_eq!(template, "Titre");
    }

    #[rstest]
    fn test_custom_key_separator_and_delimiters() {
        let settings: ManagerSettings = serde_json::from_value(json!({
            "keySeparator": "/",
            "placeholder": { "prefix": "<", "suffix": ">" }
        }))
        .unwrap();
        let mut table = LocaleTable::new();
        table.insert(
            "en".to_string(),
            TranslationTree::from_json(json!({ "a": { "b": "Hi <name> {name}" } })).unwrap(),
        );
        let manager = LocaleManager::with_settings(table, "en", settings).unwrap();

        let text = manager.translate("en", &manager.key("a/b"), [("name", "Bo")]).unwrap();

        assert_eq!(text, "Hi Bo {name}");
    }

    #[rstest]
    fn test_shape_mismatch_lazy_by_default() {
        let mut table = create_table();
        table.insert(
            "de".to_string(),
            TranslationTree::from_json(json!({ "title": "Titel" })).unwrap(),
        );

        let manager = LocaleManager::new(table, "en").unwrap();
        let mismatches = manager.shape_mismatches();

        assert_eq!(mismatches.len(), 2);
        assert!(mismatches.iter().all(|mismatch| mismatch.locale == "de"));
        assert!(matches!(
            manager.translate("de", &manager.key("nested.greeting"), [("name", "x")]),
            Err(LocaleError::InvalidPath(_))
        ));
    }

    #[rstest]
    fn test_shape_mismatch_strict_fails_construction() {
        let mut table = create_table();
        table.insert(
            "de".to_string(),
            TranslationTree::from_json(json!({ "title": "Titel", "extra": "Extra" })).unwrap(),
        );
        let settings =
            ManagerSettings { shape_validation: ShapeValidation::Strict, ..Default::default() };

        let result = LocaleManager::with_settings(table, "en", settings);

        assert!(matches!(result, Err(LocaleError::ShapeMismatch { .. })));
    }

    #[rstest]
    fn test_strict_accepts_uniform_shape() {
        let settings =
            ManagerSettings { shape_validation: ShapeValidation::Strict, ..Default::default() };

        let manager = LocaleManager::with_settings(create_table(), "fr", settings).unwrap();

        assert!(manager.shape_mismatches().is_empty());
        assert_eq!(manager.default_locale(), "fr");
    }

    #[rstest]
    fn test_localize_pathname_checks_locale() {
        let manager = create_manager();

        assert_eq!(manager.localize_pathname("/fr/foo", "en").unwrap(), "/en/foo");
        assert!(matches!(
            manager.localize_pathname("/foo", "de"),
            Err(LocaleError::LocaleNotFound(locale)) if locale == "de"
        ));
    }

    #[rstest]
    fn test_concurrent_localize_shares_one_tree() {
        let manager = Arc::new(create_manager());

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let manager = Arc::clone(&manager);
                thread::spawn(move || manager.localize("fr").unwrap())
            })
            .collect();
        let trees: Vec<Arc<LocalizedTree>> =
            handles.into_iter().map(|handle| handle.join().unwrap()).collect();

        let first = trees.first().unwrap();
        assert!(trees.iter().all(|tree| Arc::ptr_eq(first, tree)));
    }
}
