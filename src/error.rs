use thiserror::Error;

use crate::config::ConfigError;
use crate::types::KeyPath;

/// Errors produced by the locale manager and tree lookups.
#[derive(Error, Debug)]
pub enum LocaleError {
    /// The locale identifier is not a key of the locale table.
    #[error("Locale not found: '{0}'")]
    LocaleNotFound(String),

    /// The key path does not resolve to exactly one leaf.
    #[error("Invalid key path: '{0}'")]
    InvalidPath(KeyPath),

    /// A locale lacks a key path that another locale defines (strict shape validation only).
    #[error("Locale '{locale}' does not define key path '{key_path}'")]
    ShapeMismatch { locale: String, key_path: KeyPath },

    /// A locale's translation tree is a single string instead of a mapping.
    #[error("Translation tree for locale '{0}' must be a mapping of keys, not a single string")]
    LeafRoot(String),

    /// Translation data contains something other than nested objects and string leaves.
    #[error("Invalid translation data: {0}")]
    InvalidTranslation(#[from] serde_json::Error),

    /// Manager settings failed validation.
    #[error(transparent)]
    Config(#[from] ConfigError),
}
