//! locale-pathname
//!
//! Locale table management: cached interpolating string accessors per locale,
//! and conversion between canonical and locale-prefixed URL pathnames.

pub mod accessor;
pub mod config;
pub mod error;
pub mod manager;
pub mod pathname;
pub mod tree;
pub mod types;

mod test_utils;

pub use accessor::Accessor;
pub use error::LocaleError;
pub use manager::{
    LocaleManager,
    LocaleTable,
};
pub use tree::{
    LocalizedTree,
    TranslationTree,
    from_values,
};
pub use types::KeyPath;
