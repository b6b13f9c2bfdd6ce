//! Translation trees and their localized accessor counterparts.

use std::collections::BTreeMap;

use serde::{
    Deserialize,
    Serialize,
};
use serde_json::Value;

use crate::accessor::Accessor;
use crate::error::LocaleError;
use crate::types::KeyPath;

/// Recursively nested string-keyed tree.
///
/// Leaves are either template strings ([`TranslationTree`]) or callable
/// accessors ([`LocalizedTree`]); both share the same shape for one locale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Tree<L> {
    Leaf(L),
    Node(BTreeMap<String, Tree<L>>),
}

/// Tree of raw templates as supplied by the caller.
pub type TranslationTree = Tree<String>;

/// Tree of interpolating accessors built from a [`TranslationTree`].
pub type LocalizedTree = Tree<Accessor>;

impl TranslationTree {
    /// Converts a JSON value into a translation tree.
    ///
    /// The root must be an object; below it only objects and strings are
    /// accepted. Numbers, booleans, nulls and arrays are rejected.
    ///
    /// # Examples
    /// ```
    /// use serde_json::json;
    /// use locale_pathname::tree::TranslationTree;
    ///
    /// let tree = TranslationTree::from_json(json!({ "greeting": "Hello {name}" })).unwrap();
    /// assert!(tree.get("greeting").is_some_and(|leaf| leaf.is_leaf()));
    /// assert!(TranslationTree::from_json(json!({ "count": 3 })).is_err());
    /// ```
    pub fn from_json(value: Value) -> Result<Self, LocaleError> {
        if !value.is_object() {
            return Err(LocaleError::InvalidTranslation(serde::de::Error::custom(
                "translation tree root must be an object",
            )));
        }
        Ok(serde_json::from_value(value)?)
    }
}

impl<L> Tree<L> {
    /// Builds an empty internal node.
    #[must_use]
    pub const fn empty() -> Self {
        Self::Node(BTreeMap::new())
    }

    #[must_use]
    pub const fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf(_))
    }

    /// Returns the direct child named `key`, or `None` for leaves and unknown keys.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Self> {
        match self {
            Self::Node(children) => children.get(key),
            Self::Leaf(_) => None,
        }
    }

    /// Resolves `key_path` to exactly one leaf.
    ///
    /// Fails with [`LocaleError::InvalidPath`] when a segment is missing or
    /// the path ends on an internal node.
    pub fn resolve(&self, key_path: &KeyPath) -> Result<&L, LocaleError> {
        let node = key_path
            .segments()
            .iter()
            .try_fold(self, |node, segment| node.get(segment))
            .ok_or_else(|| LocaleError::InvalidPath(key_path.clone()))?;

        match node {
            Self::Leaf(leaf) => Ok(leaf),
            Self::Node(_) => Err(LocaleError::InvalidPath(key_path.clone())),
        }
    }

    /// Builds a tree of identical shape with every leaf transformed by `f`.
    #[must_use]
    pub fn map_leaves<T, F>(&self, f: &mut F) -> Tree<T>
    where
        F: FnMut(&L) -> T,
    {
        match self {
            Self::Leaf(leaf) => Tree::Leaf(f(leaf)),
            Self::Node(children) => Tree::Node(
                children.iter().map(|(key, child)| (key.clone(), child.map_leaves(f))).collect(),
            ),
        }
    }

    /// Lists the key path of every leaf in lexicographic order.
    ///
    /// A tree that is itself a leaf yields the root path.
    #[must_use]
    pub fn key_paths(&self) -> Vec<KeyPath> {
        let mut paths = Vec::new();
        collect_key_paths(self, &KeyPath::root(), &mut paths);
        paths
    }

    #[must_use]
    pub fn leaf_count(&self) -> usize {
        match self {
            Self::Leaf(_) => 1,
            Self::Node(children) => children.values().map(Self::leaf_count).sum(),
        }
    }
}

/// Depth-first walk accumulating leaf paths into `paths`.
fn collect_key_paths<L>(tree: &Tree<L>, prefix: &KeyPath, paths: &mut Vec<KeyPath>) {
    match tree {
        Tree::Leaf(_) => paths.push(prefix.clone()),
        Tree::Node(children) => {
            for (key, child) in children {
                collect_key_paths(child, &prefix.child(key.as_str()), paths);
            }
        }
    }
}

/// Resolves `key_path` against a localized or raw tree.
///
/// Free-function form of [`Tree::resolve`].
pub fn from_values<'a, L>(tree: &'a Tree<L>, key_path: &KeyPath) -> Result<&'a L, LocaleError> {
    tree.resolve(key_path)
}
